//! The two built-in profile adapter plug-ins bridging the AuthZ-Interop and
//! Grid WN AuthZ XACML profiles.
//!
//! Callers wiring both adapters into a client must respect their
//! registration-order constraints: [`AuthzInteropToGridWn`] must be the
//! *last* registered pre-processor, and [`GridWnToAuthzInterop`] must be
//! the *first* registered post-processor.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod authzinterop_to_gridwn;
mod gridwn_to_authzinterop;
pub mod names;

pub use authzinterop_to_gridwn::AuthzInteropToGridWn;
pub use gridwn_to_authzinterop::GridWnToAuthzInterop;
