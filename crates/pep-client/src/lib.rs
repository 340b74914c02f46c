//! Blocking client orchestration for a centralized XACML authorization
//! service: configure transport options, run the pre-processor chain,
//! marshal+base64+POST over mutual-TLS HTTPS, base64+unmarshal the
//! response, run the post-processor chain, and return a structured
//! decision.
//!
//! `authorize` performs exactly one synchronous HTTP exchange per call.
//! Multiple [`PepClient`] handles may be used from independent threads with
//! no coordination; a single handle is not meant to be shared across
//! threads concurrently (see [`PepClient`]'s doc comment).

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod http;
mod logging;
mod options;
mod version;

pub use client::PepClient;
pub use options::{ClientOptions, LogHandler, LogLevel, LogOutput};
pub use version::version;
