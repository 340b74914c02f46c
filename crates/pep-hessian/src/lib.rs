//! Hessian 1.0 binary object-serialization codec: a recursive, self-describing
//! binary format for a closed set of typed values, with chunked strings and
//! binary blobs and back-references resolved at deserialization time.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod error;
pub mod tag;
mod value;

pub use codec::{deserialize, deserialize_tag, serialize};
pub use error::HessianError;
pub use value::Value;

#[cfg(test)]
mod tests;
