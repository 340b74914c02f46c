//! Errors raised by the Hessian codec.

use thiserror::Error;

/// Failures the codec can report. Serializers fail only on allocation (never
/// observed on a `Vec`-backed buffer in practice, but kept as a variant for
/// API symmetry with the deserializer and with the original's failure
/// model); deserializers fail on malformed or truncated wire data.
#[derive(Debug, Error)]
pub enum HessianError {
    /// End of input reached while a tag or payload was still expected.
    #[error("truncated input: expected {expected} more byte(s) while reading {context}")]
    Truncated {
        /// What was being read when input ran out.
        context: &'static str,
        /// How many more bytes were needed.
        expected: usize,
    },

    /// A byte was read where a wire tag was expected, but it didn't match
    /// any known tag.
    #[error("unexpected tag {tag:#04x} ({tag_char:?}) while reading {context}")]
    UnexpectedTag {
        /// The offending byte.
        tag: u8,
        /// The byte rendered as a `char` when printable, for readability.
        tag_char: char,
        /// What was being read.
        context: &'static str,
    },

    /// A length or count field contained an invalid value (e.g. negative
    /// where non-negative was required).
    #[error("malformed length field while reading {context}: {detail}")]
    MalformedLength {
        /// What was being read.
        context: &'static str,
        /// Free-form detail.
        detail: String,
    },

    /// A chunked UTF-8 string or binary blob's chunk boundary split a
    /// multi-byte UTF-8 sequence, or the decoded bytes were not valid UTF-8.
    #[error("invalid UTF-8 in Hessian string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A `Ref` inside a List or Map pointed past the end of the local
    /// reference table.
    #[error("ref index {index} out of range (table has {table_len} entries)")]
    RefOutOfRange {
        /// The offending index.
        index: i32,
        /// Size of the reference table at the time of resolution.
        table_len: usize,
    },

    /// Allocation failure. Not expected in practice on this platform, kept
    /// for parity with the reference failure model.
    #[error("allocation failure: {0}")]
    Allocation(String),
}
