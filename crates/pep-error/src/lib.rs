//! Unified error taxonomy for the PEP client.
//!
//! Every error surfaced above the codec/mapping layer carries a
//! [`PepErrorKind`] (a stable, machine-matchable tag corresponding to one row
//! of the authorize-call error taxonomy), a human-readable message, and an
//! optional boxed cause. Lower crates (`pep-buffer`, `pep-hessian`,
//! `pep-mapping`, `pep-plugins`) keep their own precise local error types;
//! `pep-client` converts each into a `PepError` at the point it surfaces, so
//! `authorize` returns a single typed error as its contract requires.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::fmt;

/// Broad kind of failure an [`authorize`](https://docs.rs/pep-client) call
/// can report, one per row of the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PepErrorKind {
    /// Allocation failure anywhere in the call chain.
    Memory,
    /// A mandatory argument was absent where one was required.
    NullPointer,
    /// Internal list/collection invariant was violated.
    ListError,
    /// The HTTP client reported a setup error (bad URL, TLS config, etc).
    Transport,
    /// The network exchange itself failed (connect/timeout/read/write).
    TransportPerform,
    /// The PDP responded with an HTTP status other than 200.
    AuthzRequest,
    /// A registered pre-processor's `init` returned an error.
    PreProcessorInit,
    /// A registered pre-processor's `process` returned an error.
    PreProcessorRun,
    /// A registered post-processor's `init` returned an error.
    PostProcessorInit,
    /// A registered post-processor's `process` returned an error.
    PostProcessorRun,
    /// An option id is unknown, or its argument is invalid for that option.
    OptionInvalid,
    /// Failure converting a policy object into its Hessian representation.
    MarshalEncoding,
    /// Failure writing the Hessian byte stream.
    MarshalIo,
    /// Failure parsing a Hessian byte stream into a policy object.
    UnmarshalEncoding,
    /// Failure reading the Hessian byte stream.
    UnmarshalIo,
}

impl PepErrorKind {
    /// Stable lowercase identifier, useful for logs and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::NullPointer => "null_pointer",
            Self::ListError => "list_error",
            Self::Transport => "transport",
            Self::TransportPerform => "transport_perform",
            Self::AuthzRequest => "authz_request",
            Self::PreProcessorInit => "preprocessor_init",
            Self::PreProcessorRun => "preprocessor_run",
            Self::PostProcessorInit => "postprocessor_init",
            Self::PostProcessorRun => "postprocessor_run",
            Self::OptionInvalid => "option_invalid",
            Self::MarshalEncoding => "marshal_encoding",
            Self::MarshalIo => "marshal_io",
            Self::UnmarshalEncoding => "unmarshal_encoding",
            Self::UnmarshalIo => "unmarshal_io",
        }
    }
}

impl fmt::Display for PepErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed error returned from the public API, carrying an
/// accompanying human-readable message per the "fetched by a second call"
/// propagation policy.
#[derive(thiserror::Error)]
#[error("[{kind}] {message}")]
pub struct PepError {
    /// The broad kind of failure.
    pub kind: PepErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PepError {
    /// Construct a new error with the given kind and message.
    pub fn new(kind: PepErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach an underlying cause.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Debug for PepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("PepError");
        d.field("kind", &self.kind);
        d.field("message", &self.message);
        if let Some(ref src) = self.source {
            d.field("source", &src.to_string());
        }
        d.finish()
    }
}
