use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use zeroize::Zeroizing;

/// Threshold for the process-wide logging sink, mirroring the original's
/// `PEP_LOGLEVEL_NONE`(-1)..`PEP_LOGLEVEL_DEBUG`(3) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Disables the subscriber's filter entirely.
    None,
    /// Errors only.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational events.
    Info,
    /// Everything, including debug-level trace events.
    Debug,
}

impl LogLevel {
    /// The corresponding [`tracing::Level`], or `None` if logging is
    /// disabled entirely.
    pub fn as_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::None => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
        }
    }
}

/// Destination for the default logging sink.
#[derive(Debug, Clone, Default)]
pub enum LogOutput {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// Append to a file at this path.
    File(PathBuf),
}

/// A handler replacing the default logging sink entirely: called with the
/// event's level and its formatted message.
pub type LogHandler = Arc<dyn Fn(tracing::Level, &str) + Send + Sync>;

/// Client configuration, set once at construction and mutated in place
/// through the `set_*` methods (each overwrite drops the previous value;
/// the key password's backing memory is zeroed on drop via [`Zeroizing`]).
#[derive(Default)]
pub struct ClientOptions {
    pub(crate) endpoint_url: Option<String>,
    pub(crate) endpoint_timeout: Option<Duration>,
    pub(crate) endpoint_ssl_validation: Option<bool>,
    pub(crate) endpoint_ssl_cipher_list: Option<String>,
    pub(crate) endpoint_server_cert: Option<PathBuf>,
    pub(crate) endpoint_server_capath: Option<PathBuf>,
    pub(crate) endpoint_client_cert: Option<PathBuf>,
    pub(crate) endpoint_client_key: Option<PathBuf>,
    pub(crate) endpoint_client_keypassword: Option<Zeroizing<String>>,
    pub(crate) enable_pre_processors: bool,
    pub(crate) enable_post_processors: bool,
    pub(crate) log_level: LogLevel,
    pub(crate) log_output: LogOutput,
    pub(crate) log_handler: Option<LogHandler>,
}

impl ClientOptions {
    /// Start from defaults: no endpoint configured, both processor chains
    /// enabled, TLS validation on, a 30 second timeout, `Warn` logging to
    /// stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint_timeout: Some(Duration::from_secs(30)),
            endpoint_ssl_validation: Some(true),
            enable_pre_processors: true,
            enable_post_processors: true,
            ..Default::default()
        }
    }

    /// Set the mandatory HTTPS endpoint URL.
    #[must_use]
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Set the overall connection+transfer timeout.
    #[must_use]
    pub fn endpoint_timeout(mut self, timeout: Duration) -> Self {
        self.endpoint_timeout = Some(timeout);
        self
    }

    /// Enable or disable server certificate verification.
    #[must_use]
    pub fn endpoint_ssl_validation(mut self, enabled: bool) -> Self {
        self.endpoint_ssl_validation = Some(enabled);
        self
    }

    /// Set a path to a CA bundle file used to verify the server certificate.
    #[must_use]
    pub fn endpoint_server_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.endpoint_server_cert = Some(path.into());
        self
    }

    /// Set a path to a hashed CA directory used to verify the server
    /// certificate.
    #[must_use]
    pub fn endpoint_server_capath(mut self, path: impl Into<PathBuf>) -> Self {
        self.endpoint_server_capath = Some(path.into());
        self
    }

    /// Set the path to the client certificate (PEM) used for mutual TLS.
    #[must_use]
    pub fn endpoint_client_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.endpoint_client_cert = Some(path.into());
        self
    }

    /// Set the path to the client private key (PEM) used for mutual TLS.
    #[must_use]
    pub fn endpoint_client_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.endpoint_client_key = Some(path.into());
        self
    }

    /// Set the passphrase protecting the client private key. Overwriting a
    /// previously-set password drops (and zeroes) the old one.
    #[must_use]
    pub fn endpoint_client_keypassword(mut self, password: impl Into<String>) -> Self {
        self.endpoint_client_keypassword = Some(Zeroizing::new(password.into()));
        self
    }

    /// Gate the pre-processor chain; disabled chains are skipped entirely.
    #[must_use]
    pub fn enable_pre_processors(mut self, enabled: bool) -> Self {
        self.enable_pre_processors = enabled;
        self
    }

    /// Gate the post-processor chain; disabled chains are skipped entirely.
    #[must_use]
    pub fn enable_post_processors(mut self, enabled: bool) -> Self {
        self.enable_post_processors = enabled;
        self
    }

    /// Set the logging threshold.
    #[must_use]
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the default logging sink's destination.
    #[must_use]
    pub fn log_output(mut self, output: LogOutput) -> Self {
        self.log_output = output;
        self
    }

    /// Replace the default logging sink with a custom handler.
    #[must_use]
    pub fn log_handler(mut self, handler: LogHandler) -> Self {
        self.log_handler = Some(handler);
        self
    }
}
