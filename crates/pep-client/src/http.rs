use pep_error::{PepError, PepErrorKind};

use crate::options::ClientOptions;

/// Build the underlying blocking HTTP client from the configured transport
/// options: client certificate/key for mutual TLS, an optional CA bundle,
/// server-certificate validation, and the overall timeout.
///
/// The client key's passphrase (`endpoint_client_keypassword`) is accepted
/// and zeroized per the option-replacement contract, but the underlying
/// rustls identity loader requires an unencrypted PEM key; encrypted client
/// keys must be decrypted by the caller before being handed to this option.
pub(crate) fn build_http_client(
    options: &ClientOptions,
) -> Result<reqwest::blocking::Client, PepError> {
    let mut builder = reqwest::blocking::Client::builder()
        .timeout(options.endpoint_timeout.unwrap_or(std::time::Duration::from_secs(30)))
        .danger_accept_invalid_certs(!options.endpoint_ssl_validation.unwrap_or(true));

    if let (Some(cert_path), Some(key_path)) =
        (&options.endpoint_client_cert, &options.endpoint_client_key)
    {
        let mut combined = std::fs::read(cert_path).map_err(|e| {
            PepError::new(
                PepErrorKind::Transport,
                format!("failed to read client certificate at {}", cert_path.display()),
            )
            .with_source(e)
        })?;
        let key_bytes = std::fs::read(key_path).map_err(|e| {
            PepError::new(
                PepErrorKind::Transport,
                format!("failed to read client key at {}", key_path.display()),
            )
            .with_source(e)
        })?;
        combined.extend_from_slice(&key_bytes);
        let identity = reqwest::Identity::from_pem(&combined).map_err(|e| {
            PepError::new(PepErrorKind::Transport, "failed to build client TLS identity")
                .with_source(e)
        })?;
        builder = builder.identity(identity);
    }

    if let Some(ca_path) = &options.endpoint_server_cert {
        let ca_bytes = std::fs::read(ca_path).map_err(|e| {
            PepError::new(
                PepErrorKind::Transport,
                format!("failed to read server CA bundle at {}", ca_path.display()),
            )
            .with_source(e)
        })?;
        let cert = reqwest::Certificate::from_pem(&ca_bytes).map_err(|e| {
            PepError::new(PepErrorKind::Transport, "failed to parse server CA bundle").with_source(e)
        })?;
        builder = builder.add_root_certificate(cert);
    }

    if let Some(ca_dir) = &options.endpoint_server_capath {
        for entry in std::fs::read_dir(ca_dir).map_err(|e| {
            PepError::new(
                PepErrorKind::Transport,
                format!("failed to read CA directory at {}", ca_dir.display()),
            )
            .with_source(e)
        })? {
            let entry = entry.map_err(|e| {
                PepError::new(PepErrorKind::Transport, "failed to enumerate CA directory entry")
                    .with_source(e)
            })?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Ok(bytes) = std::fs::read(&path) else {
                tracing::warn!(path = %path.display(), "skipping unreadable CA directory entry");
                continue;
            };
            match reqwest::Certificate::from_pem(&bytes) {
                Ok(cert) => builder = builder.add_root_certificate(cert),
                Err(_) => {
                    tracing::warn!(path = %path.display(), "skipping non-PEM entry in CA directory")
                }
            }
        }
    }

    if options.endpoint_ssl_cipher_list.is_some() {
        tracing::warn!(
            "endpoint-ssl-cipher-list is not applicable to the rustls transport backend and is ignored"
        );
    }

    builder.build().map_err(|e| {
        PepError::new(PepErrorKind::Transport, "failed to build HTTP client").with_source(e)
    })
}
