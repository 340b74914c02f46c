use pep_error::{PepError, PepErrorKind};
use pep_hessian::HessianError;
use pep_mapping::MappingError;
use pep_plugins::{PluginError, PostProcessor, PostProcessorChain, PreProcessor, PreProcessorChain};
use pep_policy::{Request, Response};

use crate::http::build_http_client;
use crate::logging;
use crate::options::ClientOptions;
use crate::version::{next_client_id, version};

/// A client handle for a single policy decision point endpoint.
///
/// `PepClient` is `Send` but not `Sync`: concurrent `authorize` calls on the
/// *same* handle from multiple threads are not supported, but independent
/// handles may run on independent threads with no coordination.
pub struct PepClient {
    id: u64,
    options: ClientOptions,
    http: reqwest::blocking::Client,
    pre_processors: PreProcessorChain,
    post_processors: PostProcessorChain,
}

impl PepClient {
    /// Create a new client handle from `options`, building the underlying
    /// HTTPS transport immediately so that TLS configuration errors surface
    /// at construction rather than on the first `authorize` call.
    pub fn new(options: ClientOptions) -> Result<Self, PepError> {
        if options.endpoint_url.is_none() {
            return Err(PepError::new(
                PepErrorKind::OptionInvalid,
                "endpoint-url is mandatory",
            ));
        }
        logging::install(&options);
        let http = build_http_client(&options)?;
        let id = next_client_id();
        tracing::debug!(client.id = id, "created PepClient handle");
        Ok(Self {
            id,
            options,
            http,
            pre_processors: PreProcessorChain::new(),
            post_processors: PostProcessorChain::new(),
        })
    }

    /// This handle's sequential client identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Register a pre-processor, calling its `init` immediately.
    pub fn register_preprocessor(&mut self, mut plugin: Box<dyn PreProcessor>) -> Result<(), PepError> {
        plugin.init().map_err(|e| pep_plugin_error(e))?;
        tracing::debug!(client.id = self.id, plugin = plugin.id(), "registered pre-processor");
        self.pre_processors.register(plugin);
        Ok(())
    }

    /// Register a post-processor, calling its `init` immediately.
    pub fn register_postprocessor(&mut self, mut plugin: Box<dyn PostProcessor>) -> Result<(), PepError> {
        plugin.init().map_err(|e| pep_plugin_error(e))?;
        tracing::debug!(client.id = self.id, plugin = plugin.id(), "registered post-processor");
        self.post_processors.register(plugin);
        Ok(())
    }

    /// Run a single authorization exchange: pre-process, marshal, base64
    /// encode, POST, base64 decode, unmarshal, swap in the effective
    /// request if one was echoed, then post-process.
    ///
    /// Returns the effective request (the caller's original, unless the PDP
    /// echoed a different one) alongside the decision response.
    pub fn authorize(&self, mut request: Request) -> Result<(Request, Response), PepError> {
        if self.options.enable_pre_processors {
            self.pre_processors
                .run(&mut request)
                .map_err(pep_plugin_error)?;
        }

        let wire_request = pep_mapping::marshal_request(&request);
        let mut buffer = pep_buffer::ByteBuffer::new();
        pep_hessian::serialize(&wire_request, &mut buffer).map_err(pep_hessian_marshal_error)?;
        let mut encoded_buffer = pep_buffer::ByteBuffer::new();
        pep_base64::encode_l(&mut buffer, &mut encoded_buffer, pep_base64::DEFAULT_LINE_SIZE as i64);
        let encoded = encoded_buffer.into_vec();

        let url = self
            .options
            .endpoint_url
            .as_ref()
            .expect("endpoint_url validated at construction");

        tracing::debug!(client.id = self.id, url, "sending authorize request");
        let http_response = self
            .http
            .post(url)
            .header("Expect", "")
            .header("User-Agent", version())
            .body(encoded)
            .send()
            .map_err(|e| {
                PepError::new(PepErrorKind::TransportPerform, "authorize request failed").with_source(e)
            })?;

        let status = http_response.status();
        if status.as_u16() != 200 {
            return Err(PepError::new(
                PepErrorKind::AuthzRequest,
                format!("PDP responded with HTTP {status}"),
            ));
        }

        let body = http_response.bytes().map_err(|e| {
            PepError::new(PepErrorKind::TransportPerform, "failed to read response body").with_source(e)
        })?;
        let mut encoded_response = pep_buffer::ByteBuffer::from_vec(body.to_vec());
        let mut response_buffer = pep_buffer::ByteBuffer::new();
        pep_base64::decode(&mut encoded_response, &mut response_buffer);
        let wire_response =
            pep_hessian::deserialize(&mut response_buffer).map_err(pep_hessian_unmarshal_error)?;
        let mut response = pep_mapping::unmarshal_response(&wire_response).map_err(pep_mapping_unmarshal_error)?;

        let effective_request = response.relinquish_request().unwrap_or(request);

        if self.options.enable_post_processors {
            self.post_processors
                .run(&effective_request, &mut response)
                .map_err(pep_plugin_error)?;
        }

        Ok((effective_request, response))
    }
}

impl Drop for PepClient {
    fn drop(&mut self) {
        if let Err(e) = self.pre_processors.destroy_all() {
            tracing::warn!(client.id = self.id, error = %e, "pre-processor destroy failed");
        }
        if let Err(e) = self.post_processors.destroy_all() {
            tracing::warn!(client.id = self.id, error = %e, "post-processor destroy failed");
        }
    }
}

fn pep_plugin_error(e: PluginError) -> PepError {
    let kind = match e {
        PluginError::PreProcessorInit { .. } => PepErrorKind::PreProcessorInit,
        PluginError::PreProcessorRun { .. } => PepErrorKind::PreProcessorRun,
        PluginError::PostProcessorInit { .. } => PepErrorKind::PostProcessorInit,
        PluginError::PostProcessorRun { .. } => PepErrorKind::PostProcessorRun,
    };
    PepError::new(kind, e.to_string())
}

fn pep_hessian_marshal_error(e: HessianError) -> PepError {
    PepError::new(PepErrorKind::MarshalEncoding, e.to_string())
}

fn pep_hessian_unmarshal_error(e: HessianError) -> PepError {
    PepError::new(PepErrorKind::UnmarshalEncoding, e.to_string())
}

fn pep_mapping_unmarshal_error(e: MappingError) -> PepError {
    PepError::new(PepErrorKind::UnmarshalEncoding, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_requires_endpoint_url() {
        let err = PepClient::new(ClientOptions::new()).unwrap_err();
        assert_eq!(err.kind, PepErrorKind::OptionInvalid);
    }

    #[test]
    fn construction_succeeds_with_endpoint_url() {
        let client = PepClient::new(ClientOptions::new().endpoint_url("https://pdp.example.org/authz"));
        assert!(client.is_ok());
    }
}
