//! Example driver: builds a minimal-permit [`Request`], wires up both
//! built-in profile adapters in their mandated registration order, sends
//! it to a configured PDP endpoint, and prints the decision.
//!
//! This binary is not part of the reusable library surface — it exists so
//! the workspace has something runnable to exercise `pep-client` against a
//! live or mocked endpoint.

use clap::Parser;
use pep_client::{ClientOptions, PepClient};
use pep_policy::{Action, Attribute, Request, Resource, Subject};
use pep_profiles::{AuthzInteropToGridWn, GridWnToAuthzInterop};

#[derive(Parser, Debug)]
#[command(name = "pep-cli", version, about = "Minimal-permit PEP example driver")]
struct Cli {
    /// HTTPS endpoint of the policy decision point.
    #[arg(long)]
    endpoint_url: String,

    /// Path to a client certificate (PEM) for mutual TLS.
    #[arg(long)]
    client_cert: Option<std::path::PathBuf>,

    /// Path to a client private key (PEM) for mutual TLS.
    #[arg(long)]
    client_key: Option<std::path::PathBuf>,

    /// Disable the built-in AuthZ-Interop / Grid WN adapter plug-ins.
    #[arg(long)]
    no_adapters: bool,
}

/// A minimal-permit request: one subject, one resource, one read action.
fn minimal_permit_request() -> Request {
    Request {
        subjects: vec![Subject {
            category: None,
            attributes: vec![Attribute {
                id: "urn:oasis:names:tc:xacml:1.0:subject:subject-id".to_string(),
                datatype: Some("urn:oasis:names:tc:xacml:1.0:data-type:x500Name".to_string()),
                issuer: None,
                values: vec!["CN=Alice".to_string()],
            }],
        }],
        resources: vec![Resource {
            content: None,
            attributes: vec![Attribute {
                id: "urn:oasis:names:tc:xacml:1.0:resource:resource-id".to_string(),
                datatype: None,
                issuer: None,
                values: vec!["svc1".to_string()],
            }],
        }],
        action: Some(Action {
            attributes: vec![Attribute {
                id: "urn:oasis:names:tc:xacml:1.0:action:action-id".to_string(),
                datatype: None,
                issuer: None,
                values: vec!["read".to_string()],
            }],
        }),
        environment: None,
    }
}

fn main() -> std::process::ExitCode {
    // Logging is installed by `PepClient::new` from `ClientOptions`'
    // `log_level`/`log_output`/`log_handler` fields (defaults: `Warn` to
    // stdout), not set up independently here.
    let cli = Cli::parse();

    let mut options = ClientOptions::new().endpoint_url(cli.endpoint_url.clone());
    if let (Some(cert), Some(key)) = (&cli.client_cert, &cli.client_key) {
        options = options
            .endpoint_client_cert(cert.clone())
            .endpoint_client_key(key.clone());
    }

    let mut client = match PepClient::new(options) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("failed to build client: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    if !cli.no_adapters {
        // AuthzInteropToGridWn must be the last pre-processor registered
        // (it needs to see the fully-formed request); GridWnToAuthzInterop
        // must be the first post-processor registered (it needs to see
        // the PDP's result before any other post-processor rewrites it).
        if let Err(err) = client.register_preprocessor(Box::new(AuthzInteropToGridWn::new())) {
            eprintln!("failed to register pre-processor: {err}");
            return std::process::ExitCode::FAILURE;
        }
        if let Err(err) = client.register_postprocessor(Box::new(GridWnToAuthzInterop::new())) {
            eprintln!("failed to register post-processor: {err}");
            return std::process::ExitCode::FAILURE;
        }
    }

    let request = minimal_permit_request();
    match client.authorize(request) {
        Ok((_effective_request, response)) => {
            for result in &response.results {
                println!("decision: {:?}", result.decision);
                if let Some(resource_id) = &result.resource_id {
                    println!("  resourceId: {resource_id}");
                }
                for obligation in &result.obligations {
                    println!("  obligation: {} (fulfillOn={:?})", obligation.id, obligation.fulfill_on);
                }
            }
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("authorize failed: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}
