use pep_client::{ClientOptions, PepClient};
use pep_policy::{Action, Attribute, Decision, Request, Resource, Result as PolicyResult, Response, Subject};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn minimal_request() -> Request {
    Request {
        subjects: vec![Subject {
            category: None,
            attributes: vec![Attribute::new("subject-id").with_value("CN=Alice")],
        }],
        resources: vec![Resource {
            content: None,
            attributes: vec![Attribute::new("resource-id").with_value("svc1")],
        }],
        action: Some(Action {
            attributes: vec![Attribute::new("action-id").with_value("read")],
        }),
        environment: None,
    }
}

fn encode_response_body(response: &Response) -> Vec<u8> {
    let wire = pep_mapping::marshal_response(response).expect("marshal response");
    let mut buffer = pep_buffer::ByteBuffer::new();
    pep_hessian::serialize(&wire, &mut buffer).expect("serialize response");
    let mut encoded = pep_buffer::ByteBuffer::new();
    pep_base64::encode_l(&mut buffer, &mut encoded, pep_base64::DEFAULT_LINE_SIZE as i64);
    encoded.into_vec()
}

#[tokio::test(flavor = "multi_thread")]
async fn authorize_round_trips_a_permit_decision() {
    let server = MockServer::start().await;

    let response = Response {
        request: None,
        results: vec![PolicyResult {
            decision: Decision::Permit,
            resource_id: Some("svc1".to_string()),
            status: None,
            obligations: Vec::new(),
        }],
    };
    let body = encode_response_body(&response);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let endpoint = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = PepClient::new(ClientOptions::new().endpoint_url(endpoint)).unwrap();
        client.authorize(minimal_request())
    })
    .await
    .unwrap();

    let (_effective_request, response) = result.expect("authorize should succeed");
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].decision, Decision::Permit);
    assert!(response.results[0].decision.is_permit());
    assert_eq!(response.results[0].resource_id.as_deref(), Some("svc1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn authorize_swaps_in_the_echoed_effective_request() {
    let server = MockServer::start().await;

    let echoed_request = minimal_request();
    let response = Response {
        request: Some(echoed_request),
        results: vec![PolicyResult {
            decision: Decision::Deny,
            resource_id: None,
            status: None,
            obligations: Vec::new(),
        }],
    };
    let body = encode_response_body(&response);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let endpoint = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = PepClient::new(ClientOptions::new().endpoint_url(endpoint)).unwrap();
        client.authorize(minimal_request())
    })
    .await
    .unwrap();

    let (effective_request, response) = result.expect("authorize should succeed");
    assert_eq!(effective_request.subjects.len(), 1);
    assert!(response.request.is_none(), "relinquish_request should have taken the echoed request");
}

#[tokio::test(flavor = "multi_thread")]
async fn authorize_maps_non_200_status_to_authz_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let endpoint = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = PepClient::new(ClientOptions::new().endpoint_url(endpoint)).unwrap();
        client.authorize(minimal_request())
    })
    .await
    .unwrap();

    let err = result.expect_err("a 401 response must not produce a Response");
    assert_eq!(err.kind, pep_error::PepErrorKind::AuthzRequest);
}
