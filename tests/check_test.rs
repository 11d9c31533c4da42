//! End-to-end engine tests over a mock transport. Nothing here touches
//! the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use keyprobe::error::{CheckError, TransportError};
use keyprobe::service::RenderedRequest;
use keyprobe::transport::{ProbeResponse, Transport};
use keyprobe::{Checker, Registry};

const SERVICES: &str = r#"
svc:
  name: svc
  request:
    method: GET
    url: 'https://api.example.com/%s'
svc2:
  name: svc2
  request:
    method: POST
    url: 'https://api.example.com/auth?token=%s'
    headers:
      Authorization: "Bearer %s"
  validator:
    custom: true
"#;

/// Canned reply a test scripts the transport with.
enum Reply {
    Status(u16),
    WithHeaders(u16, Vec<(String, String)>),
    Fail(String),
}

/// Transport double: counts sends, records the last rendered request, and
/// returns whatever the test scripted.
struct MockTransport {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<RenderedRequest>>>,
}

impl MockTransport {
    fn new(reply: Reply) -> (Self, Arc<AtomicUsize>, Arc<Mutex<Option<RenderedRequest>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let last_request = Arc::new(Mutex::new(None));
        let transport = MockTransport {
            reply,
            calls: Arc::clone(&calls),
            last_request: Arc::clone(&last_request),
        };
        (transport, calls, last_request)
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &RenderedRequest) -> Result<ProbeResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.reply {
            Reply::Status(code) => Ok(ProbeResponse::new(*code, Vec::new(), Vec::new())),
            Reply::WithHeaders(code, headers) => {
                Ok(ProbeResponse::new(*code, headers.clone(), Vec::new()))
            }
            Reply::Fail(message) => Err(TransportError::new(message.clone())),
        }
    }
}

fn registry() -> Registry {
    Registry::from_yaml(SERVICES).unwrap()
}

#[test]
fn test_check_valid_token_via_200() {
    let (transport, _, _) = MockTransport::new(Reply::Status(200));
    let checker = Checker::with_transport(registry(), transport);
    assert!(checker.check("svc", "abc123").unwrap());
}

#[test]
fn test_check_invalid_token_via_401() {
    let (transport, _, _) = MockTransport::new(Reply::Status(401));
    let checker = Checker::with_transport(registry(), transport);
    assert!(!checker.check("svc", "abc123").unwrap());
}

#[test]
fn test_unknown_service_makes_no_network_call() {
    let (transport, calls, _) = MockTransport::new(Reply::Status(200));
    let checker = Checker::with_transport(registry(), transport);

    let err = checker.check("nonexistent", "abc123").unwrap_err();
    assert!(matches!(err, CheckError::UnknownService(name) if name == "nonexistent"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_rendered_request_reaches_the_transport() {
    let (transport, _, last_request) = MockTransport::new(Reply::Status(200));
    let checker = Checker::with_transport(registry(), transport);

    checker.check("svc2", "abc123").unwrap();

    let request = last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "https://api.example.com/auth?token=abc123");
    assert_eq!(request.headers["Authorization"], "Bearer abc123");
}

#[test]
fn test_custom_header_predicate_overrides_status() {
    let mut registry = registry();
    registry
        .attach_predicate("svc2", |response| Ok(response.has_header("X-Oauth-Scopes")))
        .unwrap();
    registry.seal();

    // 200 without the marker header is still an invalid token.
    let (transport, _, _) = MockTransport::new(Reply::Status(200));
    let checker = Checker::with_transport(registry, transport);
    assert!(!checker.check("svc2", "abc123").unwrap());
}

#[test]
fn test_custom_header_predicate_accepts_marker_header() {
    let mut registry = registry();
    registry
        .attach_predicate("svc2", |response| Ok(response.has_header("X-Oauth-Scopes")))
        .unwrap();
    registry.seal();

    let (transport, _, _) = MockTransport::new(Reply::WithHeaders(
        200,
        vec![("X-Oauth-Scopes".to_string(), "identify".to_string())],
    ));
    let checker = Checker::with_transport(registry, transport);
    assert!(checker.check("svc2", "abc123").unwrap());
}

#[test]
fn test_default_predicate_still_applies_to_other_services() {
    // Attaching a predicate to svc2 must not leak onto svc.
    let mut registry = registry();
    registry.attach_predicate("svc2", |_| Ok(false)).unwrap();
    registry.seal();

    let (transport, _, _) = MockTransport::new(Reply::Status(200));
    let checker = Checker::with_transport(registry, transport);
    assert!(checker.check("svc", "abc123").unwrap());
}

#[test]
fn test_transport_failure_is_an_error_not_a_verdict() {
    let (transport, _, _) = MockTransport::new(Reply::Fail("timed out".to_string()));
    let checker = Checker::with_transport(registry(), transport);

    let err = checker.check("svc", "abc123").unwrap_err();
    match err {
        CheckError::Transport { service, source } => {
            assert_eq!(service, "svc");
            assert_eq!(source.to_string(), "timed out");
        }
        other => panic!("expected Transport error, got {other:?}"),
    }
}

#[test]
fn test_predicate_error_propagates_with_service_name() {
    let mut registry = registry();
    registry
        .attach_predicate("svc2", |_| Err("unparseable response".into()))
        .unwrap();
    registry.seal();

    let (transport, _, _) = MockTransport::new(Reply::Status(200));
    let checker = Checker::with_transport(registry, transport);

    let err = checker.check("svc2", "abc123").unwrap_err();
    match err {
        CheckError::Predicate { service, source } => {
            assert_eq!(service, "svc2");
            assert_eq!(source.to_string(), "unparseable response");
        }
        other => panic!("expected Predicate error, got {other:?}"),
    }
}

#[test]
fn test_template_error_short_circuits_before_transport() {
    let (transport, calls, _) = MockTransport::new(Reply::Status(200));
    let registry = Registry::from_yaml(
        r#"
broken:
  name: broken
  request:
    method: GET
    url: 'api.example.com/%s'
"#,
    )
    .unwrap();
    let checker = Checker::with_transport(registry, transport);

    let err = checker.check("broken", "abc123").unwrap_err();
    assert!(matches!(err, CheckError::Template { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_repeated_checks_are_independent() {
    let (transport, calls, last_request) = MockTransport::new(Reply::Status(200));
    let checker = Checker::with_transport(registry(), transport);

    checker.check("svc", "first").unwrap();
    checker.check("svc", "second").unwrap();
    checker.check("svc", "first").unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // The stored template is untouched; the third render reproduced the
    // first result.
    let request = last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.url, "https://api.example.com/first");
}
