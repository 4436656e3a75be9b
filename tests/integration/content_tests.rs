//! Content info integration tests.
//!
//! Tests verify:
//! - 2xx/3xx responses fire exactly one of ready, failed, processing
//! - 4xx fires error and 5xx fires down with the service's message
//! - Unhandled statuses and missing callbacks fire nothing
//! - Callbacks see the original reference and the raw response

use serde_json::json;

use zoomit::{ContentReference, Handlers};

use super::test_utils::{client_for, MockTransport, Recorder};

// =============================================================================
// Success and Redirect
// =============================================================================

#[tokio::test]
async fn test_content_ready_by_identifier() {
    let transport = MockTransport::responding(
        200,
        json!({ "status": 200, "content": { "ready": true, "image": "x" } }),
    );
    let client = client_for(&transport);
    let recorder = Recorder::new();

    client
        .get_content_info(&ContentReference::identifier("abc"), recorder.content_handlers())
        .await
        .unwrap();

    let invocation = recorder.single();
    assert_eq!(invocation.callback, "ready");
    assert_eq!(invocation.payload, json!({ "ready": true, "image": "x" }));
    assert_eq!(invocation.reference, ContentReference::identifier("abc"));
    assert_eq!(invocation.status, 200);

    assert_eq!(transport.request_count(), 1);
    assert_eq!(transport.targets(), vec!["http://api.zoom.it/v1/content/abc"]);
}

#[tokio::test]
async fn test_content_flags_survive_mistyped_fields() {
    let content = json!({
        "ready": true,
        "id": 8,
        "image": "x",
        "dzi": { "url": "http://x/8.dzi", "width": 1024.5 }
    });
    let transport =
        MockTransport::responding(200, json!({ "status": 200, "content": content.clone() }));
    let recorder = Recorder::new();

    client_for(&transport)
        .get_content_info(&ContentReference::identifier("8"), recorder.content_handlers())
        .await
        .unwrap();

    let invocation = recorder.single();
    assert_eq!(invocation.callback, "ready");
    assert_eq!(invocation.payload, content);
}

#[tokio::test]
async fn test_content_failed_with_mistyped_dzi() {
    let transport = MockTransport::responding(
        200,
        json!({ "status": 200, "content": { "failed": true, "dzi": { "url": "u.dzi", "width": 1024.5 } } }),
    );
    let recorder = Recorder::new();

    client_for(&transport)
        .get_content_info(&ContentReference::identifier("8"), recorder.content_handlers())
        .await
        .unwrap();

    assert_eq!(recorder.callbacks(), vec!["failed"]);
}

#[tokio::test]
async fn test_content_by_url_redirect_status() {
    // Lookups by URL answer with 301 rather than 200.
    let transport = MockTransport::responding(
        301,
        json!({ "status": 301, "content": { "ready": false, "failed": true, "id": "q" } }),
    );
    let client = client_for(&transport);
    let recorder = Recorder::new();
    let reference = ContentReference::source_url("http://x/y.jpg");

    client
        .get_content_info(&reference, recorder.content_handlers())
        .await
        .unwrap();

    let invocation = recorder.single();
    assert_eq!(invocation.callback, "failed");
    assert_eq!(invocation.payload["id"], "q");
    assert_eq!(invocation.reference, reference);
    assert_eq!(
        transport.targets(),
        vec!["http://api.zoom.it/v1/content/?url=http%3A%2F%2Fx%2Fy.jpg"]
    );
}

#[tokio::test]
async fn test_content_exactly_one_of_ready_failed_processing() {
    let cases = [
        (json!({ "ready": true }), "ready"),
        (json!({ "failed": true }), "failed"),
        (json!({ "ready": false, "failed": false, "progress": 0.25 }), "processing"),
        (json!({}), "processing"),
    ];

    for status in [200, 201, 299, 300, 301, 399] {
        for (content, expected) in &cases {
            let transport =
                MockTransport::responding(status, json!({ "status": status, "content": content }));
            let recorder = Recorder::new();

            client_for(&transport)
                .get_content_info(&ContentReference::identifier("8"), recorder.content_handlers())
                .await
                .unwrap();

            assert_eq!(
                recorder.callbacks(),
                vec![*expected],
                "status {} with content {}",
                status,
                content
            );
        }
    }
}

#[tokio::test]
async fn test_content_processing_carries_content() {
    let transport = MockTransport::responding(
        200,
        json!({ "status": 200, "content": { "progress": 0.5 } }),
    );
    let recorder = Recorder::new();

    client_for(&transport)
        .get_content_info(&ContentReference::identifier("8"), recorder.content_handlers())
        .await
        .unwrap();

    let invocation = recorder.single();
    assert_eq!(invocation.callback, "processing");
    assert_eq!(invocation.payload["progress"], 0.5);
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_content_4xx_fires_error() {
    for status in [400, 404, 410, 499] {
        let transport = MockTransport::responding(
            status,
            json!({ "status": status, "error": "Malformed URL" }),
        );
        let recorder = Recorder::new();

        client_for(&transport)
            .get_content_info(&ContentReference::source_url("bogus"), recorder.content_handlers())
            .await
            .unwrap();

        let invocation = recorder.single();
        assert_eq!(invocation.callback, "error");
        assert_eq!(invocation.payload, json!("Malformed URL"));
    }
}

#[tokio::test]
async fn test_content_5xx_fires_down() {
    for status in [500, 502, 503, 599] {
        let transport =
            MockTransport::responding(status, json!({ "status": status, "error": "down" }));
        let recorder = Recorder::new();

        client_for(&transport)
            .get_content_info(&ContentReference::identifier("8"), recorder.content_handlers())
            .await
            .unwrap();

        let invocation = recorder.single();
        assert_eq!(invocation.callback, "down");
        assert_eq!(invocation.payload, json!("down"));
        assert_eq!(invocation.status, status);
    }
}

#[tokio::test]
async fn test_content_error_without_message() {
    let transport = MockTransport::responding(503, serde_json::Value::Null);
    let recorder = Recorder::new();

    client_for(&transport)
        .get_content_info(&ContentReference::identifier("8"), recorder.content_handlers())
        .await
        .unwrap();

    let invocation = recorder.single();
    assert_eq!(invocation.callback, "down");
    assert_eq!(invocation.payload, serde_json::Value::Null);
}

// =============================================================================
// Silent Drops
// =============================================================================

#[tokio::test]
async fn test_content_unhandled_status_fires_nothing() {
    for status in [100, 199, 600] {
        let transport = MockTransport::responding(status, json!({ "status": status }));
        let recorder = Recorder::new();

        client_for(&transport)
            .get_content_info(&ContentReference::identifier("8"), recorder.content_handlers())
            .await
            .unwrap();

        assert!(recorder.invocations().is_empty(), "status {}", status);
    }
}

#[tokio::test]
async fn test_content_missing_callback_fires_nothing() {
    let transport = MockTransport::responding(503, json!({ "status": 503, "error": "down" }));

    // Only ready is registered; the down outcome has nowhere to go.
    let handlers = Handlers::new(|_content, _ctx| panic!("ready must not fire"));

    client_for(&transport)
        .get_content_info(&ContentReference::identifier("8"), handlers)
        .await
        .unwrap();

    assert_eq!(transport.request_count(), 1);
}

// =============================================================================
// Transport Failure and Repeatability
// =============================================================================

#[tokio::test]
async fn test_transport_failure_fires_nothing() {
    let transport = MockTransport::unreachable();
    let recorder = Recorder::new();

    let result = client_for(&transport)
        .get_content_info(&ContentReference::identifier("8"), recorder.content_handlers())
        .await;

    assert!(result.is_err());
    assert!(recorder.invocations().is_empty());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_same_response_same_outcome() {
    let transport = MockTransport::responding(
        200,
        json!({ "status": 200, "content": { "failed": true, "id": "8" } }),
    );
    let client = client_for(&transport);
    let first = Recorder::new();
    let second = Recorder::new();

    client
        .get_content_info(&ContentReference::identifier("8"), first.content_handlers())
        .await
        .unwrap();
    client
        .get_content_info(&ContentReference::identifier("8"), second.content_handlers())
        .await
        .unwrap();

    assert_eq!(first.invocations(), second.invocations());
    assert_eq!(transport.request_count(), 2);
}
