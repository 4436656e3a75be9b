//! HTTP transport tests against a mock server.
//!
//! Tests verify:
//! - Request paths and query strings reach the server as built
//! - Redirect responses are classified, not followed
//! - The body `status` field takes precedence over the HTTP status
//! - Non-JSON bodies and unreachable servers are handled

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zoomit::{
    ApiBase, ContentReference, HttpTransport, Outcome, OutcomeKind, TransportError, ZoomitClient,
};

async fn client_for(server: &MockServer) -> ZoomitClient<HttpTransport> {
    let base = ApiBase::new(format!("{}/", server.uri())).unwrap();
    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    ZoomitClient::new(transport, base)
}

#[tokio::test]
async fn test_content_by_identifier_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/content/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "content": { "id": "abc", "ready": true, "shareUrl": "http://zoom.it/abc" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let classified = client_for(&server)
        .await
        .fetch_content_info(&ContentReference::identifier("abc"))
        .await
        .unwrap();

    match classified.outcome {
        Some(Outcome::Ready(content)) => {
            assert_eq!(content.share_url(), Some("http://zoom.it/abc"));
        }
        other => panic!("expected ready, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dzi_redirect_is_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/dzi/"))
        .and(query_param("url", "http://x/y.jpg"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", "http://cache.zoom.it/content/8.dzi")
                .set_body_json(json!({
                    "status": 301,
                    "dzi": { "url": "http://cache.zoom.it/content/8.dzi" }
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let classified = client_for(&server)
        .await
        .fetch_dzi_info(&ContentReference::source_url("http://x/y.jpg"))
        .await
        .unwrap();

    assert_eq!(classified.response.status, 301);
    match classified.outcome {
        Some(Outcome::Ready(dzi)) => assert_eq!(dzi.url(), "http://cache.zoom.it/content/8.dzi"),
        other => panic!("expected ready, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dzi_in_progress_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/dzi/8"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "status": 404, "retryAfter": 5 })),
        )
        .mount(&server)
        .await;

    let classified = client_for(&server)
        .await
        .fetch_dzi_info(&ContentReference::identifier("8"))
        .await
        .unwrap();

    assert_eq!(classified.outcome, Some(Outcome::Processing(())));
    assert_eq!(classified.response.retry_after_secs(), Some(5));
}

#[tokio::test]
async fn test_body_status_takes_precedence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/content/8"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": 503, "error": "down" })),
        )
        .mount(&server)
        .await;

    let classified = client_for(&server)
        .await
        .fetch_content_info(&ContentReference::identifier("8"))
        .await
        .unwrap();

    assert_eq!(classified.response.status, 503);
    assert_eq!(classified.outcome, Some(Outcome::Down(Some("down".to_string()))));
}

#[tokio::test]
async fn test_non_json_body_uses_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/content/8"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let classified = client_for(&server)
        .await
        .fetch_content_info(&ContentReference::identifier("8"))
        .await
        .unwrap();

    assert_eq!(classified.response.status, 502);
    assert_eq!(classified.response.body, serde_json::Value::Null);
    assert_eq!(
        classified.outcome.map(|outcome| outcome.kind()),
        Some(OutcomeKind::Down)
    );
}

#[tokio::test]
async fn test_unreachable_server() {
    // Port 9 (discard) is not expected to be listening.
    let base = ApiBase::new("http://127.0.0.1:9/").unwrap();
    let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
    let client = ZoomitClient::new(transport, base);

    let result = client
        .fetch_content_info(&ContentReference::identifier("8"))
        .await;

    assert!(matches!(
        result,
        Err(TransportError::Connection(_)) | Err(TransportError::Timeout(_))
    ));
}
