use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::Transport;
use crate::api::{RawResponse, RequestTarget};
use crate::error::TransportError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("zoomit/", env!("CARGO_PKG_VERSION"));

/// HTTP implementation of [`Transport`].
///
/// Issues a single GET per target. Redirects are not followed: the dzi
/// resource answers a ready DZI with a 301 whose body carries the payload.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with its own client and the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: create_http_client(timeout)?,
        })
    }

    /// Create a transport around an existing client.
    ///
    /// The client should have redirects disabled.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, target: &RequestTarget) -> Result<RawResponse, TransportError> {
        let resp = self.client.get(target.as_str()).send().await?;
        let http_status = resp.status().as_u16();
        let bytes = resp.bytes().await?;

        let body = serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|e| {
            debug!(
                url = %target,
                status = http_status,
                error = %e,
                "Response body is not JSON"
            );
            Value::Null
        });

        // The body's status mirrors the HTTP status and is what the service
        // reports to script callers, so it wins when present.
        let status = body_status(&body).unwrap_or(http_status);

        debug!(url = %target, status, http_status, "Received response");

        Ok(RawResponse::new(status, body))
    }
}

fn body_status(body: &Value) -> Option<u16> {
    body.get("status")
        .and_then(Value::as_u64)
        .and_then(|status| u16::try_from(status).ok())
}

/// Create an HTTP client suitable for the service.
///
/// Redirects are disabled and JSON is requested explicitly.
pub fn create_http_client(timeout: Duration) -> Result<Client, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .redirect(Policy::none())
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(|e| TransportError::Connection(e.to_string()))
}
