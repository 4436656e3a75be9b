//! Transport layer.
//!
//! The classifier never performs I/O itself. A [`Transport`] carries one
//! request target to the service and hands back the single response it got.
//!
//! - [`Transport`] - trait every transport implements
//! - [`HttpTransport`] - `reqwest`-backed implementation

mod http;

pub use http::{create_http_client, HttpTransport, DEFAULT_TIMEOUT_SECS, USER_AGENT};

use async_trait::async_trait;

use crate::api::{RawResponse, RequestTarget};
use crate::error::TransportError;

/// Delivers requests to the service.
///
/// Implementations must produce exactly one response per call and must not
/// retry on their own. Any bookkeeping needed to match the response to the
/// request is released before `send` returns.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response.
    ///
    /// Every response the service returns, whatever its status, is `Ok`.
    /// `Err` means no response arrived.
    async fn send(&self, target: &RequestTarget) -> Result<RawResponse, TransportError>;
}
