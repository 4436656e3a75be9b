//! # zoomit
//!
//! Client for the Zoom.it deep-zoom web service.
//!
//! The service converts images into Deep Zoom pyramids asynchronously. Asking
//! about a piece of content therefore yields one of several states, reported
//! through HTTP status codes and a few body fields. This library builds the
//! requests, sends them, and classifies each response into a single
//! [`Outcome`]: ready, failed, processing, error or down.
//!
//! ## Features
//!
//! - **Typed outcomes**: status routing with exact-code, status-class and
//!   `2xx/3xx` precedence, refined per resource
//! - **Callbacks or values**: `get_*` invokes per-outcome callbacks,
//!   `fetch_*` returns the outcome
//! - **Thumbnails**: thumbnail URLs derived from the thumbnail DZI
//! - **Pluggable transport**: a `reqwest` transport is included; anything
//!   implementing [`Transport`] can stand in
//!
//! ## Architecture
//!
//! - [`api`] - references, request targets, responses, classification, callbacks
//! - [`transport`] - transport trait and HTTP implementation
//! - [`client`] - the client tying them together
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use zoomit::{ApiBase, ContentReference, Handlers, HttpTransport, ZoomitClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new(Duration::from_secs(30))?;
//!     let client = ZoomitClient::new(transport, ApiBase::default());
//!
//!     let handlers = Handlers::new(|dzi: zoomit::DziInfo, _ctx: &zoomit::CallContext<'_>| {
//!         println!("DZI at {}", dzi.url())
//!     })
//!     .on_processing(|(), _ctx| println!("still converting"))
//!     .on_failed(|(), _ctx| println!("conversion failed or unknown id"));
//!
//!     client
//!         .get_dzi_info(&ContentReference::source_url("http://example.com/a.jpg"), handlers)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export commonly used types
pub use api::{
    build_target, classify_content, classify_dzi, resolve_status, thumbnail_reference, ApiBase,
    CallContext, Callback, ContentHandlers, ContentInfo, ContentOutcome, ContentReference,
    DziHandlers, DziInfo, DziOutcome, Endpoint, Handlers, Outcome, OutcomeKind, RawResponse,
    RequestTarget, StatusKey, ThumbnailHandlers, ThumbnailInfo, ThumbnailOutcome,
    DEFAULT_API_PATH,
};
pub use client::{Classified, ZoomitClient};
pub use config::{Cli, Command, ReferenceArgs};
pub use error::{ConfigError, ReferenceError, TransportError};
pub use transport::{create_http_client, HttpTransport, Transport};
