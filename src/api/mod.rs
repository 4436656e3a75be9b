//! Service model: what is requested, what comes back, and what it means.
//!
//! # Architecture
//!
//! ```text
//! ContentReference ──► build_target() ──► RequestTarget ──► Transport
//!                                                              │
//!                                                              ▼
//!        Handlers ◄── Outcome ◄── classify_*() ◄────────── RawResponse
//! ```
//!
//! Nothing in this module performs I/O. Classification is a pure function of
//! the response, so the same response always yields the same outcome.

pub mod classify;
pub mod handlers;
pub mod reference;
pub mod request;
pub mod response;
pub mod thumbnail;

pub use classify::{
    classify_content, classify_dzi, resolve_status, ContentOutcome, DziOutcome, Outcome,
    OutcomeKind, StatusKey, CONTENT_ROUTES, DZI_ROUTES,
};
pub use handlers::{
    CallContext, Callback, ContentHandlers, DziHandlers, Handlers, ThumbnailHandlers,
};
pub use reference::ContentReference;
pub use request::{build_target, ApiBase, Endpoint, RequestTarget, API_VERSION, DEFAULT_API_PATH};
pub use response::{ContentInfo, DziInfo, RawResponse};
pub use thumbnail::{
    thumbnail_reference, ThumbnailInfo, ThumbnailOutcome, THUMBNAIL_LOCATOR_PREFIX,
    THUMBNAIL_MAX_LEVEL, THUMBNAIL_TILE_FORMAT, THUMBNAIL_TILE_OVERLAP, THUMBNAIL_TILE_SIZE,
};
