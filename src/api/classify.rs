//! Response classification.
//!
//! The service reports long-running conversions through plain HTTP status
//! codes plus a few body fields. This module turns a [`RawResponse`] into
//! exactly one [`Outcome`] (or none) with two steps:
//!
//! 1. **Route**: pick the most specific [`StatusKey`] the endpoint handles.
//!    An exact code beats a status class, which beats the `2xx/3xx`
//!    aggregate. No match means the response is dropped.
//! 2. **Refine**: inspect the body for that route to choose between
//!    ready, failed, processing, error and down.
//!
//! # Routes
//!
//! | Endpoint | Route     | Outcome                                              |
//! |----------|-----------|------------------------------------------------------|
//! | content  | 2xx/3xx   | ready / failed / processing by `content.ready`/`failed` |
//! | content  | 4xx       | error(`error`)                                       |
//! | content  | 5xx       | down(`error`)                                        |
//! | dzi      | 2xx/3xx   | ready(`dzi`)                                         |
//! | dzi      | 404       | processing if `retryAfter`, else failed              |
//! | dzi      | 4xx       | error(`error`)                                       |
//! | dzi      | 5xx       | down(`error`)                                        |
//!
//! A dzi 404 without `retryAfter` is also what the service returns for an
//! identifier it does not know. The two cases cannot be told apart from the
//! response, so both are reported as `Failed`.

use serde::Serialize;

use super::response::{ContentInfo, DziInfo, RawResponse};

// =============================================================================
// Status Routing
// =============================================================================

/// A status pattern an endpoint can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKey {
    /// One exact status code, e.g. 404
    Exact(u16),

    /// A whole status class, e.g. `Class(4)` for 4xx
    Class(u16),

    /// Any 2xx or 3xx status
    SuccessOrRedirect,
}

/// Routes handled by the content endpoint.
pub const CONTENT_ROUTES: &[StatusKey] = &[
    StatusKey::SuccessOrRedirect,
    StatusKey::Class(4),
    StatusKey::Class(5),
];

/// Routes handled by the dzi endpoint.
pub const DZI_ROUTES: &[StatusKey] = &[
    StatusKey::SuccessOrRedirect,
    StatusKey::Exact(404),
    StatusKey::Class(4),
    StatusKey::Class(5),
];

/// Pick the key in `keys` that handles `status`.
///
/// Precedence is exact code, then status class, then the `2xx/3xx`
/// aggregate. Order within `keys` does not matter. Returns `None` when no
/// key applies.
pub fn resolve_status(status: u16, keys: &[StatusKey]) -> Option<StatusKey> {
    let class = status / 100;

    let exact = StatusKey::Exact(status);
    if keys.contains(&exact) {
        return Some(exact);
    }

    let by_class = StatusKey::Class(class);
    if keys.contains(&by_class) {
        return Some(by_class);
    }

    if (class == 2 || class == 3) && keys.contains(&StatusKey::SuccessOrRedirect) {
        return Some(StatusKey::SuccessOrRedirect);
    }

    None
}

// =============================================================================
// Outcomes
// =============================================================================

/// Payload-free discriminant of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// The requested info is available
    Ready,

    /// Conversion failed (for dzi: or the reference is unknown)
    Failed,

    /// Conversion is still running; poll again later
    Processing,

    /// The request was rejected as malformed
    Error,

    /// The service is unavailable
    Down,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Ready => "ready",
            OutcomeKind::Failed => "failed",
            OutcomeKind::Processing => "processing",
            OutcomeKind::Error => "error",
            OutcomeKind::Down => "down",
        }
    }
}

/// Result of classifying one response.
///
/// * `R` - payload of a ready outcome
/// * `F` - payload of a failed outcome
/// * `P` - payload of a processing outcome
///
/// Error and down carry the body's `error` message, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "payload", rename_all = "lowercase")]
pub enum Outcome<R, F, P> {
    Ready(R),
    Failed(F),
    Processing(P),
    Error(Option<String>),
    Down(Option<String>),
}

/// Outcome of a content request; every branch but error/down carries the content.
pub type ContentOutcome = Outcome<ContentInfo, ContentInfo, ContentInfo>;

/// Outcome of a dzi request; failed and processing carry nothing.
pub type DziOutcome = Outcome<DziInfo, (), ()>;

impl<R, F, P> Outcome<R, F, P> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Ready(_) => OutcomeKind::Ready,
            Outcome::Failed(_) => OutcomeKind::Failed,
            Outcome::Processing(_) => OutcomeKind::Processing,
            Outcome::Error(_) => OutcomeKind::Error,
            Outcome::Down(_) => OutcomeKind::Down,
        }
    }

    /// Transform the ready payload, leaving every other branch as is.
    pub fn map_ready<T>(self, f: impl FnOnce(R) -> T) -> Outcome<T, F, P> {
        match self {
            Outcome::Ready(payload) => Outcome::Ready(f(payload)),
            Outcome::Failed(payload) => Outcome::Failed(payload),
            Outcome::Processing(payload) => Outcome::Processing(payload),
            Outcome::Error(message) => Outcome::Error(message),
            Outcome::Down(message) => Outcome::Down(message),
        }
    }
}

// =============================================================================
// Classifiers
// =============================================================================

/// Classify a response from the content endpoint.
pub fn classify_content(resp: &RawResponse) -> Option<ContentOutcome> {
    let outcome = match resolve_status(resp.status, CONTENT_ROUTES)? {
        StatusKey::SuccessOrRedirect => {
            let content = resp.content();
            if content.ready() {
                Outcome::Ready(content)
            } else if content.failed() {
                Outcome::Failed(content)
            } else {
                Outcome::Processing(content)
            }
        }
        StatusKey::Class(4) => Outcome::Error(resp.error()),
        StatusKey::Class(5) => Outcome::Down(resp.error()),
        _ => return None,
    };

    Some(outcome)
}

/// Classify a response from the dzi endpoint.
///
/// A 404 without `retryAfter` is reported as `Failed` even though it may
/// mean the reference is unknown to the service.
pub fn classify_dzi(resp: &RawResponse) -> Option<DziOutcome> {
    let outcome = match resolve_status(resp.status, DZI_ROUTES)? {
        StatusKey::SuccessOrRedirect => Outcome::Ready(resp.dzi()),
        StatusKey::Exact(404) => {
            if resp.has_retry_after() {
                Outcome::Processing(())
            } else {
                Outcome::Failed(())
            }
        }
        StatusKey::Class(4) => Outcome::Error(resp.error()),
        StatusKey::Class(5) => Outcome::Down(resp.error()),
        _ => return None,
    };

    Some(outcome)
}
