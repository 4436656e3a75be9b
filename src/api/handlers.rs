//! Outcome callbacks.
//!
//! Callers register one callback per outcome they care about. Only the ready
//! callback is required; an outcome whose callback is missing is dropped.
//!
//! Every callback receives its outcome's payload plus a [`CallContext`]
//! holding the caller's original reference and the raw response, for
//! inspection and debugging.
//!
//! | Callback     | Content payload      | DZI payload          | Thumbnail payload    |
//! |--------------|----------------------|----------------------|----------------------|
//! | `ready`      | `ContentInfo`        | `DziInfo`            | `ThumbnailInfo`      |
//! | `failed`     | `ContentInfo`        | `()`                 | `()`                 |
//! | `processing` | `ContentInfo`        | `()`                 | `()`                 |
//! | `error`      | `Option<String>`     | `Option<String>`     | `Option<String>`     |
//! | `down`       | `Option<String>`     | `Option<String>`     | `Option<String>`     |

use std::fmt;

use super::classify::Outcome;
use super::reference::ContentReference;
use super::request::Endpoint;
use super::response::{ContentInfo, DziInfo, RawResponse};
use super::thumbnail::ThumbnailInfo;

/// Everything a callback may want to know about the call besides its payload.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    /// The reference the caller asked about
    pub reference: &'a ContentReference,

    /// The resource that was queried
    pub endpoint: Endpoint,

    /// The response the outcome was derived from
    pub response: &'a RawResponse,
}

/// A boxed outcome callback.
pub type Callback<T> = Box<dyn FnMut(T, &CallContext<'_>) + Send>;

/// Callbacks for each outcome of a request.
///
/// * `R` - payload of the ready callback
/// * `F` - payload of the failed callback
/// * `P` - payload of the processing callback
pub struct Handlers<R, F, P> {
    ready: Callback<R>,
    failed: Option<Callback<F>>,
    processing: Option<Callback<P>>,
    error: Option<Callback<Option<String>>>,
    down: Option<Callback<Option<String>>>,
}

/// Callbacks for a content request.
pub type ContentHandlers = Handlers<ContentInfo, ContentInfo, ContentInfo>;

/// Callbacks for a dzi request.
pub type DziHandlers = Handlers<DziInfo, (), ()>;

/// Callbacks for a thumbnail request.
pub type ThumbnailHandlers = Handlers<ThumbnailInfo, (), ()>;

impl<R, F, P> Handlers<R, F, P> {
    /// Create a handler set with the required ready callback.
    pub fn new(ready: impl FnMut(R, &CallContext<'_>) + Send + 'static) -> Self {
        Self {
            ready: Box::new(ready),
            failed: None,
            processing: None,
            error: None,
            down: None,
        }
    }

    /// Called when processing failed.
    pub fn on_failed(mut self, failed: impl FnMut(F, &CallContext<'_>) + Send + 'static) -> Self {
        self.failed = Some(Box::new(failed));
        self
    }

    /// Called while processing is still in progress.
    pub fn on_processing(
        mut self,
        processing: impl FnMut(P, &CallContext<'_>) + Send + 'static,
    ) -> Self {
        self.processing = Some(Box::new(processing));
        self
    }

    /// Alias for [`Handlers::on_processing`].
    pub fn on_progress(self, progress: impl FnMut(P, &CallContext<'_>) + Send + 'static) -> Self {
        self.on_processing(progress)
    }

    /// Called when the request was rejected (4xx), with the service's message.
    pub fn on_error(
        mut self,
        error: impl FnMut(Option<String>, &CallContext<'_>) + Send + 'static,
    ) -> Self {
        self.error = Some(Box::new(error));
        self
    }

    /// Called when the service is unavailable (5xx), with the service's message.
    pub fn on_down(
        mut self,
        down: impl FnMut(Option<String>, &CallContext<'_>) + Send + 'static,
    ) -> Self {
        self.down = Some(Box::new(down));
        self
    }

    /// Invoke the callback matching `outcome`.
    ///
    /// Returns `false` if that callback was not registered.
    pub fn dispatch(&mut self, outcome: Outcome<R, F, P>, ctx: &CallContext<'_>) -> bool {
        match outcome {
            Outcome::Ready(payload) => {
                (self.ready)(payload, ctx);
                true
            }
            Outcome::Failed(payload) => invoke(&mut self.failed, payload, ctx),
            Outcome::Processing(payload) => invoke(&mut self.processing, payload, ctx),
            Outcome::Error(message) => invoke(&mut self.error, message, ctx),
            Outcome::Down(message) => invoke(&mut self.down, message, ctx),
        }
    }
}

fn invoke<T>(callback: &mut Option<Callback<T>>, payload: T, ctx: &CallContext<'_>) -> bool {
    match callback {
        Some(callback) => {
            callback(payload, ctx);
            true
        }
        None => false,
    }
}

impl<R, F, P> fmt::Debug for Handlers<R, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("failed", &self.failed.is_some())
            .field("processing", &self.processing.is_some())
            .field("error", &self.error.is_some())
            .field("down", &self.down.is_some())
            .finish_non_exhaustive()
    }
}
