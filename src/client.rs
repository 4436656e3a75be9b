//! Client for the deep-zoom web service.
//!
//! The client is the main entry point. For each call it:
//! 1. Builds the request target from the content reference
//! 2. Sends it through the transport, exactly once
//! 3. Classifies the response
//! 4. Either returns the outcome (`fetch_*`) or invokes the matching
//!    callback (`get_*`)
//!
//! No state is kept between calls. Retrying on `processing` or `down` is up
//! to the caller.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{
    build_target, classify_content, classify_dzi, thumbnail_reference, ApiBase, CallContext,
    ContentHandlers, ContentOutcome, ContentReference, DziHandlers, DziOutcome, Endpoint,
    Handlers, Outcome, RawResponse, ThumbnailHandlers, ThumbnailInfo, ThumbnailOutcome,
};
use crate::error::TransportError;
use crate::transport::Transport;

// =============================================================================
// Classified Response
// =============================================================================

/// A response together with its classification.
///
/// `outcome` is `None` when no route handles the response status.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified<O> {
    pub outcome: Option<O>,
    pub response: RawResponse,
}

impl<R, F, P> Classified<Outcome<R, F, P>>
where
    R: Serialize,
    F: Serialize,
    P: Serialize,
{
    /// Summary as a JSON object:
    /// `{"outcome", "payload", "status", "retryAfter"}`.
    ///
    /// `outcome` and `payload` are `null` for an unclassified status.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut summary = match &self.outcome {
            Some(outcome) => serde_json::to_value(outcome)?,
            None => json!({ "outcome": null, "payload": null }),
        };

        if let Value::Object(fields) = &mut summary {
            fields.insert("status".to_string(), json!(self.response.status));
            fields.insert(
                "retryAfter".to_string(),
                json!(self.response.retry_after_secs()),
            );
        }

        Ok(summary)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for content, DZI and thumbnail info.
///
/// # Type Parameters
///
/// * `T` - The transport used to reach the service
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use zoomit::{ApiBase, ContentReference, Handlers, HttpTransport, ZoomitClient};
///
/// let transport = HttpTransport::new(Duration::from_secs(30))?;
/// let client = ZoomitClient::new(transport, ApiBase::default());
///
/// let handlers = Handlers::new(|content, _ctx| println!("ready: {:?}", content.share_url()))
///     .on_processing(|content, _ctx| println!("progress: {:?}", content.progress()));
///
/// client
///     .get_content_info(&ContentReference::identifier("8"), handlers)
///     .await?;
/// ```
pub struct ZoomitClient<T: Transport> {
    transport: Arc<T>,
    base: ApiBase,
}

impl<T: Transport> ZoomitClient<T> {
    /// Create a client sending requests under `base` through `transport`.
    pub fn new(transport: T, base: ApiBase) -> Self {
        Self {
            transport: Arc::new(transport),
            base,
        }
    }

    /// The API root requests are sent to.
    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // =========================================================================
    // Outcome-returning API
    // =========================================================================

    /// Fetch and classify content info.
    pub async fn fetch_content_info(
        &self,
        reference: &ContentReference,
    ) -> Result<Classified<ContentOutcome>, TransportError> {
        let response = self.request(Endpoint::Content, reference).await?;
        let outcome = classify_content(&response);
        Ok(Classified { outcome, response })
    }

    /// Fetch and classify DZI info.
    pub async fn fetch_dzi_info(
        &self,
        reference: &ContentReference,
    ) -> Result<Classified<DziOutcome>, TransportError> {
        let response = self.request(Endpoint::Dzi, reference).await?;
        let outcome = classify_dzi(&response);
        Ok(Classified { outcome, response })
    }

    /// Fetch and classify thumbnail info.
    ///
    /// Queries the dzi resource with the thumbnail locator and derives the
    /// thumbnail URLs from the returned DZI.
    pub async fn fetch_thumbnail_info(
        &self,
        reference: &ContentReference,
    ) -> Result<Classified<ThumbnailOutcome>, TransportError> {
        let thumbnail = thumbnail_reference(reference);
        let response = self.request(Endpoint::Dzi, &thumbnail).await?;
        let outcome = classify_dzi(&response)
            .map(|outcome| outcome.map_ready(|dzi| ThumbnailInfo::from_dzi(&dzi)));
        Ok(Classified { outcome, response })
    }

    // =========================================================================
    // Callback API
    // =========================================================================

    /// Fetch content info and invoke the matching callback.
    ///
    /// - `ready`, `failed`, `processing` receive the content info
    /// - `error` (4xx) and `down` (5xx) receive the service's message
    pub async fn get_content_info(
        &self,
        reference: &ContentReference,
        mut handlers: ContentHandlers,
    ) -> Result<(), TransportError> {
        let Classified { outcome, response } = self.fetch_content_info(reference).await?;
        deliver(outcome, &mut handlers, reference, Endpoint::Content, &response);
        Ok(())
    }

    /// Fetch DZI info and invoke the matching callback.
    ///
    /// - `ready` receives the DZI info
    /// - `failed` and `processing` receive nothing; a 404 with `retryAfter`
    ///   is processing, a 404 without it is failed
    /// - `error` (other 4xx) and `down` (5xx) receive the service's message
    ///
    /// An identifier the service does not know also produces a plain 404 and
    /// is therefore reported as failed.
    pub async fn get_dzi_info(
        &self,
        reference: &ContentReference,
        mut handlers: DziHandlers,
    ) -> Result<(), TransportError> {
        let Classified { outcome, response } = self.fetch_dzi_info(reference).await?;
        deliver(outcome, &mut handlers, reference, Endpoint::Dzi, &response);
        Ok(())
    }

    /// Fetch thumbnail info and invoke the matching callback.
    ///
    /// Callbacks behave as for [`ZoomitClient::get_dzi_info`], except that
    /// `ready` receives the derived [`ThumbnailInfo`]. The context carries
    /// the reference as given, not the rewritten thumbnail locator.
    pub async fn get_thumbnail_info(
        &self,
        reference: &ContentReference,
        mut handlers: ThumbnailHandlers,
    ) -> Result<(), TransportError> {
        let Classified { outcome, response } = self.fetch_thumbnail_info(reference).await?;
        deliver(outcome, &mut handlers, reference, Endpoint::Dzi, &response);
        Ok(())
    }

    async fn request(
        &self,
        endpoint: Endpoint,
        reference: &ContentReference,
    ) -> Result<RawResponse, TransportError> {
        let target = build_target(&self.base, endpoint, reference);
        debug!(%endpoint, %reference, url = %target, "Sending request");
        self.transport.send(&target).await
    }
}

impl<T: Transport> Clone for ZoomitClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base: self.base.clone(),
        }
    }
}

fn deliver<R, F, P>(
    outcome: Option<Outcome<R, F, P>>,
    handlers: &mut Handlers<R, F, P>,
    reference: &ContentReference,
    endpoint: Endpoint,
    response: &RawResponse,
) {
    let Some(outcome) = outcome else {
        debug!(%endpoint, status = response.status, "Unclassified status, no callback invoked");
        return;
    };

    let kind = outcome.kind();
    let ctx = CallContext {
        reference,
        endpoint,
        response,
    };

    if handlers.dispatch(outcome, &ctx) {
        debug!(%endpoint, outcome = kind.as_str(), "Invoked callback");
    } else {
        debug!(%endpoint, outcome = kind.as_str(), "No callback registered for outcome");
    }
}
