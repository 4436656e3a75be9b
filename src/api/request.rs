//! Request target construction.
//!
//! The service exposes two resources per piece of content, both under the
//! versioned `v1/` prefix of the API root:
//!
//! ```text
//! <api>/v1/content/<id>            by identifier
//! <api>/v1/content/?url=<source>   by source URL
//! <api>/v1/dzi/<id>
//! <api>/v1/dzi/?url=<source>
//! ```
//!
//! Building a target is pure string assembly and cannot fail. Bad input is
//! reported by the service and surfaces as an `error` outcome.

use std::fmt;

use serde::Serialize;
use url::Url;

use super::reference::ContentReference;
use crate::error::ConfigError;

/// Default root of the web API.
pub const DEFAULT_API_PATH: &str = "http://api.zoom.it/";

/// API version segment prefixed to every resource path.
pub const API_VERSION: &str = "v1";

// =============================================================================
// Endpoint
// =============================================================================

/// The two resources the service exposes for a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Content info: processing state plus share/embed metadata
    Content,

    /// Deep Zoom descriptor info for the content's image pyramid
    Dzi,
}

impl Endpoint {
    /// Path segment naming this resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Content => "content",
            Endpoint::Dzi => "dzi",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// API Base
// =============================================================================

/// Validated root of the web API.
///
/// Must be an absolute URL ending in `/`. Overridable so a staging
/// deployment or a local mock can stand in for the production service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Validate and wrap an API root.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let path = path.into();

        Url::parse(&path).map_err(|e| ConfigError::InvalidApiPath {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if !path.ends_with('/') {
            return Err(ConfigError::MissingTrailingSlash(path));
        }

        Ok(Self(path))
    }

    /// The root as a string, always ending in `/`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self(DEFAULT_API_PATH.to_string())
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Request Target
// =============================================================================

/// Fully-assembled URL of a single service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    endpoint: Endpoint,
    url: String,
}

impl RequestTarget {
    /// Which resource this target addresses.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// The request URL.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Build the request target for `endpoint` and `reference` under `base`.
///
/// Identifiers become a path segment, source URLs the `url` query parameter.
/// Both are percent-encoded first.
pub fn build_target(base: &ApiBase, endpoint: Endpoint, reference: &ContentReference) -> RequestTarget {
    let url = match reference {
        ContentReference::Identifier(id) => format!(
            "{}{}/{}/{}",
            base.as_str(),
            API_VERSION,
            endpoint.as_str(),
            urlencoding::encode(id)
        ),
        ContentReference::SourceUrl(source) => format!(
            "{}{}/{}/?url={}",
            base.as_str(),
            API_VERSION,
            endpoint.as_str(),
            urlencoding::encode(source)
        ),
    };

    RequestTarget { endpoint, url }
}
