//! Content references.
//!
//! Every call to the service names its content in exactly one of two ways:
//! by the short identifier the service assigned, or by the URL of the source
//! image the content was created from.

use std::fmt;

use serde::Serialize;

use crate::error::ReferenceError;

/// Names a piece of content on the service.
///
/// An enum rather than a pair of options so that "both" and "neither" cannot
/// be represented. Use [`ContentReference::from_parts`] when the two halves
/// arrive separately (e.g. from CLI flags).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentReference {
    /// Service-assigned identifier (e.g. `"8"` or `"abc"`)
    Identifier(String),

    /// URL of the source image
    SourceUrl(String),
}

impl ContentReference {
    /// Reference content by its service identifier.
    pub fn identifier(id: impl Into<String>) -> Self {
        ContentReference::Identifier(id.into())
    }

    /// Reference content by the URL of its source image.
    pub fn source_url(url: impl Into<String>) -> Self {
        ContentReference::SourceUrl(url.into())
    }

    /// Build a reference from an optional identifier and an optional URL.
    ///
    /// Exactly one must be present and non-empty.
    pub fn from_parts(
        identifier: Option<String>,
        url: Option<String>,
    ) -> Result<Self, ReferenceError> {
        match (identifier, url) {
            (Some(identifier), Some(url)) => Err(ReferenceError::Ambiguous { identifier, url }),
            (None, None) => Err(ReferenceError::Missing),
            (Some(id), None) if id.is_empty() => Err(ReferenceError::Empty),
            (None, Some(url)) if url.is_empty() => Err(ReferenceError::Empty),
            (Some(id), None) => Ok(ContentReference::Identifier(id)),
            (None, Some(url)) => Ok(ContentReference::SourceUrl(url)),
        }
    }

    /// The identifier, if this reference uses one.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            ContentReference::Identifier(id) => Some(id),
            ContentReference::SourceUrl(_) => None,
        }
    }

    /// The source URL, if this reference uses one.
    pub fn as_source_url(&self) -> Option<&str> {
        match self {
            ContentReference::Identifier(_) => None,
            ContentReference::SourceUrl(url) => Some(url),
        }
    }
}

impl fmt::Display for ContentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentReference::Identifier(id) => write!(f, "id:{}", id),
            ContentReference::SourceUrl(url) => write!(f, "url:{}", url),
        }
    }
}
