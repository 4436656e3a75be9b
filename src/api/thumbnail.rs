//! Thumbnail info.
//!
//! The service has no thumbnail resource of its own. A thumbnail is requested
//! from the dzi resource using a special `zoomit://thumbnail/` locator that
//! wraps the source URL, and the service answers with the DZI of a small
//! rendition of the image.
//!
//! Thumbnail pyramids are assumed to have a fixed shape: a 1024px image cut
//! into 1024px PNG tiles with no overlap. Every level then fits in a single
//! tile, so level `L` is the image at `2^L` pixels and its only tile is
//! `<base>_files/<L>/0_0.png`. The service does not document this; it is an
//! observed layout.

use std::collections::BTreeMap;

use serde::Serialize;

use super::classify::Outcome;
use super::reference::ContentReference;
use super::response::DziInfo;

/// Tile size of a thumbnail pyramid in pixels.
pub const THUMBNAIL_TILE_SIZE: u32 = 1024;

/// Tile overlap of a thumbnail pyramid in pixels.
pub const THUMBNAIL_TILE_OVERLAP: u32 = 0;

/// Tile image format of a thumbnail pyramid.
pub const THUMBNAIL_TILE_FORMAT: &str = "png";

/// Highest level of a thumbnail pyramid (`2^10 = 1024`).
pub const THUMBNAIL_MAX_LEVEL: u32 = 10;

/// Scheme and path of the locator that asks the dzi resource for a thumbnail.
pub const THUMBNAIL_LOCATOR_PREFIX: &str = "zoomit://thumbnail/?url=";

/// Outcome of a thumbnail request; failed and processing carry nothing.
pub type ThumbnailOutcome = Outcome<ThumbnailInfo, (), ()>;

/// Rewrite a reference so the dzi resource answers with the thumbnail.
///
/// Source URLs are wrapped in the thumbnail locator. Identifiers pass through
/// unchanged.
pub fn thumbnail_reference(reference: &ContentReference) -> ContentReference {
    match reference {
        ContentReference::Identifier(id) => ContentReference::Identifier(id.clone()),
        ContentReference::SourceUrl(url) => ContentReference::SourceUrl(format!(
            "{}{}",
            THUMBNAIL_LOCATOR_PREFIX,
            urlencoding::encode(url)
        )),
    }
}

/// Thumbnail images by edge length.
///
/// Maps each size `1, 2, 4, ..., 1024` to the URL of the single tile that
/// holds the thumbnail at that size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ThumbnailInfo {
    sizes: BTreeMap<u32, String>,
}

impl ThumbnailInfo {
    /// Derive thumbnail URLs from the DZI info of a thumbnail pyramid.
    pub fn from_dzi(dzi: &DziInfo) -> Self {
        let base = dzi.files_base();
        let sizes = (0..=THUMBNAIL_MAX_LEVEL)
            .map(|level| {
                (
                    1u32 << level,
                    format!("{}{}/0_0.{}", base, level, THUMBNAIL_TILE_FORMAT),
                )
            })
            .collect();

        Self { sizes }
    }

    /// URL of the thumbnail with the given edge length, if one exists.
    pub fn url_for(&self, size: u32) -> Option<&str> {
        self.sizes.get(&size).map(String::as_str)
    }

    /// The largest thumbnail as `(size, url)`.
    pub fn largest(&self) -> Option<(u32, &str)> {
        self.sizes
            .iter()
            .next_back()
            .map(|(size, url)| (*size, url.as_str()))
    }

    /// All thumbnails as `(size, url)`, smallest first.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.sizes.iter().map(|(size, url)| (*size, url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
