//! Raw service responses and the payloads carried inside them.
//!
//! Every response body is a JSON object with a `status` field mirroring the
//! HTTP status and, depending on the outcome, one of `content`, `dzi` or
//! `error`. An in-progress DZI additionally carries `retryAfter`.
//!
//! Payloads keep the JSON object exactly as the service sent it and read the
//! known fields through accessors. A field with an unexpected type reads as
//! absent without affecting any other field, and a payload that is missing or
//! not an object reads as empty (with a warning). Classification therefore
//! never fails and only ever looks at the fields it routes on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

// =============================================================================
// Raw Response
// =============================================================================

/// One response from the service, exactly as received.
///
/// Produced once per request by the transport and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawResponse {
    /// Service status code (mirrors the HTTP status)
    pub status: u16,

    /// Parsed response body (`Value::Null` if the body was not JSON)
    pub body: Value,
}

impl RawResponse {
    /// Create a response from a status code and parsed body.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// The status class, e.g. 5 for 503.
    pub fn status_class(&self) -> u16 {
        self.status / 100
    }

    /// The `content` payload; empty when missing or not an object.
    pub fn content(&self) -> ContentInfo {
        ContentInfo::from(self.payload("content"))
    }

    /// The `dzi` payload; empty when missing or not an object.
    pub fn dzi(&self) -> DziInfo {
        DziInfo::from(self.payload("dzi"))
    }

    /// The `error` message, if any.
    ///
    /// Non-string values are rendered as JSON text.
    pub fn error(&self) -> Option<String> {
        match self.body.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(message.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// Whether the body carries a non-null `retryAfter` field.
    pub fn has_retry_after(&self) -> bool {
        !matches!(self.body.get("retryAfter"), None | Some(Value::Null))
    }

    /// The suggested delay before polling again, in seconds.
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.body.get("retryAfter").and_then(Value::as_u64)
    }

    fn payload(&self, field: &str) -> Map<String, Value> {
        match self.body.get(field) {
            Some(Value::Object(fields)) => fields.clone(),
            None | Some(Value::Null) => {
                warn!(status = self.status, field, "Response is missing payload");
                Map::new()
            }
            Some(_) => {
                warn!(status = self.status, field, "Payload is not an object");
                Map::new()
            }
        }
    }
}

// =============================================================================
// Field Readers
// =============================================================================

/// JSON truthiness: `false`, `0`, `""` and `null` are false, anything else
/// present is true.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// A pixel count; fractional values are rounded up.
fn pixels(value: Option<&Value>) -> Option<u32> {
    let value = value?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }

    let n = value.as_f64()?;
    if n.is_finite() && n >= 0.0 && n <= f64::from(u32::MAX) {
        Some(n.ceil() as u32)
    } else {
        None
    }
}

// =============================================================================
// Content Info
// =============================================================================

/// Content info as reported by the `content` resource.
///
/// Wraps the `content` object unchanged; it serializes back to exactly what
/// the service sent. At most one of `ready` and `failed` is set; neither
/// means the content is still being processed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentInfo {
    fields: Map<String, Value>,
}

impl ContentInfo {
    /// Wrap a JSON value; anything but an object yields empty content info.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// The image pyramid is ready to view.
    pub fn ready(&self) -> bool {
        truthy(self.fields.get("ready"))
    }

    /// Conversion failed permanently.
    pub fn failed(&self) -> bool {
        truthy(self.fields.get("failed"))
    }

    /// Service identifier. Numeric identifiers are rendered as text.
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Source image URL.
    pub fn url(&self) -> Option<&str> {
        self.text("url")
    }

    /// Conversion progress in `[0, 1]`.
    pub fn progress(&self) -> Option<f64> {
        self.fields.get("progress").and_then(Value::as_f64)
    }

    pub fn share_url(&self) -> Option<&str> {
        self.text("shareUrl")
    }

    pub fn embed_html(&self) -> Option<&str> {
        self.text("embedHtml")
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn attribution_text(&self) -> Option<&str> {
        self.text("attributionText")
    }

    pub fn attribution_url(&self) -> Option<&str> {
        self.text("attributionUrl")
    }

    /// DZI info, present once the content is ready.
    pub fn dzi(&self) -> Option<DziInfo> {
        match self.fields.get("dzi")? {
            Value::Object(fields) => Some(DziInfo::from(fields.clone())),
            _ => None,
        }
    }

    /// Any field by its wire name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The object as sent by the service.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for ContentInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

// =============================================================================
// DZI Info
// =============================================================================

/// Deep Zoom descriptor info as reported by the `dzi` resource.
///
/// Wraps the `dzi` object unchanged, like [`ContentInfo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DziInfo {
    fields: Map<String, Value>,
}

impl DziInfo {
    /// DZI info holding only a descriptor URL.
    pub fn new(url: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("url".to_string(), Value::String(url.into()));
        Self { fields }
    }

    /// Wrap a JSON value; anything but an object yields empty DZI info.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// URL of the `.dzi` descriptor, empty if absent.
    pub fn url(&self) -> &str {
        self.fields.get("url").and_then(Value::as_str).unwrap_or("")
    }

    pub fn width(&self) -> Option<u32> {
        pixels(self.fields.get("width"))
    }

    pub fn height(&self) -> Option<u32> {
        pixels(self.fields.get("height"))
    }

    pub fn tile_size(&self) -> Option<u32> {
        pixels(self.fields.get("tileSize"))
    }

    pub fn tile_overlap(&self) -> Option<u32> {
        pixels(self.fields.get("tileOverlap"))
    }

    /// Tile image format, e.g. `"jpg"` or `"png"`.
    pub fn tile_format(&self) -> Option<&str> {
        self.fields.get("tileFormat").and_then(Value::as_str)
    }

    /// Any field by its wire name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The object as sent by the service.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Root URL of the tile pyramid: the descriptor URL with its `.dzi`
    /// suffix replaced by `_files/`.
    ///
    /// Descriptor URLs are assumed to end in `.dzi`. If the suffix is
    /// elsewhere its first occurrence is replaced; if absent the URL is
    /// returned unchanged.
    pub fn files_base(&self) -> String {
        let url = self.url();
        match url.strip_suffix(".dzi") {
            Some(stem) => format!("{}_files/", stem),
            None => url.replacen(".dzi", "_files/", 1),
        }
    }

    /// Highest pyramid level, `ceil(log2(max(width, height)))`.
    ///
    /// `None` if the dimensions are unknown.
    pub fn max_level(&self) -> Option<u32> {
        let max_dim = self.width()?.max(self.height()?);
        if max_dim <= 1 {
            return Some(0);
        }
        Some(u32::BITS - (max_dim - 1).leading_zeros())
    }

    /// URL of the tile at (`col`, `row`) of pyramid `level`.
    ///
    /// Uses the descriptor's tile format, falling back to `jpg`.
    pub fn tile_url(&self, level: u32, col: u32, row: u32) -> String {
        let format = self.tile_format().unwrap_or("jpg");
        format!("{}{}/{}_{}.{}", self.files_base(), level, col, row, format)
    }
}

impl From<Map<String, Value>> for DziInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
