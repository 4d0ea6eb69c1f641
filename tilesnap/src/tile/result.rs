//! Tile payload returned to the rendering engine.

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Result of a successful resource fetch.
///
/// `data` may be empty: a tile missing from a local archive is reported as an
/// empty payload rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileResult {
    /// Raw resource bytes (tile image, vector tile or TileJSON)
    pub data: Bytes,
    /// Last modification time reported by the origin
    pub modified: Option<DateTime<Utc>>,
    /// Expiry time reported by the origin
    pub expires: Option<DateTime<Utc>>,
    /// Entity tag reported by the origin
    pub etag: Option<String>,
}

impl TileResult {
    /// Create a result carrying only data.
    pub fn from_data(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Create an empty-data result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the payload has no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
