//! Resource request types.
//!
//! A [`ResourceRequest`] is what the rendering engine hands to its resource
//! handler while compositing a frame: a URL and the kind of resource it
//! expects back.

use std::fmt;

/// Classification of a resource request, as assigned by the rendering engine.
///
/// Only [`ResourceKind::Source`] and [`ResourceKind::Tile`] are served by the
/// request dispatcher; the rest are left unanswered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Unclassified resource
    Unknown,
    /// Style document
    Style,
    /// Source metadata (TileJSON)
    Source,
    /// A single tile of a source
    Tile,
    /// Font glyph range
    Glyphs,
    /// Sprite sheet image
    SpriteImage,
    /// Sprite sheet index
    SpriteJson,
    /// Standalone image
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Unknown => "unknown",
            ResourceKind::Style => "style",
            ResourceKind::Source => "source",
            ResourceKind::Tile => "tile",
            ResourceKind::Glyphs => "glyphs",
            ResourceKind::SpriteImage => "sprite-image",
            ResourceKind::SpriteJson => "sprite-json",
            ResourceKind::Image => "image",
        };
        f.write_str(name)
    }
}

/// Request for a single resource.
///
/// # Example
///
/// ```
/// use tilesnap::tile::{ResourceKind, ResourceRequest};
///
/// let request = ResourceRequest::tile("mbtiles://parks/5/10/12");
/// assert_eq!(request.kind(), ResourceKind::Tile);
/// assert_eq!(request.url(), "mbtiles://parks/5/10/12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRequest {
    /// Resource URL (local archive scheme or HTTP(S))
    url: String,
    /// Kind of resource expected
    kind: ResourceKind,
}

impl ResourceRequest {
    /// Create a new resource request.
    pub fn new(url: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    /// Create a source metadata request.
    pub fn source(url: impl Into<String>) -> Self {
        Self::new(url, ResourceKind::Source)
    }

    /// Create a tile request.
    pub fn tile(url: impl Into<String>) -> Self {
        Self::new(url, ResourceKind::Tile)
    }

    /// Get the request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the resource kind.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Consume the request and return its URL.
    pub fn into_url(self) -> String {
        self.url
    }
}
