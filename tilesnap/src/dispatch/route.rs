//! Routing of resource requests by URL scheme and kind.

use crate::archive::is_archive_url;
use crate::tile::{ResourceKind, ResourceRequest};

/// Backend a URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSource {
    /// Local archive scheme
    Archive,
    /// Anything else, fetched over HTTP(S)
    Remote,
}

impl TileSource {
    pub fn classify(url: &str) -> Self {
        if is_archive_url(url) {
            TileSource::Archive
        } else {
            TileSource::Remote
        }
    }
}

/// Adapter call a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    ArchiveMetadata,
    ArchiveTile,
    RemoteTile,
}

impl Route {
    /// Route for `request`, or `None` when it is left unanswered.
    ///
    /// Remote source metadata and every kind other than source/tile have no
    /// route.
    pub(crate) fn for_request(request: &ResourceRequest) -> Option<Self> {
        match (request.kind(), TileSource::classify(request.url())) {
            (ResourceKind::Source, TileSource::Archive) => Some(Route::ArchiveMetadata),
            (ResourceKind::Source, TileSource::Remote) => None,
            (ResourceKind::Tile, TileSource::Archive) => Some(Route::ArchiveTile),
            (ResourceKind::Tile, TileSource::Remote) => Some(Route::RemoteTile),
            _ => None,
        }
    }
}
