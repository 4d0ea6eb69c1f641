//! Error types for local archive access.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error from an archive store implementation.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when serving a request from a local archive.
///
/// A tile that is absent from an opened archive is not an error; see
/// [`super::ArchiveSource::tile`].
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// URL does not use the local archive scheme.
    #[error("Not a local archive URL: {0}")]
    NotArchiveUrl(String),

    /// Tile URL lacks a well-formed `/{z}/{x}/{y}` suffix.
    #[error("Malformed tile URL '{url}': {reason}")]
    MalformedTileUrl { url: String, reason: String },

    /// A local archive URL was requested but no archive directory is configured.
    #[error("No archive directory configured to resolve {url}")]
    NoArchiveDirectory { url: String },

    /// The archive file could not be opened.
    #[error("Failed to open archive {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    /// The archive opened but its info record could not be read.
    #[error("Failed to read metadata from archive {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    /// The blocking archive task did not complete.
    #[error("Archive task failed: {0}")]
    Task(String),
}
