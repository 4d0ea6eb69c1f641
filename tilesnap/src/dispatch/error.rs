//! Errors delivered to resource callbacks.

use crate::archive::ArchiveError;
use crate::remote::RemoteError;
use thiserror::Error;

/// Error delivered to a resource callback.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The local archive could not serve the request.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The remote fetch failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// `handle` was called from a thread with no Tokio runtime.
    #[error("No async runtime available to dispatch {url}")]
    NoRuntime { url: String },

    /// The fetch task panicked.
    #[error("Request for {url} panicked")]
    Panicked { url: String },
}
