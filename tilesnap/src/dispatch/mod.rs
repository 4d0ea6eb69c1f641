//! Request dispatcher: routes the rendering engine's resource requests to a
//! local archive or a remote tile server.
//!
//! The engine sees a single [`ResourceHandler`]. Behind it,
//! [`RequestDispatcher`] classifies each request by URL scheme and kind:
//!
//! | Kind     | `mbtiles://`              | other URL            |
//! |----------|---------------------------|----------------------|
//! | `Source` | TileJSON from the archive | unanswered           |
//! | `Tile`   | tile from the archive     | HTTP fetch           |
//! | other    | unanswered                | unanswered           |
//!
//! Unanswered requests drop their callback without calling it. Every routed
//! request calls its callback exactly once.

mod error;
mod route;

pub use error::DispatchError;
pub use route::TileSource;

use crate::archive::ArchiveSource;
use crate::remote::{AsyncHttpClient, AsyncReqwestClient, RemoteTileSource};
use crate::tile::{ResourceRequest, TileResult};
use futures::FutureExt;
use route::Route;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{error, trace};

/// Completion callback for one resource request.
pub type ResourceCallback = Box<dyn FnOnce(Result<TileResult, DispatchError>) + Send + 'static>;

/// Capability the rendering engine uses to load resources while compositing.
///
/// `handle` must return promptly; results are delivered through `callback`.
pub trait ResourceHandler: Send + Sync {
    fn handle(&self, request: ResourceRequest, callback: ResourceCallback);
}

/// Routes resource requests to the archive or remote adapter.
///
/// Holds only the archive directory and the HTTP client. Each request runs on
/// its own Tokio task with its own archive handle or connection, so concurrent
/// requests share no mutable state.
pub struct RequestDispatcher<C = AsyncReqwestClient> {
    archive: ArchiveSource,
    remote: RemoteTileSource<C>,
}

impl<C: AsyncHttpClient> RequestDispatcher<C> {
    pub fn new(archive_dir: Option<PathBuf>, client: Arc<C>) -> Self {
        Self {
            archive: ArchiveSource::new(archive_dir),
            remote: RemoteTileSource::new(client),
        }
    }

    pub fn archive_dir(&self) -> Option<&Path> {
        self.archive.archive_dir()
    }
}

impl<C: AsyncHttpClient> ResourceHandler for RequestDispatcher<C> {
    fn handle(&self, request: ResourceRequest, callback: ResourceCallback) {
        let Some(route) = Route::for_request(&request) else {
            trace!(url = request.url(), kind = %request.kind(), "Ignoring unsupported resource request");
            return;
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                callback(Err(DispatchError::NoRuntime {
                    url: request.into_url(),
                }));
                return;
            }
        };

        let archive = self.archive.clone();
        let remote = self.remote.clone();
        let url = request.into_url();

        runtime.spawn(async move {
            let outcome = AssertUnwindSafe(fetch(route, &archive, &remote, &url))
                .catch_unwind()
                .await;

            let result = outcome.unwrap_or_else(|_| {
                error!(url = %url, "Resource request panicked");
                Err(DispatchError::Panicked { url: url.clone() })
            });
            callback(result);
        });
    }
}

async fn fetch<C: AsyncHttpClient>(
    route: Route,
    archive: &ArchiveSource,
    remote: &RemoteTileSource<C>,
    url: &str,
) -> Result<TileResult, DispatchError> {
    trace!(url = url, route = ?route, "Dispatching resource request");
    match route {
        Route::ArchiveMetadata => Ok(archive.source_metadata(url).await?),
        Route::ArchiveTile => Ok(archive.tile(url).await?),
        Route::RemoteTile => Ok(remote.fetch_tile(url).await?),
    }
}
