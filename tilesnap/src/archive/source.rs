//! Local archive adapter: answers source metadata and tile requests from
//! archive files in a configured directory.

use super::mbtiles::MbtilesArchive;
use super::store::{TileArchive, TileJson};
use super::url::{resolve_source, resolve_tile};
use super::ArchiveError;
use crate::tile::TileResult;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Serves requests from archive files under one directory.
///
/// Every call opens its own archive handle on Tokio's blocking pool and drops
/// it when the query finishes; nothing is shared between calls.
pub struct ArchiveSource<A = MbtilesArchive> {
    archive_dir: Option<Arc<Path>>,
    _archive: PhantomData<fn() -> A>,
}

impl<A> Clone for ArchiveSource<A> {
    fn clone(&self) -> Self {
        Self {
            archive_dir: self.archive_dir.clone(),
            _archive: PhantomData,
        }
    }
}

impl<A> std::fmt::Debug for ArchiveSource<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveSource")
            .field("archive_dir", &self.archive_dir)
            .finish()
    }
}

impl<A: TileArchive + 'static> ArchiveSource<A> {
    /// Create a source rooted at `archive_dir`.
    ///
    /// With no directory every request fails with
    /// [`ArchiveError::NoArchiveDirectory`].
    pub fn new(archive_dir: Option<PathBuf>) -> Self {
        Self {
            archive_dir: archive_dir.map(Arc::from),
            _archive: PhantomData,
        }
    }

    /// Directory archives are resolved against.
    pub fn archive_dir(&self) -> Option<&Path> {
        self.archive_dir.as_deref()
    }

    fn require_dir(&self, url: &str) -> Result<&Path, ArchiveError> {
        self.archive_dir()
            .ok_or_else(|| ArchiveError::NoArchiveDirectory {
                url: url.to_string(),
            })
    }

    /// Builds the TileJSON document for the archive named by `url`.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::Open`] if the archive cannot be opened
    /// - [`ArchiveError::Metadata`] if its info record cannot be read
    pub async fn source_metadata(&self, url: &str) -> Result<TileResult, ArchiveError> {
        let resolved = resolve_source(self.require_dir(url)?, url)?;
        debug!(url = url, path = %resolved.path.display(), "Reading archive metadata");

        let data = tokio::task::spawn_blocking(move || {
            let archive = A::open(&resolved.path).map_err(|e| ArchiveError::Open {
                path: resolved.path.clone(),
                source: Box::new(e),
            })?;

            let info = archive.info().map_err(|e| ArchiveError::Metadata {
                path: resolved.path.clone(),
                source: Box::new(e),
            })?;

            let tilejson = TileJson::for_service(&resolved.service, &info);
            serde_json::to_vec(&tilejson).map_err(|e| ArchiveError::Metadata {
                path: resolved.path,
                source: Box::new(e),
            })
        })
        .await
        .map_err(|e| ArchiveError::Task(e.to_string()))??;

        Ok(TileResult::from_data(data))
    }

    /// Reads a single tile from the archive named by `url`.
    ///
    /// A tile that is absent, or whose lookup fails, yields an empty result
    /// and a warning naming the archive and coordinate. Only resolution and
    /// open failures are errors.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::MalformedTileUrl`] if the URL lacks `/{z}/{x}/{y}`
    /// - [`ArchiveError::Open`] if the archive cannot be opened
    pub async fn tile(&self, url: &str) -> Result<TileResult, ArchiveError> {
        let resolved = resolve_tile(self.require_dir(url)?, url)?;
        let Some(tile) = resolved.tile else {
            return Err(ArchiveError::MalformedTileUrl {
                url: url.to_string(),
                reason: "no tile coordinate".to_string(),
            });
        };

        tokio::task::spawn_blocking(move || {
            let archive = A::open(&resolved.path).map_err(|e| ArchiveError::Open {
                path: resolved.path.clone(),
                source: Box::new(e),
            })?;

            if !tile.exists() {
                warn!(
                    path = %resolved.path.display(),
                    z = tile.zoom,
                    x = tile.x,
                    y = tile.y,
                    "Tile outside the zoom level's grid, returning empty tile"
                );
                return Ok(TileResult::empty());
            }

            match archive.tile(tile) {
                Ok(Some(data)) => Ok(TileResult::from_data(data)),
                Ok(None) => {
                    warn!(
                        path = %resolved.path.display(),
                        z = tile.zoom,
                        x = tile.x,
                        y = tile.y,
                        "Tile not found in archive, returning empty tile"
                    );
                    Ok(TileResult::empty())
                }
                Err(e) => {
                    warn!(
                        path = %resolved.path.display(),
                        z = tile.zoom,
                        x = tile.x,
                        y = tile.y,
                        error = %e,
                        "Tile lookup failed, returning empty tile"
                    );
                    Ok(TileResult::empty())
                }
            }
        })
        .await
        .map_err(|e| ArchiveError::Task(e.to_string()))?
    }
}
