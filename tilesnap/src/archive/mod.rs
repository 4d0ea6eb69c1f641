//! Local tile archives.
//!
//! Requests whose URL uses the `mbtiles://` scheme are answered from MBTiles
//! files in a configured directory:
//!
//! - `mbtiles://<service>` (source metadata) returns a TileJSON document
//!   whose tile template points back at the same archive.
//! - `mbtiles://<service>/{z}/{x}/{y}` returns the stored tile bytes, or an
//!   empty payload when the archive has no such tile.
//!
//! # Example
//!
//! ```ignore
//! use tilesnap::archive::ArchiveSource;
//!
//! let source: ArchiveSource = ArchiveSource::new(Some("/srv/tiles".into()));
//! let tile = source.tile("mbtiles://parks/5/10/12").await?;
//! ```

mod error;
mod mbtiles;
mod source;
mod store;
pub mod url;

pub use error::{ArchiveError, StoreError};
pub use mbtiles::{MbtilesArchive, MbtilesError};
pub use source::ArchiveSource;
pub use store::{ArchiveInfo, TileArchive, TileJson};
pub use url::{is_archive_url, ResolvedArchiveRef, ARCHIVE_EXTENSION, ARCHIVE_SCHEME};

#[cfg(test)]
pub(crate) use mbtiles::fixtures;
