//! Resource requests issued by the rendering engine and the tile payloads
//! returned to it.
//!
//! # Flow
//!
//! ```text
//! RenderEngine ──ResourceRequest{url, kind}──► ResourceHandler
//!                                                   │
//!              ◄──────── TileResult / error ────────┘
//! ```

mod request;
mod result;

pub use request::{ResourceKind, ResourceRequest};
pub use result::TileResult;
