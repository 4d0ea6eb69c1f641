//! Remote tile fetching over HTTP(S).
//!
//! [`RemoteTileSource`] issues a GET through an [`AsyncHttpClient`] and maps
//! the response into a [`TileResult`](crate::tile::TileResult). The client
//! trait lets tests substitute canned responses for the network.

mod error;
pub(crate) mod http;
mod source;

pub use error::{RemoteError, TransportError};
pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpResponse, DEFAULT_USER_AGENT};
pub use source::RemoteTileSource;
