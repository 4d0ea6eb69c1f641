//! Remote tile fetching over HTTP(S).

use super::{AsyncHttpClient, HttpResponse, RemoteError};
use crate::tile::TileResult;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Error body returned by tile servers on non-200 responses.
#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Fetches tiles over HTTP(S) and converts responses into [`TileResult`]s.
pub struct RemoteTileSource<C> {
    client: Arc<C>,
}

impl<C> Clone for RemoteTileSource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: AsyncHttpClient> RemoteTileSource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Fetch a tile.
    ///
    /// A 200 response yields its body plus `modified`, `expires` and `etag`
    /// metadata when present. Any other status is an error whose message
    /// comes from the server's `{"message": ...}` JSON body.
    pub async fn fetch_tile(&self, url: &str) -> Result<TileResult, RemoteError> {
        let response = self.client.get(url).await?;

        if response.status != 200 {
            let body: ErrorMessage =
                serde_json::from_slice(&response.body).map_err(|source| {
                    RemoteError::ErrorBody {
                        url: url.to_string(),
                        status: response.status,
                        source,
                    }
                })?;
            debug!(url = url, status = response.status, message = %body.message, "Tile server error");
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: response.status,
                message: body.message,
            });
        }

        Ok(tile_result(response))
    }
}

fn tile_result(response: HttpResponse) -> TileResult {
    let modified = response
        .header("modified")
        .or_else(|| response.header("last-modified"))
        .and_then(parse_http_date);
    let expires = response.header("expires").and_then(parse_http_date);
    let etag = response.header("etag").map(str::to_string);

    TileResult {
        data: response.body,
        modified,
        expires,
        etag,
    }
}

/// Parse an RFC 2822 / HTTP date. Unparseable values are treated as absent.
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc2822(value) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(e) => {
            debug!(value = value, error = %e, "Ignoring unparseable date header");
            None
        }
    }
}
