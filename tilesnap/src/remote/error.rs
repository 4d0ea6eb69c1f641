//! Error types for remote tile fetches.

use thiserror::Error;

/// Boxed transport-level cause.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while fetching a tile over HTTP.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request failed before a response was received, or the body could
    /// not be read.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The server answered with a non-200 status. The message is taken from
    /// the JSON error body.
    #[error("{message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// The server answered with a non-200 status and an error body that is
    /// not `{"message": ...}` JSON.
    #[error("HTTP {status} from {url} with unreadable error body: {source}")]
    ErrorBody {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    /// HTTP status code, when the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::ErrorBody { status, .. } => Some(*status),
            Self::ClientBuild(_) | Self::Transport { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_status_message_is_verbatim() {
        let err = RemoteError::Status {
            url: "https://tiles.example.com/1/0/0.png".to_string(),
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_transport_keeps_cause() {
        use std::error::Error as _;

        let err = RemoteError::Transport {
            url: "https://x".to_string(),
            source: Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")),
        };
        assert!(err.to_string().contains("refused"));
        assert!(err.source().is_some());
        assert_eq!(err.status(), None);
    }
}
