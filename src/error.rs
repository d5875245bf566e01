use std::time::Duration;
use thiserror::Error;

/// Failure reported by, or while talking to, the remote service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// The service answered with an error status
    #[error("{status} (HTTP {http_status}): {message}")]
    Status {
        http_status: u16,
        status: String,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("call cancelled")]
    Cancelled,

    #[error("deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),
}

#[derive(Error, Debug)]
pub enum ProductSearchError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Access token is not set. Export PRODUCT_SEARCH_ACCESS_TOKEN or run `product-search config --set-access-token TOKEN`")]
    MissingAccessToken,

    #[error("Cannot read image file {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Remote call failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] product_search_common::Error),
}

/// Coarse classification of a [`ProductSearchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local image file could not be opened, read or decoded
    LocalIo,
    /// Any failure coming back from the remote collaborator
    Remote,
    /// Configuration, output sink and decoding failures
    Other,
}

impl ProductSearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductSearchError::ImageRead { .. } | ProductSearchError::ImageDecode(_) => {
                ErrorKind::LocalIo
            }
            ProductSearchError::Remote(_) => ErrorKind::Remote,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_local_io(&self) -> bool {
        self.kind() == ErrorKind::LocalIo
    }

    pub fn is_remote(&self) -> bool {
        self.kind() == ErrorKind::Remote
    }
}

pub type Result<T> = std::result::Result<T, ProductSearchError>;
