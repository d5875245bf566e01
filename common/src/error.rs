//! Error types

use thiserror::Error;

/// Errors raised while decoding service payloads
#[derive(Error, Debug)]
pub enum Error {
    #[error("Timestamp error: {0}")]
    Timestamp(String),
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
