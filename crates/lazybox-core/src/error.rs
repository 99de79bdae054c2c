//! Error types for `LazyBox` core library.

use lazybox_crypto::CryptoError;
use thiserror::Error;

/// Result type alias using `LazyBox` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `LazyBox` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key material missing, unreadable or insecure
    #[error("Key material error: {0}")]
    KeyMaterial(String),

    /// Envelope or key validation error
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
