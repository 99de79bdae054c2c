//! Crypto error types.

use std::fmt;

/// Which half of a [`KeyPair`](crate::KeyPair) a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// The recipient's public key.
    Public,
    /// The sender's secret key.
    Secret,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Secret => f.write_str("secret"),
        }
    }
}

/// Which part of an envelope string failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeSegment {
    /// The leading 48-character nonce.
    Nonce,
    /// Everything after the nonce.
    Ciphertext,
}

impl fmt::Display for EnvelopeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nonce => f.write_str("nonce"),
            Self::Ciphertext => f.write_str("ciphertext"),
        }
    }
}

/// Coarse classification of a [`CryptoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The key pair was rejected before any cryptographic work.
    Validation,
    /// The envelope string could not be split or hex-decoded.
    MalformedEnvelope,
    /// The primitive rejected the ciphertext, nonce and key combination.
    Decryption,
    /// The primitive failed to seal.
    Encryption,
    /// Authentic plaintext that is not valid UTF-8 was requested as text.
    Encoding,
}

/// Errors from envelope operations.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Invalid {role} key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        role: KeyRole,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid {role} key encoding: {reason}")]
    InvalidKeyEncoding { role: KeyRole, reason: String },

    #[error("Envelope too short: expected at least {expected} characters, got {actual}")]
    EnvelopeTooShort { expected: usize, actual: usize },

    #[error("Invalid hex in envelope {segment}: {reason}")]
    InvalidEnvelopeHex {
        segment: EnvelopeSegment,
        reason: String,
    },

    #[error("Decryption failed: message authentication failed")]
    DecryptionFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decrypted plaintext is not valid UTF-8")]
    NonUtf8Plaintext,
}

impl CryptoError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidKeyLength { .. } | Self::InvalidKeyEncoding { .. } => {
                ErrorKind::Validation
            }
            Self::EnvelopeTooShort { .. } | Self::InvalidEnvelopeHex { .. } => {
                ErrorKind::MalformedEnvelope
            }
            Self::DecryptionFailed => ErrorKind::Decryption,
            Self::EncryptionFailed(_) => ErrorKind::Encryption,
            Self::NonUtf8Plaintext => ErrorKind::Encoding,
        }
    }
}
