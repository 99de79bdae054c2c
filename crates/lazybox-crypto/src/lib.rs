//! `LazyBox` envelope encryption library
//!
//! Seals text for a recipient with a sender/recipient key pair and
//! serializes the result as a single printable string.
//!
//! ## Crypto primitives
//!
//! - **Key pair**: recipient X25519 public key + sender X25519 secret key, 32 bytes each
//! - **Encryption**: NaCl `crypto_box` (X25519 → XSalsa20-Poly1305), 24-byte random nonce
//! - **Envelope**: `hex(nonce) || hex(ciphertext + 16-byte tag)`, nonce is the first 48 characters
//!
//! ```
//! # fn demo(key_pair: &lazybox_crypto::KeyPair) -> Result<(), lazybox_crypto::CryptoError> {
//! use lazybox_crypto::EnvelopeCodec;
//!
//! let codec = EnvelopeCodec::new();
//! let envelope = codec.encrypt("hello world", key_pair)?;
//! assert_eq!(codec.decrypt(&envelope, key_pair)?, "hello world");
//! # Ok(())
//! # }
//! ```

pub mod envelope;
pub mod error;
pub mod keypair;

pub use envelope::{
    Envelope, EnvelopeCodec, NONCE_HEX_LEN, NONCE_SIZE, TAG_SIZE, decrypt, encrypt,
};
pub use error::{CryptoError, EnvelopeSegment, ErrorKind, KeyRole};
pub use keypair::{KEY_SIZE, KeyPair, PrimitiveKeyPair, fingerprint_of};
#[cfg(any(test, feature = "test-utils"))]
pub use keypair::{generate_key_pair, matching_key_pairs};
