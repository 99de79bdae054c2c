//! Envelope codec.
//!
//! An envelope is the printable form of one sealed message:
//! `hex(nonce) || hex(ciphertext)`, no separator, no length or version
//! field. The nonce always occupies the first [`NONCE_HEX_LEN`] characters.
//!
//! Sealing uses the NaCl `crypto_box` construction (X25519 +
//! XSalsa20-Poly1305). Every seal draws a fresh 24-byte nonce from the OS
//! CSPRNG; there is no counter or seeded path.

use std::fmt;

use crypto_box::aead::{Aead, Nonce};
use crypto_box::SalsaBox;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{CryptoError, EnvelopeSegment};
use crate::keypair::KeyPair;

/// Nonce size for XSalsa20-Poly1305.
pub const NONCE_SIZE: usize = 24;

/// Number of hex characters the nonce occupies at the front of an envelope.
pub const NONCE_HEX_LEN: usize = NONCE_SIZE * 2;

/// Poly1305 authentication tag size carried in every ciphertext.
pub const TAG_SIZE: usize = 16;

/// A parsed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Nonce used for this seal.
    pub nonce: [u8; NONCE_SIZE],
    /// Box ciphertext (includes the 16-byte tag).
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Split and hex-decode an envelope string.
    ///
    /// Never touches key material: every failure here is a malformed
    /// envelope.
    pub fn parse(input: &str) -> Result<Self, CryptoError> {
        let bytes = input.as_bytes();
        if bytes.len() < NONCE_HEX_LEN {
            return Err(CryptoError::EnvelopeTooShort {
                expected: NONCE_HEX_LEN,
                actual: bytes.len(),
            });
        }
        let (nonce_hex, ciphertext_hex) = bytes.split_at(NONCE_HEX_LEN);

        let mut nonce = [0u8; NONCE_SIZE];
        hex::decode_to_slice(nonce_hex, &mut nonce).map_err(|e| {
            CryptoError::InvalidEnvelopeHex {
                segment: EnvelopeSegment::Nonce,
                reason: e.to_string(),
            }
        })?;
        let ciphertext =
            hex::decode(ciphertext_hex).map_err(|e| CryptoError::InvalidEnvelopeHex {
                segment: EnvelopeSegment::Ciphertext,
                reason: e.to_string(),
            })?;

        Ok(Self { nonce, ciphertext })
    }

    /// Lowercase hex serialization.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(NONCE_HEX_LEN + self.ciphertext.len() * 2);
        out.push_str(&hex::encode(self.nonce));
        out.push_str(&hex::encode(&self.ciphertext));
        out
    }

    /// Length in characters of the serialized envelope for a plaintext of
    /// `plaintext_len` bytes.
    pub const fn encoded_len(plaintext_len: usize) -> usize {
        NONCE_HEX_LEN + 2 * (plaintext_len + TAG_SIZE)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Stateless envelope encryptor/decryptor.
///
/// Holds no keys and no state; every call validates its key pair, and
/// concurrent use from any number of threads needs no coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeCodec;

impl EnvelopeCodec {
    /// Create a codec. There is nothing to configure.
    pub const fn new() -> Self {
        Self
    }

    /// Encrypt UTF-8 text into an envelope string.
    pub fn encrypt(&self, plaintext: &str, key_pair: &KeyPair) -> Result<String, CryptoError> {
        self.encrypt_bytes(plaintext.as_bytes(), key_pair)
    }

    /// Decrypt an envelope string back to UTF-8 text.
    pub fn decrypt(&self, envelope: &str, key_pair: &KeyPair) -> Result<String, CryptoError> {
        let plaintext = self.decrypt_bytes(envelope, key_pair)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::NonUtf8Plaintext)
    }

    /// Encrypt arbitrary bytes into an envelope string.
    pub fn encrypt_bytes(
        &self,
        plaintext: &[u8],
        key_pair: &KeyPair,
    ) -> Result<String, CryptoError> {
        self.seal(plaintext, key_pair).map(|envelope| envelope.to_hex())
    }

    /// Decrypt an envelope string to raw bytes.
    pub fn decrypt_bytes(&self, envelope: &str, key_pair: &KeyPair) -> Result<Vec<u8>, CryptoError> {
        let primitive = key_pair.to_primitive()?;
        let envelope = Envelope::parse(envelope)?;
        open_with(&primitive.salsa_box(), &envelope)
    }

    /// Seal plaintext under a fresh nonce without serializing it.
    pub fn seal(&self, plaintext: &[u8], key_pair: &KeyPair) -> Result<Envelope, CryptoError> {
        let primitive = key_pair.to_primitive()?;

        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);

        seal_with(&primitive.salsa_box(), nonce, plaintext)
    }

    /// Open an already-parsed envelope.
    pub fn open(&self, envelope: &Envelope, key_pair: &KeyPair) -> Result<Vec<u8>, CryptoError> {
        let primitive = key_pair.to_primitive()?;
        open_with(&primitive.salsa_box(), envelope)
    }
}

fn seal_with(
    salsa_box: &SalsaBox,
    nonce: [u8; NONCE_SIZE],
    plaintext: &[u8],
) -> Result<Envelope, CryptoError> {
    let ciphertext = salsa_box
        .encrypt(Nonce::<SalsaBox>::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok(Envelope { nonce, ciphertext })
}

fn open_with(salsa_box: &SalsaBox, envelope: &Envelope) -> Result<Vec<u8>, CryptoError> {
    salsa_box
        .decrypt(
            Nonce::<SalsaBox>::from_slice(&envelope.nonce),
            envelope.ciphertext.as_slice(),
        )
        .map_err(|_| CryptoError::DecryptionFailed)
}

/// Encrypt text with a default [`EnvelopeCodec`].
pub fn encrypt(plaintext: &str, key_pair: &KeyPair) -> Result<String, CryptoError> {
    EnvelopeCodec::new().encrypt(plaintext, key_pair)
}

/// Decrypt an envelope with a default [`EnvelopeCodec`].
pub fn decrypt(envelope: &str, key_pair: &KeyPair) -> Result<String, CryptoError> {
    EnvelopeCodec::new().decrypt(envelope, key_pair)
}
