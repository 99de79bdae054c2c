//! Key pair adapter.
//!
//! A [`KeyPair`] carries the recipient's public key and the sender's secret
//! key as raw bytes, exactly as the application handed them over. Nothing is
//! checked at construction; [`KeyPair::to_primitive`] is the single gate that
//! turns them into fixed-length box keys, so a malformed pair is rejected
//! before any call into the box primitive.

use crypto_box::{PublicKey, SalsaBox, SecretKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, KeyRole};

/// Length in bytes of both box keys.
pub const KEY_SIZE: usize = 32;

/// Recipient public key + sender secret key, as raw bytes.
///
/// An empty buffer stands for an absent key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    public_key: Vec<u8>,
    secret_key: Vec<u8>,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(&self.public_key))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl KeyPair {
    /// Wrap raw key bytes. Lengths are checked lazily by [`Self::to_primitive`].
    pub fn new(public_key: impl Into<Vec<u8>>, secret_key: impl Into<Vec<u8>>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Decode a key pair from hex strings (either case, surrounding
    /// whitespace ignored).
    pub fn from_hex(public_hex: &str, secret_hex: &str) -> Result<Self, CryptoError> {
        let public_key = decode_key_hex(public_hex, KeyRole::Public)?;
        let secret_key = decode_key_hex(secret_hex, KeyRole::Secret)?;
        Ok(Self {
            public_key,
            secret_key,
        })
    }

    /// The recipient public key bytes.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// The sender secret key bytes. Handle with care.
    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    /// Colon-separated SHA-256 fingerprint of the public key.
    ///
    /// Validates the whole pair first, like every other use of the keys.
    pub fn fingerprint(&self) -> Result<String, CryptoError> {
        let primitive = self.to_primitive()?;
        Ok(fingerprint_of(primitive.public_key().as_bytes()))
    }

    /// Validate both keys and convert them into box keys.
    ///
    /// The public key is checked first, then the secret key.
    pub fn to_primitive(&self) -> Result<PrimitiveKeyPair, CryptoError> {
        let public = fixed_key(&self.public_key, KeyRole::Public)?;
        let mut secret = fixed_key(&self.secret_key, KeyRole::Secret)?;
        let pair = PrimitiveKeyPair {
            public: PublicKey::from(public),
            secret: SecretKey::from(secret),
        };
        secret.zeroize();
        Ok(pair)
    }
}

/// Validated keys in the form the box primitive consumes.
pub struct PrimitiveKeyPair {
    public: PublicKey,
    secret: SecretKey,
}

impl std::fmt::Debug for PrimitiveKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveKeyPair")
            .field("public", &hex::encode(self.public.as_bytes()))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl PrimitiveKeyPair {
    /// The validated recipient public key.
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Precompute the box for this key pair.
    pub(crate) fn salsa_box(&self) -> SalsaBox {
        SalsaBox::new(&self.public, &self.secret)
    }
}

fn fixed_key(bytes: &[u8], role: KeyRole) -> Result<[u8; KEY_SIZE], CryptoError> {
    <[u8; KEY_SIZE]>::try_from(bytes).map_err(|_| CryptoError::InvalidKeyLength {
        role,
        expected: KEY_SIZE,
        actual: bytes.len(),
    })
}

fn decode_key_hex(input: &str, role: KeyRole) -> Result<Vec<u8>, CryptoError> {
    hex::decode(input.trim()).map_err(|e| CryptoError::InvalidKeyEncoding {
        role,
        reason: e.to_string(),
    })
}

/// Compute a colon-separated hex fingerprint from raw public key bytes.
pub fn fingerprint_of(pubkey_bytes: &[u8; KEY_SIZE]) -> String {
    use sha2::{Digest, Sha256};
    let hash = Sha256::digest(pubkey_bytes);
    hash.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Generate a random key pair that boxes to itself.
#[cfg(any(test, feature = "test-utils"))]
pub fn generate_key_pair() -> KeyPair {
    use rand::rngs::OsRng;

    let secret = SecretKey::generate(&mut OsRng);
    KeyPair::new(
        secret.public_key().as_bytes().to_vec(),
        secret.to_bytes().to_vec(),
    )
}

/// Create the two halves of a conversation between fresh identities A and B.
///
/// Returns (`sender`, `recipient`): the sender pair is (B public, A secret),
/// the recipient pair is (A public, B secret). Both derive the same box key.
#[cfg(any(test, feature = "test-utils"))]
pub fn matching_key_pairs() -> (KeyPair, KeyPair) {
    use rand::rngs::OsRng;

    let a = SecretKey::generate(&mut OsRng);
    let b = SecretKey::generate(&mut OsRng);
    let sender = KeyPair::new(b.public_key().as_bytes().to_vec(), a.to_bytes().to_vec());
    let recipient = KeyPair::new(a.public_key().as_bytes().to_vec(), b.to_bytes().to_vec());
    (sender, recipient)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn valid_pair_converts() {
        let kp = generate_key_pair();
        let primitive = kp.to_primitive().unwrap();
        assert_eq!(primitive.public_key().as_bytes().as_slice(), kp.public_key());
    }

    #[test]
    fn short_public_key_is_rejected() {
        let kp = KeyPair::new(vec![1u8; 31], vec![2u8; 32]);
        assert!(matches!(
            kp.to_primitive(),
            Err(CryptoError::InvalidKeyLength {
                role: KeyRole::Public,
                expected: 32,
                actual: 31
            })
        ));
    }

    #[test]
    fn long_secret_key_is_rejected() {
        let kp = KeyPair::new(vec![1u8; 32], vec![2u8; 33]);
        assert!(matches!(
            kp.to_primitive(),
            Err(CryptoError::InvalidKeyLength {
                role: KeyRole::Secret,
                expected: 32,
                actual: 33
            })
        ));
    }

    #[test]
    fn absent_keys_are_rejected() {
        let kp = KeyPair::new(Vec::new(), Vec::new());
        assert!(matches!(
            kp.to_primitive(),
            Err(CryptoError::InvalidKeyLength {
                role: KeyRole::Public,
                actual: 0,
                ..
            })
        ));
    }

    #[test]
    fn from_hex_accepts_either_case() {
        let lower = "ab".repeat(32);
        let upper = "AB".repeat(32);
        let kp = KeyPair::from_hex(&lower, &upper).unwrap();
        assert_eq!(kp.public_key(), &[0xABu8; 32]);
        assert_eq!(kp.secret_key(), &[0xABu8; 32]);
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        let good = "00".repeat(32);
        let result = KeyPair::from_hex(&good, "not hex at all");
        assert!(matches!(
            result,
            Err(CryptoError::InvalidKeyEncoding {
                role: KeyRole::Secret,
                ..
            })
        ));
    }

    #[test]
    fn from_hex_keeps_wrong_lengths_for_later_validation() {
        let kp = KeyPair::from_hex("0011", &"00".repeat(32)).unwrap();
        assert_eq!(kp.public_key().len(), 2);
        assert!(kp.to_primitive().is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let kp = KeyPair::new(vec![0x11u8; 32], vec![0x22u8; 32]);
        let debug = format!("{kp:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(&"22".repeat(32)));

        let primitive = kp.to_primitive().unwrap();
        let debug = format!("{primitive:?}");
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn fingerprint_format() {
        let kp = generate_key_pair();
        let fp = kp.fingerprint().unwrap();
        // SHA-256 = 32 bytes = 32 hex pairs + 31 colons = 95 chars
        assert_eq!(fp.len(), 95);
        assert_eq!(fp.matches(':').count(), 31);
        assert_eq!(fp, fingerprint_of(kp.public_key().try_into().unwrap()));
    }

    #[test]
    fn fingerprint_rejects_malformed_pair() {
        let short_public = KeyPair::new(vec![0u8; 2], vec![0u8; 32]);
        assert!(matches!(
            short_public.fingerprint(),
            Err(CryptoError::InvalidKeyLength {
                role: KeyRole::Public,
                expected: 32,
                actual: 2
            })
        ));

        let short_secret = KeyPair::new(vec![0u8; 32], vec![0u8; 5]);
        assert!(matches!(
            short_secret.fingerprint(),
            Err(CryptoError::InvalidKeyLength {
                role: KeyRole::Secret,
                ..
            })
        ));
    }

    #[test]
    fn matching_pairs_cross_reference_public_keys() {
        let (sender, recipient) = matching_key_pairs();
        assert_ne!(sender.public_key(), recipient.public_key());
        assert_ne!(sender.secret_key(), recipient.secret_key());
    }
}
