//! Key material resolution.
//!
//! Turns a [`KeysConfig`] into a [`KeyPair`]. Inline hex keys take
//! precedence field by field; anything still missing is read from the key
//! file. Length checks are left to the envelope codec.

use std::path::Path;

use lazybox_crypto::KeyPair;
use serde::Deserialize;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::KeysConfig;
use crate::error::{Error, Result};

/// Contents of a key file: `{ "public_key": "<hex>", "secret_key": "<hex>" }`.
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyFile {
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
}

impl std::fmt::Debug for KeyFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyFile")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Load a key file.
///
/// On Unix, verifies file permissions are 0600 (owner-only) before reading.
pub fn load_key_file(path: &Path) -> Result<KeyFile> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path).map_err(|e| {
            Error::KeyMaterial(format!("Cannot access key file {}: {e}", path.display()))
        })?;
        let mode = metadata.permissions().mode() & 0o777;
        if mode != 0o600 {
            return Err(Error::KeyMaterial(format!(
                "Key file {} has insecure permissions: {mode:o} (expected 600)",
                path.display()
            )));
        }
    }

    let mut content = std::fs::read_to_string(path).map_err(|e| {
        Error::KeyMaterial(format!("Failed to read key file {}: {e}", path.display()))
    })?;
    let parsed = serde_json::from_str(&content).map_err(|e| {
        Error::KeyMaterial(format!("Failed to parse key file {}: {e}", path.display()))
    });
    content.zeroize();
    parsed
}

/// Resolve the configured key pair.
pub fn resolve_key_pair(keys: &KeysConfig) -> Result<KeyPair> {
    if let (Some(public), Some(secret)) = (&keys.public_key, &keys.secret_key) {
        debug!("Using inline key pair");
        return Ok(KeyPair::from_hex(public, secret)?);
    }

    let Some(path) = &keys.key_file else {
        return Err(Error::KeyMaterial(match (&keys.public_key, &keys.secret_key) {
            (None, None) => "no key pair configured (set a key file or both hex keys)".into(),
            (Some(_), None) => "secret key missing and no key file configured".into(),
            _ => "public key missing and no key file configured".into(),
        }));
    };

    debug!(path = %path.display(), "Loading key file");
    let file = load_key_file(path)?;
    let public = keys
        .public_key
        .as_ref()
        .or(file.public_key.as_ref())
        .ok_or_else(|| Error::KeyMaterial(format!("{} has no public_key", path.display())))?;
    let secret = keys
        .secret_key
        .as_ref()
        .or(file.secret_key.as_ref())
        .ok_or_else(|| Error::KeyMaterial(format!("{} has no secret_key", path.display())))?;

    Ok(KeyPair::from_hex(public, secret)?)
}
