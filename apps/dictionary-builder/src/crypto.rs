//! # Password Encryption
//!
//! Connection passwords are stored encrypted in the options file.
//!
//! ```text
//! key string ──SHA-256──► 32 byte key
//!                              │
//! password ──AES-256-GCM───────┴──► nonce (12) ‖ ciphertext ‖ tag ──hex──► options file
//! ```
//!
//! `common` keys are shared by every machine so the options file can be
//! committed next to the solution. `system` keys bind the file to the
//! current machine.

use std::fs;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Application-wide key used by the `common` method.
const COMMON_KEY: &str = "UmbracoDictionaryBuilder.Options.CommonKey";

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Where the encryption key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionMethod {
    /// Fixed application key.
    #[default]
    Common,

    /// Key derived from this machine's identity.
    System,
}

impl EncryptionMethod {
    /// The key string for this method.
    ///
    /// `system` reads `/etc/machine-id`, then the host name, and falls back
    /// to the common key when neither is available.
    pub fn key_material(self) -> String {
        match self {
            EncryptionMethod::Common => COMMON_KEY.to_string(),
            EncryptionMethod::System => machine_identity().unwrap_or_else(|| {
                warn!("No machine identity available, using the common key");
                COMMON_KEY.to_string()
            }),
        }
    }
}

impl std::fmt::Display for EncryptionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncryptionMethod::Common => write!(f, "common"),
            EncryptionMethod::System => write!(f, "system"),
        }
    }
}

fn machine_identity() -> Option<String> {
    let read = |path: &str| {
        fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    read("/etc/machine-id")
        .or_else(|| read("/var/lib/dbus/machine-id"))
        .or_else(|| std::env::var("HOSTNAME").ok().filter(|h| !h.is_empty()))
        .or_else(|| std::env::var("COMPUTERNAME").ok().filter(|h| !h.is_empty()))
        .or_else(|| read("/etc/hostname"))
}

/// Encrypts and decrypts option values with one key.
pub struct Cipher {
    cipher: Aes256Gcm,
}

impl Cipher {
    /// Derives the AES key from a key string.
    pub fn new(key_material: &str) -> Self {
        let digest = Sha256::digest(key_material.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(&digest);
        Cipher {
            cipher: Aes256Gcm::new(key),
        }
    }

    pub fn for_method(method: EncryptionMethod) -> Self {
        Self::new(&method.key_material())
    }

    /// Hex-encoded `nonce ‖ ciphertext`. Empty input stays empty.
    pub fn encrypt(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        match self.cipher.encrypt(&nonce, plaintext.as_bytes()) {
            Ok(ciphertext) => {
                let mut bytes = nonce.to_vec();
                bytes.extend_from_slice(&ciphertext);
                hex::encode(bytes)
            }
            Err(_) => {
                warn!("Password encryption failed, value not stored");
                String::new()
            }
        }
    }

    /// Reverses [`Cipher::encrypt`].
    ///
    /// ## Returns
    /// * `Some("")` - Empty input
    /// * `Some(plaintext)` - Value decrypted with this key
    /// * `None` - Not hex, too short, wrong key or tampered
    pub fn decrypt(&self, encoded: &str) -> Option<String> {
        if encoded.is_empty() {
            return Some(String::new());
        }

        let bytes = hex::decode(encoded).ok()?;
        if bytes.len() <= NONCE_LEN {
            return None;
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        match self.cipher.decrypt(Nonce::from_slice(nonce), ciphertext) {
            Ok(plaintext) => String::from_utf8(plaintext).ok(),
            Err(_) => {
                debug!("Stored password could not be decrypted");
                None
            }
        }
    }
}
