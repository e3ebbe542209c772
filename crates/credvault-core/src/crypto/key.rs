//! Session key derivation using Argon2id.
//!
//! The session key is derived from the master passphrase and a fixed,
//! system-wide salt. Determinism is what makes login work: there is no stored
//! verifier, so the only proof of a correct passphrase is that every stored
//! record decrypts under the derived key.

use argon2::Argon2;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VaultError};

/// Argon2id parameters.
///
/// Changing any of these makes every existing vault undecryptable.
/// - Memory: 64 MB (64 * 1024 KB)
/// - Iterations: 3
/// - Parallelism: 1
const ARGON2_MEMORY_KB: u32 = 64 * 1024;
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;

/// Length of the session key in bytes (256 bits for XChaCha20-Poly1305).
pub const KEY_LENGTH: usize = 32;

/// Fixed salt shared by every vault.
///
/// Not randomized per user: the threat model is a single local user, and a
/// per-vault salt would need its own storage and recovery story.
pub const VAULT_SALT: &[u8] = b"password-manager-salt";

/// The symmetric key for one login session.
///
/// Not `Clone`: a session owns exactly one key. The bytes are overwritten
/// when the key is dropped.
#[derive(ZeroizeOnDrop)]
pub struct SessionKey {
    key: [u8; KEY_LENGTH],
}

impl SessionKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate cipher operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a session key from a passphrase using Argon2id.
///
/// # Arguments
///
/// * `passphrase` - The master passphrase (must not be empty)
/// * `salt` - Salt bytes, at least 8 bytes long
///
/// # Errors
///
/// Returns `VaultError::InvalidInput` for an empty passphrase. Argon2 failures
/// cannot occur with the fixed parameters and a valid salt, but are reported as
/// `VaultError::Crypto` rather than panicking.
///
/// # Examples
///
/// ```
/// use credvault_core::crypto::{derive_key, VAULT_SALT};
///
/// let key = derive_key("my-passphrase", VAULT_SALT).unwrap();
/// let again = derive_key("my-passphrase", VAULT_SALT).unwrap();
/// assert_eq!(key.as_bytes(), again.as_bytes());
/// ```
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<SessionKey> {
    if passphrase.is_empty() {
        return Err(VaultError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    let params = argon2::Params::new(
        ARGON2_MEMORY_KB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(KEY_LENGTH),
    )
    .map_err(|e| VaultError::Crypto(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut key = SessionKey::from_bytes([0u8; KEY_LENGTH]);
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut key.key)
        .map_err(|e| VaultError::Crypto(format!("Key derivation failed: {}", e)))?;

    Ok(key)
}

/// Derive the session key for a passphrase using the vault salt.
pub fn derive_session_key(passphrase: &str) -> Result<SessionKey> {
    derive_key(passphrase, VAULT_SALT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key("test-passphrase", VAULT_SALT).unwrap();
        let key2 = derive_key("test-passphrase", VAULT_SALT).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_session_key_uses_vault_salt() {
        let key1 = derive_session_key("test-passphrase").unwrap();
        let key2 = derive_key("test-passphrase", VAULT_SALT).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let key1 = derive_key("passphrase-one", VAULT_SALT).unwrap();
        let key2 = derive_key("passphrase-two", VAULT_SALT).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("test-passphrase", b"salt1-1234567890").unwrap();
        let key2 = derive_key("test-passphrase", b"salt2-1234567890").unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = derive_key("", VAULT_SALT);
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn test_short_salt_reported_not_panicking() {
        let result = derive_key("test-passphrase", b"abc");
        assert!(matches!(result, Err(VaultError::Crypto(_))));
    }

    #[test]
    fn test_session_key_debug_redacts() {
        let key = derive_session_key("test-passphrase").unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
