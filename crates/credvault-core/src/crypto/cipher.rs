//! XChaCha20-Poly1305 field encryption.
//!
//! Ciphertext layout: `[version: 1 byte][nonce: 24 bytes][ciphertext + Poly1305 tag]`.
//! Everything decryption needs besides the key travels inside the value.
//!
//! Associated data separates the two uses of the session key, so a stored
//! field can never be replayed as an export blob and vice versa.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use zeroize::Zeroizing;

use crate::crypto::key::SessionKey;
use crate::error::{DecryptError, Result, VaultError};

/// Version tag stored as the first byte of every ciphertext.
pub const VERSION_TAG: u8 = 0x01;

const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = 1 + NONCE_LEN;

/// What a ciphertext is used for; bound into the AEAD as associated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Purpose {
    Field,
    Export,
}

impl Purpose {
    fn aad(self) -> &'static [u8] {
        match self {
            Purpose::Field => b"credvault:field:v1",
            Purpose::Export => b"credvault:export:v1",
        }
    }
}

/// An encrypted value.
///
/// Encrypting the same plaintext twice yields different ciphertexts; both
/// decrypt to the same plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct Ciphertext(Vec<u8>);

impl Ciphertext {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Standard base64 text form, as stored by the SQLite backend.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Parse the base64 text form.
    ///
    /// Invalid base64 is reported the same way as a failed decryption.
    pub fn from_base64(text: &str) -> std::result::Result<Self, DecryptError> {
        STANDARD
            .decode(text)
            .map(Self)
            .map_err(|_| DecryptError::AuthenticationOrKeyMismatch)
    }
}

impl std::fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Encrypt one record field under the session key.
///
/// # Errors
///
/// Returns `VaultError::Crypto` only if the OS random number generator is
/// unavailable.
pub fn encrypt_field(plaintext: &str, key: &SessionKey) -> Result<Ciphertext> {
    seal(key, plaintext.as_bytes(), Purpose::Field).map(Ciphertext)
}

/// Decrypt one record field.
///
/// # Errors
///
/// Returns `DecryptError::AuthenticationOrKeyMismatch` for a wrong key,
/// tampered or truncated data, an unknown version, or non-UTF-8 plaintext.
pub fn decrypt_field(
    ciphertext: &Ciphertext,
    key: &SessionKey,
) -> std::result::Result<String, DecryptError> {
    let plaintext = open(key, ciphertext.as_bytes(), Purpose::Field)?;
    String::from_utf8(plaintext.to_vec()).map_err(|_| DecryptError::AuthenticationOrKeyMismatch)
}

pub(crate) fn seal(key: &SessionKey, plaintext: &[u8], purpose: Purpose) -> Result<Vec<u8>> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce_bytes)
        .map_err(|e| VaultError::Crypto(format!("Failed to generate nonce: {}", e)))?;

    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    let sealed = cipher
        .encrypt(
            XNonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext,
                aad: purpose.aad(),
            },
        )
        .map_err(|e| VaultError::Crypto(format!("Encryption failed: {}", e)))?;

    let mut result = Vec::with_capacity(HEADER_LEN + sealed.len());
    result.push(VERSION_TAG);
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&sealed);
    Ok(result)
}

pub(crate) fn open(
    key: &SessionKey,
    data: &[u8],
    purpose: Purpose,
) -> std::result::Result<Zeroizing<Vec<u8>>, DecryptError> {
    if data.len() < HEADER_LEN + TAG_LEN || data[0] != VERSION_TAG {
        return Err(DecryptError::AuthenticationOrKeyMismatch);
    }

    let (nonce_bytes, sealed) = data[1..].split_at(NONCE_LEN);
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    cipher
        .decrypt(
            XNonce::from_slice(nonce_bytes),
            Payload {
                msg: sealed,
                aad: purpose.aad(),
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| DecryptError::AuthenticationOrKeyMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> SessionKey {
        SessionKey::from_bytes([byte; 32])
    }

    #[test]
    fn test_field_round_trip() {
        let key = key(0x42);
        let encrypted = encrypt_field("hunter2", &key).unwrap();
        assert_eq!(decrypt_field(&encrypted, &key).unwrap(), "hunter2");
    }

    #[test]
    fn test_unicode_round_trip() {
        let key = key(0x42);
        let encrypted = encrypt_field("contraseña 🔐", &key).unwrap();
        assert_eq!(decrypt_field(&encrypted, &key).unwrap(), "contraseña 🔐");
    }

    #[test]
    fn test_empty_field_round_trip() {
        let key = key(0x42);
        let encrypted = encrypt_field("", &key).unwrap();
        assert_eq!(decrypt_field(&encrypted, &key).unwrap(), "");
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = encrypt_field("secret", &key(0x42)).unwrap();
        let result = decrypt_field(&encrypted, &key(0x43));
        assert_eq!(result, Err(DecryptError::AuthenticationOrKeyMismatch));
    }

    #[test]
    fn test_encryption_is_non_deterministic() {
        let key = key(0x42);
        let enc1 = encrypt_field("same input", &key).unwrap();
        let enc2 = encrypt_field("same input", &key).unwrap();
        assert_ne!(enc1, enc2);
        assert_eq!(decrypt_field(&enc1, &key).unwrap(), "same input");
        assert_eq!(decrypt_field(&enc2, &key).unwrap(), "same input");
    }

    #[test]
    fn test_ciphertext_does_not_contain_plaintext() {
        let key = key(0x42);
        let encrypted = encrypt_field("PLAINTEXT_MARKER_123", &key).unwrap();
        let haystack = String::from_utf8_lossy(encrypted.as_bytes());
        assert!(!haystack.contains("PLAINTEXT_MARKER_123"));
        assert_eq!(encrypted.as_bytes()[0], VERSION_TAG);
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = key(0x42);
        let mut bytes = encrypt_field("secret", &key).unwrap().into_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let result = decrypt_field(&Ciphertext::from_bytes(bytes), &key);
        assert_eq!(result, Err(DecryptError::AuthenticationOrKeyMismatch));
    }

    #[test]
    fn test_truncated_and_unknown_version_fail() {
        let key = key(0x42);
        let short = Ciphertext::from_bytes(vec![VERSION_TAG; 20]);
        assert!(decrypt_field(&short, &key).is_err());

        let mut bytes = encrypt_field("secret", &key).unwrap().into_bytes();
        bytes[0] = 0x7f;
        assert!(decrypt_field(&Ciphertext::from_bytes(bytes), &key).is_err());
    }

    #[test]
    fn test_purposes_are_not_interchangeable() {
        let key = key(0x42);
        let field = encrypt_field("secret", &key).unwrap();
        assert!(open(&key, field.as_bytes(), Purpose::Export).is_err());

        let blob = seal(&key, b"secret", Purpose::Export).unwrap();
        assert!(decrypt_field(&Ciphertext::from_bytes(blob), &key).is_err());
    }

    #[test]
    fn test_base64_round_trip_and_garbage() {
        let key = key(0x42);
        let encrypted = encrypt_field("secret", &key).unwrap();
        let parsed = Ciphertext::from_base64(&encrypted.to_base64()).unwrap();
        assert_eq!(parsed, encrypted);

        assert_eq!(
            Ciphertext::from_base64("not base64!!"),
            Err(DecryptError::AuthenticationOrKeyMismatch)
        );
    }

    #[test]
    fn test_ciphertext_debug_hides_bytes() {
        let key = key(0x42);
        let encrypted = encrypt_field("secret", &key).unwrap();
        let debug_output = format!("{:?}", encrypted);
        assert!(debug_output.contains("len"));
        assert!(!debug_output.contains(&hex::encode(&encrypted.as_bytes()[1..5])));
    }
}
