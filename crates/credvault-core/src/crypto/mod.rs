//! Cryptographic operations for Credvault.
//!
//! This module provides key derivation and field encryption using
//! well-audited libraries:
//! - **Argon2id**: Memory-hard key derivation function
//! - **XChaCha20-Poly1305**: Authenticated encryption (AEAD)
//!
//! ## Security Model
//!
//! - One session key per login, derived from the passphrase and a fixed salt
//! - Every record field encrypted independently with a fresh random nonce
//! - Export blobs encrypted as a single payload under the same key
//! - Key material zeroized from memory on drop
//! - No passphrase, key, or verifier value is ever persisted
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the vault database or an export file
//! - Tampering with stored ciphertext
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory
//! - Precomputation across installations (the salt is a shared constant)

pub mod cipher;
pub mod key;
pub mod passphrase;

pub use cipher::{decrypt_field, encrypt_field, Ciphertext};
pub use key::{derive_key, derive_session_key, SessionKey, VAULT_SALT};
pub use passphrase::validate_passphrase;
