//! Error types for Credvault core operations.
//!
//! The taxonomy keeps key problems and format problems apart:
//! - `ValidationError`: bad user input, recoverable by the caller
//! - `DecryptError`: wrong key or corrupted ciphertext (never distinguished)
//! - `VaultError`: store-level failures, including bulk decrypt failures
//! - `ImportError`: undecryptable blob vs decryptable-but-malformed payload
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

use crate::storage::RecordId;

/// Result type alias for Credvault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Invalid record input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty after trimming.
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
}

/// Decryption failure.
///
/// Wrong key, tampering, truncation and unknown formats all collapse into the
/// single variant so callers cannot learn which one occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptError {
    #[error("Decryption failed: incorrect key or corrupted data")]
    AuthenticationOrKeyMismatch,
}

/// Core error type for vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Record input failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// At least one stored record could not be decrypted with the session key
    #[error("Incorrect key or corrupted store")]
    WrongKeyOrCorruptStore,

    /// Vault database file not found
    #[error("Vault not found")]
    VaultNotFound,

    /// No record with the given identifier
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// Key derivation or encryption error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<DecryptError> for VaultError {
    fn from(_: DecryptError) -> Self {
        VaultError::WrongKeyOrCorruptStore
    }
}

/// Failure while reading an export blob.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The blob does not decrypt under the session key
    #[error("Import failed: incorrect key or corrupted file")]
    DecryptionFailed,

    /// The blob decrypts but is not a list of records
    #[error("Import failed: malformed payload ({0})")]
    MalformedPayload(String),
}

impl From<DecryptError> for ImportError {
    fn from(_: DecryptError) -> Self {
        ImportError::DecryptionFailed
    }
}
