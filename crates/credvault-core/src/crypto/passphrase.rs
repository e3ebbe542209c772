//! Passphrase validation at the login boundary.

use crate::error::{Result, VaultError};

/// Validate a master passphrase before deriving a key from it.
///
/// The vault has no verifier value, so there is no length policy to enforce
/// against an existing vault: any non-blank passphrase is accepted here and
/// proven (or disproven) by decrypting the store.
///
/// # Examples
///
/// ```
/// use credvault_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("correct horse").is_ok());
/// assert!(validate_passphrase("   ").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(VaultError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    Ok(())
}
