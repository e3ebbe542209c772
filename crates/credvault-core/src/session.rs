//! Login sessions.
//!
//! A `Session` owns the one live session key for a login. It is created by
//! [`Session::login`], lent out by reference to every vault and exchange
//! operation, and zeroizes the key when it is logged out or dropped.

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto::{derive_session_key, validate_passphrase, SessionKey};
use crate::error::{Result, VaultError};
use crate::record::VaultRecord;
use crate::storage::RecordStore;
use crate::vault::VaultStore;

/// An authenticated vault session.
#[derive(Debug)]
pub struct Session {
    key: SessionKey,
}

impl Session {
    /// Derive the session key for `passphrase` and prove it against `vault`.
    ///
    /// Surrounding whitespace is trimmed before derivation. The proof is that
    /// every stored record decrypts; those records are returned so the caller
    /// does not have to read the store twice. A vault with no records accepts
    /// any passphrase.
    ///
    /// # Errors
    ///
    /// - `VaultError::InvalidInput` for a blank passphrase
    /// - `VaultError::WrongKeyOrCorruptStore` when the store cannot be fully
    ///   decrypted; no finer diagnosis is given
    pub async fn login<S: RecordStore>(
        passphrase: &str,
        vault: &VaultStore<S>,
    ) -> Result<(Self, Vec<VaultRecord>)> {
        validate_passphrase(passphrase)?;

        // Argon2id is deliberately slow; keep it off the async worker threads.
        let passphrase = Zeroizing::new(passphrase.trim().to_string());
        let key = tokio::task::spawn_blocking(move || derive_session_key(&passphrase))
            .await
            .map_err(|e| VaultError::Crypto(format!("Key derivation task failed: {}", e)))??;

        match vault.list_all(&key).await {
            Ok(records) => {
                info!(count = records.len(), "vault unlocked");
                Ok((Self { key }, records))
            }
            Err(VaultError::WrongKeyOrCorruptStore) => {
                debug!("vault unlock failed");
                Err(VaultError::WrongKeyOrCorruptStore)
            }
            Err(err) => Err(err),
        }
    }

    /// Borrow the session key for cipher operations.
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// End the session, overwriting the key bytes.
    pub fn logout(self) {
        info!("vault locked");
        drop(self);
    }
}
