//! The vault façade: encrypt on write, decrypt on read.
//!
//! `VaultStore` is the only component that talks to the persistence
//! collaborator. Callers hand it plaintext records and a session key; the
//! collaborator only ever sees ciphertext.

use tracing::{debug, info};

use crate::crypto::SessionKey;
use crate::error::{Result, VaultError};
use crate::record::VaultRecord;
use crate::storage::{RecordId, RecordStore};

/// CRUD façade over a [`RecordStore`].
pub struct VaultStore<S> {
    store: S,
}

impl<S: RecordStore> VaultStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and decrypt every record.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::WrongKeyOrCorruptStore` if any single record fails
    /// to decrypt; no partial list is ever returned.
    pub async fn list_all(&self, key: &SessionKey) -> Result<Vec<VaultRecord>> {
        let stored = self.store.get_all_records().await?;
        let records = stored
            .iter()
            .map(|record| VaultRecord::from_storage(record, key))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(count = records.len(), "decrypted vault records");
        Ok(records)
    }

    /// Fetch one record by identifier.
    pub async fn get(&self, id: RecordId, key: &SessionKey) -> Result<VaultRecord> {
        self.list_all(key)
            .await?
            .into_iter()
            .find(|record| record.id == Some(id))
            .ok_or(VaultError::RecordNotFound(id))
    }

    /// Validate, encrypt and persist a new record.
    ///
    /// Any `id` on the input is ignored; the store assigns a fresh one.
    pub async fn create(&self, input: VaultRecord, key: &SessionKey) -> Result<RecordId> {
        let record = input.validated()?;
        let stored = record.to_storage(key)?;
        let id = self.store.put_record(stored).await?;
        debug!(%id, "created vault record");
        Ok(id)
    }

    /// Delete a record. Deleting a missing identifier succeeds.
    pub async fn delete(&self, id: RecordId) -> Result<()> {
        self.store.delete_record(id).await?;
        debug!(%id, "deleted vault record");
        Ok(())
    }

    /// Replace the whole collection with `records`, re-encrypted under `key`.
    ///
    /// Every record is validated and encrypted before storage is touched, and
    /// the swap itself is a single store transaction. On any error the
    /// existing collection is unchanged.
    pub async fn replace_all(&self, records: Vec<VaultRecord>, key: &SessionKey) -> Result<()> {
        let staged = records
            .iter()
            .map(|record| record.validated()?.to_storage(key))
            .collect::<Result<Vec<_>>>()?;

        let ids = self.store.replace_all(staged).await?;
        info!(count = ids.len(), "replaced vault contents");
        Ok(())
    }
}
