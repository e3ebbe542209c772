//! In-memory storage backend.
//!
//! Useful for tests and for callers that bring their own persistence. The
//! whole collection sits behind one mutex, so every operation is atomic with
//! respect to every other.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Result, VaultError};
use crate::storage::traits::RecordStore;
use crate::storage::types::{NewStoredRecord, RecordId, StoredRecord};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<RecordId, StoredRecord>,
    // Never reset, so identifiers survive clear/replace without reuse.
    last_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> RecordId {
        self.last_id += 1;
        RecordId::new(self.last_id)
    }
}

/// Record store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| VaultError::Storage("Memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put_record(&self, record: NewStoredRecord) -> Result<RecordId> {
        let mut inner = self.lock()?;
        let id = inner.next_id();
        inner.records.insert(id, record.with_id(id));
        Ok(id)
    }

    async fn get_all_records(&self) -> Result<Vec<StoredRecord>> {
        let inner = self.lock()?;
        Ok(inner.records.values().cloned().collect())
    }

    async fn delete_record(&self, id: RecordId) -> Result<()> {
        self.lock()?.records.remove(&id);
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.lock()?.records.clear();
        Ok(())
    }

    async fn replace_all(&self, records: Vec<NewStoredRecord>) -> Result<Vec<RecordId>> {
        let mut inner = self.lock()?;
        let mut replacement = BTreeMap::new();
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            let id = inner.next_id();
            replacement.insert(id, record.with_id(id));
            ids.push(id);
        }
        inner.records = replacement;
        Ok(ids)
    }
}
