//! Persistence collaborator trait.
//!
//! The `RecordStore` trait is the only interface between the vault engine and
//! the storage engine. Implementations see ciphertext and identifiers only, so
//! they can neither read nor filter on record contents.

use async_trait::async_trait;

use super::types::{NewStoredRecord, RecordId, StoredRecord};
use crate::error::Result;

/// Storage interface for encrypted vault records.
///
/// All implementations must ensure:
/// - Identifiers increase and are never reused, even after `clear_all`
/// - `get_all_records` observes a consistent snapshot
/// - `replace_all` is a single unit of work: on failure the previous
///   collection is left intact, and readers never see it half-replaced
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record and return its newly assigned identifier.
    async fn put_record(&self, record: NewStoredRecord) -> Result<RecordId>;

    /// Fetch every stored record, ordered by identifier.
    async fn get_all_records(&self) -> Result<Vec<StoredRecord>>;

    /// Delete a record by identifier.
    ///
    /// Deleting an identifier that does not exist is not an error.
    async fn delete_record(&self, id: RecordId) -> Result<()>;

    /// Delete every record.
    async fn clear_all(&self) -> Result<()>;

    /// Atomically replace the whole collection with `records`.
    ///
    /// # Returns
    ///
    /// Returns the identifiers assigned to the new records, in input order.
    async fn replace_all(&self, records: Vec<NewStoredRecord>) -> Result<Vec<RecordId>>;
}
