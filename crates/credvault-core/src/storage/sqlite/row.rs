//! Record row type for database queries.

use crate::crypto::Ciphertext;
use crate::error::{Result, VaultError};
use crate::storage::types::{RecordId, StoredRecord};

/// Raw row data from the records table, before parsing into domain types.
#[derive(Debug)]
pub struct RecordRow {
    pub id: i64,
    pub service: String,
    pub username: String,
    pub password: String,
    pub tag: String,
}

impl TryFrom<RecordRow> for StoredRecord {
    type Error = VaultError;

    // A column that is not valid base64 is corruption, reported exactly like
    // a ciphertext that fails to authenticate.
    fn try_from(row: RecordRow) -> Result<Self> {
        Ok(StoredRecord {
            id: RecordId::new(row.id),
            service: Ciphertext::from_base64(&row.service)?,
            username: Ciphertext::from_base64(&row.username)?,
            password: Ciphertext::from_base64(&row.password)?,
            tag: Ciphertext::from_base64(&row.tag)?,
        })
    }
}
