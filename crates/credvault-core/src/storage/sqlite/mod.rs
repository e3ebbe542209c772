//! SQLite storage backend.
//!
//! Records live in a plain SQLite database whose columns hold base64
//! ciphertext; confidentiality comes from field encryption, not from the
//! database file. Blocking SQLite calls run on tokio's blocking pool behind a
//! single connection mutex, which also serializes every unit of work.

mod row;

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Result, VaultError};
use crate::storage::traits::RecordStore;
use crate::storage::types::{NewStoredRecord, RecordId, StoredRecord};

use row::RecordRow;

/// SQLite-backed record store.
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    const FORMAT_VERSION: &'static str = "1";

    const INSERT_RECORD: &'static str =
        "INSERT INTO records (service, username, password, tag) VALUES (?1, ?2, ?3, ?4)";

    /// Create a new, empty vault database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Storage` if the file already exists.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(VaultError::Storage(format!(
                "Vault file already exists: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        Self::initialize(&conn)?;
        debug!(path = %path.display(), "created vault database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an existing vault database.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::VaultNotFound` if the file does not exist, or
    /// `VaultError::Storage` if it is not a vault of a supported format.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VaultError::VaultNotFound);
        }

        let conn = Connection::open(path)?;
        Self::check_format(&conn)?;
        debug!(path = %path.display(), "opened vault database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a fresh database that lives only in memory.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize(conn: &Connection) -> Result<()> {
        // AUTOINCREMENT keeps identifiers from being reused after deletes.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                service TEXT NOT NULL,
                username TEXT NOT NULL,
                password TEXT NOT NULL,
                tag TEXT NOT NULL
            );
            "#,
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?1)",
            [Self::FORMAT_VERSION],
        )?;
        Self::check_format(conn)
    }

    fn check_format(conn: &Connection) -> Result<()> {
        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| VaultError::Storage(format!("Not a vault database: {}", e)))?;

        match version.as_deref() {
            Some(Self::FORMAT_VERSION) => Ok(()),
            Some(other) => Err(VaultError::Storage(format!(
                "Unsupported vault format version: {}",
                other
            ))),
            None => Err(VaultError::Storage(
                "Vault format version missing".to_string(),
            )),
        }
    }

    fn insert(conn: &Connection, record: &NewStoredRecord) -> Result<RecordId> {
        conn.execute(
            Self::INSERT_RECORD,
            params![
                record.service.to_base64(),
                record.username.to_base64(),
                record.password.to_base64(),
                record.tag.to_base64(),
            ],
        )?;
        Ok(RecordId::new(conn.last_insert_rowid()))
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| VaultError::Storage("SQLite connection lock poisoned".to_string()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| VaultError::Storage(format!("Storage task failed: {}", e)))?
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn put_record(&self, record: NewStoredRecord) -> Result<RecordId> {
        self.with_conn(move |conn| Self::insert(conn, &record)).await
    }

    async fn get_all_records(&self) -> Result<Vec<StoredRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, service, username, password, tag FROM records ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(RecordRow {
                    id: row.get(0)?,
                    service: row.get(1)?,
                    username: row.get(2)?,
                    password: row.get(3)?,
                    tag: row.get(4)?,
                })
            })?;

            let mut records = Vec::new();
            for row in rows {
                records.push(StoredRecord::try_from(row?)?);
            }
            Ok(records)
        })
        .await
    }

    async fn delete_record(&self, id: RecordId) -> Result<()> {
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM records WHERE id = ?1", [id.get()])?;
            Ok(())
        })
        .await
    }

    async fn clear_all(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM records", [])?;
            Ok(())
        })
        .await
    }

    async fn replace_all(&self, records: Vec<NewStoredRecord>) -> Result<Vec<RecordId>> {
        self.with_conn(move |conn| {
            // Dropping the transaction without commit rolls back to the old collection.
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM records", [])?;

            let mut ids = Vec::with_capacity(records.len());
            for record in &records {
                ids.push(Self::insert(&tx, record)?);
            }

            tx.commit()?;
            debug!(count = ids.len(), "replaced vault records");
            Ok(ids)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ciphertext;

    fn record(byte: u8) -> NewStoredRecord {
        NewStoredRecord {
            service: Ciphertext::from_bytes(vec![byte, 1]),
            username: Ciphertext::from_bytes(vec![byte, 2]),
            password: Ciphertext::from_bytes(vec![byte, 3]),
            tag: Ciphertext::from_bytes(vec![byte, 4]),
        }
    }

    #[tokio::test]
    async fn test_put_and_get_all() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let first = store.put_record(record(1)).await.unwrap();
        let second = store.put_record(record(2)).await.unwrap();
        assert!(second > first);

        let records = store.get_all_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record(1).with_id(first));
        assert_eq!(records[1], record(2).with_id(second));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        store.put_record(record(1)).await.unwrap();

        store.delete_record(RecordId::new(999)).await.unwrap();
        assert_eq!(store.get_all_records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_clear() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let first = store.put_record(record(1)).await.unwrap();
        store.clear_all().await.unwrap();
        assert!(store.get_all_records().await.unwrap().is_empty());

        let next = store.put_record(record(2)).await.unwrap();
        assert!(next > first);
    }

    #[tokio::test]
    async fn test_replace_all_swaps_collection() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let old = store.put_record(record(1)).await.unwrap();

        let ids = store
            .replace_all(vec![record(5), record(6)])
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|id| *id > old));

        let records = store.get_all_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].service, record(5).service);
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.db");
        SqliteRecordStore::create(&path).unwrap();

        let result = SqliteRecordStore::create(&path);
        assert!(matches!(result, Err(VaultError::Storage(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteRecordStore::open(&dir.path().join("missing.db"));
        assert!(matches!(result, Err(VaultError::VaultNotFound)));
    }

    #[test]
    fn test_open_rejects_foreign_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE notes (body TEXT);").unwrap();
        drop(conn);

        let result = SqliteRecordStore::open(&path);
        assert!(matches!(result, Err(VaultError::Storage(_))));
    }
}
