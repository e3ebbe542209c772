//! Storage abstraction for Credvault.
//!
//! This module defines the `RecordStore` trait (the persistence collaborator)
//! and the ciphertext-only types that cross it.
//!
//! ## Architecture
//!
//! The vault engine is backend-agnostic:
//! - `SqliteRecordStore`: a SQLite database file (or in-memory database)
//! - `MemoryRecordStore`: a process-local map, for tests and embedding
//!
//! ## Security
//!
//! Storage engines only ever receive ciphertext. Encryption, decryption and
//! plaintext filtering happen above this layer in `VaultStore`.

pub mod memory;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;
pub use traits::RecordStore;
pub use types::{NewStoredRecord, RecordId, StoredRecord};
