//! # Credvault Core
//!
//! Core library for Credvault - a local, single-user encrypted credential vault.
//!
//! This crate provides the cryptographic vault engine independent of the CLI
//! interface.
//!
//! ## Architecture
//!
//! - **crypto**: Argon2id session key derivation and XChaCha20-Poly1305 field encryption
//! - **record**: The plaintext credential record, validation, and filtering
//! - **storage**: The persistence trait and its SQLite / in-memory backends
//! - **vault**: CRUD façade enforcing encrypt-on-write / decrypt-on-read
//! - **session**: Login and the lifetime of the session key
//! - **exchange**: Encrypted export / import blobs
//!
//! ## Example
//!
//! ```no_run
//! use credvault_core::{Session, SqliteRecordStore, VaultRecord, VaultStore};
//!
//! # async fn run() -> credvault_core::Result<()> {
//! let vault = VaultStore::new(SqliteRecordStore::open(std::path::Path::new("vault.db"))?);
//! let (session, _records) = Session::login("correct horse", &vault).await?;
//! let record = VaultRecord::from_input("GitHub", "octocat", "hunter2", "")?;
//! vault.create(record, session.key()).await?;
//! session.logout();
//! # Ok(())
//! # }
//! ```

pub mod crypto;
pub mod error;
pub mod exchange;
pub mod fs;
pub mod record;
pub mod session;
pub mod storage;
pub mod vault;

pub use crypto::SessionKey;
pub use error::{DecryptError, ImportError, Result, ValidationError, VaultError};
pub use exchange::{export_blob, import_blob, select_records};
pub use record::{filter_records, VaultRecord, DEFAULT_TAG};
pub use session::Session;
pub use storage::{MemoryRecordStore, RecordId, RecordStore, SqliteRecordStore};
pub use vault::VaultStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
