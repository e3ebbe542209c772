//! Core data types for the storage layer.
//!
//! These are the shapes the persistence collaborator sees: identifiers and
//! ciphertext only, never plaintext.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::Ciphertext;

/// Identifier of a stored record.
///
/// Assigned by the store on insert, increasing, and never reused within the
/// lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A persisted record: every field encrypted independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: RecordId,
    pub service: Ciphertext,
    pub username: Ciphertext,
    pub password: Ciphertext,
    pub tag: Ciphertext,
}

/// An encrypted record that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStoredRecord {
    pub service: Ciphertext,
    pub username: Ciphertext,
    pub password: Ciphertext,
    pub tag: Ciphertext,
}

impl NewStoredRecord {
    /// Attach the identifier the store assigned.
    pub fn with_id(self, id: RecordId) -> StoredRecord {
        StoredRecord {
            id,
            service: self.service,
            username: self.username,
            password: self.password,
            tag: self.tag,
        }
    }
}
