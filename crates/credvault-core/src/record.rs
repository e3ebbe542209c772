//! The plaintext credential record and its encrypted storage form.

use zeroize::Zeroize;

use crate::crypto::{decrypt_field, encrypt_field, SessionKey};
use crate::error::{DecryptError, Result, ValidationError};
use crate::storage::{NewStoredRecord, RecordId, StoredRecord};

/// Tag applied when the user leaves it blank.
pub const DEFAULT_TAG: &str = "personal";

/// A decrypted credential.
///
/// `id` is `None` until the record has been persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct VaultRecord {
    pub id: Option<RecordId>,
    pub service: String,
    pub username: String,
    pub password: String,
    pub tag: String,
}

impl VaultRecord {
    /// Build a record from raw user input.
    ///
    /// All fields are trimmed. Service, username and password are required;
    /// an empty tag becomes [`DEFAULT_TAG`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingRequiredField` naming the first empty
    /// required field.
    pub fn from_input(
        service: &str,
        username: &str,
        password: &str,
        tag: &str,
    ) -> std::result::Result<Self, ValidationError> {
        let service = required("service", service)?;
        let username = required("username", username)?;
        let password = required("password", password)?;
        let tag = match tag.trim() {
            "" => DEFAULT_TAG.to_string(),
            other => other.to_string(),
        };

        Ok(Self {
            id: None,
            service,
            username,
            password,
            tag,
        })
    }

    /// Re-run input validation over an existing record, keeping its id.
    pub fn validated(&self) -> std::result::Result<Self, ValidationError> {
        let mut record =
            Self::from_input(&self.service, &self.username, &self.password, &self.tag)?;
        record.id = self.id;
        Ok(record)
    }

    /// Encrypt every field independently under `key`.
    pub fn to_storage(&self, key: &SessionKey) -> Result<NewStoredRecord> {
        Ok(NewStoredRecord {
            service: encrypt_field(&self.service, key)?,
            username: encrypt_field(&self.username, key)?,
            password: encrypt_field(&self.password, key)?,
            tag: encrypt_field(&self.tag, key)?,
        })
    }

    /// Decrypt a stored record.
    ///
    /// All-or-nothing: if any field fails, no partially decrypted record is
    /// returned.
    pub fn from_storage(
        stored: &StoredRecord,
        key: &SessionKey,
    ) -> std::result::Result<Self, DecryptError> {
        Ok(Self {
            id: Some(stored.id),
            service: decrypt_field(&stored.service, key)?,
            username: decrypt_field(&stored.username, key)?,
            password: decrypt_field(&stored.password, key)?,
            tag: decrypt_field(&stored.tag, key)?,
        })
    }

    /// Case-insensitive substring match on service, username or tag.
    ///
    /// The password never participates. A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.service, &self.username, &self.tag]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl std::fmt::Debug for VaultRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultRecord")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("tag", &self.tag)
            .finish()
    }
}

impl Drop for VaultRecord {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Filter decrypted records with [`VaultRecord::matches`].
pub fn filter_records<'a>(records: &'a [VaultRecord], query: &str) -> Vec<&'a VaultRecord> {
    records.iter().filter(|record| record.matches(query)).collect()
}

fn required(field: &'static str, value: &str) -> std::result::Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingRequiredField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ciphertext;

    fn key(byte: u8) -> SessionKey {
        SessionKey::from_bytes([byte; 32])
    }

    fn sample() -> VaultRecord {
        VaultRecord::from_input("GitHub", "octocat", "hunter2", "work").unwrap()
    }

    #[test]
    fn test_from_input_trims_fields() {
        let record = VaultRecord::from_input("  GitHub ", " octocat", "pw  ", " work ").unwrap();
        assert_eq!(record.service, "GitHub");
        assert_eq!(record.username, "octocat");
        assert_eq!(record.password, "pw");
        assert_eq!(record.tag, "work");
        assert!(record.id.is_none());
    }

    #[test]
    fn test_from_input_defaults_tag() {
        let record = VaultRecord::from_input("GitHub", "octocat", "pw", "   ").unwrap();
        assert_eq!(record.tag, DEFAULT_TAG);
    }

    #[test]
    fn test_from_input_requires_fields() {
        assert_eq!(
            VaultRecord::from_input("", "u", "p", "").unwrap_err(),
            ValidationError::MissingRequiredField("service")
        );
        assert_eq!(
            VaultRecord::from_input("s", " ", "p", "").unwrap_err(),
            ValidationError::MissingRequiredField("username")
        );
        assert_eq!(
            VaultRecord::from_input("s", "u", "", "t").unwrap_err(),
            ValidationError::MissingRequiredField("password")
        );
    }

    #[test]
    fn test_storage_round_trip() {
        let key = key(0x11);
        let record = sample();

        let stored = record.to_storage(&key).unwrap().with_id(RecordId::new(4));
        let decrypted = VaultRecord::from_storage(&stored, &key).unwrap();

        assert_eq!(decrypted.id, Some(RecordId::new(4)));
        assert_eq!(decrypted.service, record.service);
        assert_eq!(decrypted.username, record.username);
        assert_eq!(decrypted.password, record.password);
        assert_eq!(decrypted.tag, record.tag);
    }

    #[test]
    fn test_no_field_stored_in_cleartext() {
        let key = key(0x11);
        let stored = sample().to_storage(&key).unwrap();
        for field in [&stored.service, &stored.username, &stored.password, &stored.tag] {
            let text = String::from_utf8_lossy(field.as_bytes());
            assert!(!text.contains("GitHub"));
            assert!(!text.contains("octocat"));
            assert!(!text.contains("hunter2"));
        }
    }

    #[test]
    fn test_one_bad_field_fails_whole_record() {
        let key = key(0x11);
        let mut stored = sample().to_storage(&key).unwrap().with_id(RecordId::new(1));
        stored.tag = Ciphertext::from_bytes(vec![0u8; 64]);

        let result = VaultRecord::from_storage(&stored, &key);
        assert_eq!(result, Err(DecryptError::AuthenticationOrKeyMismatch));
    }

    #[test]
    fn test_wrong_key_fails() {
        let stored = sample().to_storage(&key(0x11)).unwrap().with_id(RecordId::new(1));
        assert!(VaultRecord::from_storage(&stored, &key(0x22)).is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let record = sample();
        assert!(record.matches("github"));
        assert!(record.matches("OCTO"));
        assert!(record.matches("Wor"));
        assert!(record.matches(""));
        assert!(!record.matches("hunter2"));
        assert!(!record.matches("gitlab"));
    }

    #[test]
    fn test_filter_records() {
        let records = vec![
            sample(),
            VaultRecord::from_input("Bank", "me", "pw", "").unwrap(),
        ];
        let hits = filter_records(&records, "PERSONAL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].service, "Bank");
        assert_eq!(filter_records(&records, "  ").len(), 2);
    }

    #[test]
    fn test_debug_redacts_password() {
        let output = format!("{:?}", sample());
        assert!(output.contains("GitHub"));
        assert!(!output.contains("hunter2"));
    }
}
