//! Encrypted export and import of record sets.
//!
//! An export is a JSON array of `{service, username, password, tag}` objects,
//! encrypted once as a whole under the current session key. There is no
//! separate export passphrase: a blob can only be imported by a session that
//! derives the same key. Identifiers are not exported; they are reassigned
//! when the records are inserted again.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::cipher::{open, seal, Purpose};
use crate::crypto::SessionKey;
use crate::error::{ImportError, Result, VaultError};
use crate::record::VaultRecord;
use crate::storage::RecordId;

#[derive(Serialize)]
struct ExportEntry<'a> {
    service: &'a str,
    username: &'a str,
    password: &'a str,
    tag: &'a str,
}

// Unknown keys (such as an `id` written by other tools) are ignored.
#[derive(Deserialize)]
struct ImportEntry {
    service: String,
    username: String,
    password: String,
    #[serde(default)]
    tag: String,
}

/// Serialize `records` and encrypt the payload as a single blob.
pub fn export_blob(records: &[VaultRecord], key: &SessionKey) -> Result<Vec<u8>> {
    let entries: Vec<ExportEntry<'_>> = records
        .iter()
        .map(|record| ExportEntry {
            service: &record.service,
            username: &record.username,
            password: &record.password,
            tag: &record.tag,
        })
        .collect();

    let payload = Zeroizing::new(
        serde_json::to_vec(&entries)
            .map_err(|e| VaultError::Crypto(format!("Failed to serialize export: {}", e)))?,
    );
    let blob = seal(key, &payload, Purpose::Export)?;
    debug!(count = records.len(), bytes = blob.len(), "exported records");
    Ok(blob)
}

/// Decrypt and parse an export blob.
///
/// The returned records carry no identifiers. Import replaces rather than
/// merges: pass the result to [`VaultStore::replace_all`](crate::VaultStore::replace_all).
///
/// # Errors
///
/// - `ImportError::DecryptionFailed`: wrong key or corrupted blob
/// - `ImportError::MalformedPayload`: decrypts, but is not an array of valid
///   record objects
pub fn import_blob(bytes: &[u8], key: &SessionKey) -> std::result::Result<Vec<VaultRecord>, ImportError> {
    let payload = open(key, bytes, Purpose::Export)?;

    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| ImportError::MalformedPayload(format!("invalid JSON: {}", e)))?;
    if !value.is_array() {
        return Err(ImportError::MalformedPayload(
            "expected an array of records".to_string(),
        ));
    }

    let entries: Vec<ImportEntry> = serde_json::from_value(value)
        .map_err(|e| ImportError::MalformedPayload(format!("invalid record: {}", e)))?;

    let records = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            VaultRecord::from_input(&entry.service, &entry.username, &entry.password, &entry.tag)
                .map_err(|e| ImportError::MalformedPayload(format!("record {}: {}", index, e)))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(count = records.len(), "imported records");
    Ok(records)
}

/// Pick the records named by `ids`, preserving the order of `records`.
///
/// # Errors
///
/// Returns `VaultError::RecordNotFound` for the first id with no matching record.
pub fn select_records(records: &[VaultRecord], ids: &[RecordId]) -> Result<Vec<VaultRecord>> {
    let wanted: HashSet<RecordId> = ids.iter().copied().collect();
    let selected: Vec<VaultRecord> = records
        .iter()
        .filter(|record| record.id.is_some_and(|id| wanted.contains(&id)))
        .cloned()
        .collect();

    if let Some(missing) = ids
        .iter()
        .find(|id| !records.iter().any(|record| record.id == Some(**id)))
    {
        return Err(VaultError::RecordNotFound(*missing));
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encrypt_field;
    use crate::record::DEFAULT_TAG;

    fn key(byte: u8) -> SessionKey {
        SessionKey::from_bytes([byte; 32])
    }

    fn record(id: i64, service: &str) -> VaultRecord {
        let mut record = VaultRecord::from_input(service, "user", "secret", "").unwrap();
        record.id = Some(RecordId::new(id));
        record
    }

    fn seal_json(json: &str, key: &SessionKey) -> Vec<u8> {
        seal(key, json.as_bytes(), Purpose::Export).unwrap()
    }

    #[test]
    fn test_round_trip_drops_ids() {
        let key = key(3);
        let records = vec![record(1, "GitHub"), record(2, "Bank")];

        let blob = export_blob(&records, &key).unwrap();
        let imported = import_blob(&blob, &key).unwrap();

        assert_eq!(imported.len(), 2);
        assert!(imported.iter().all(|r| r.id.is_none()));
        assert_eq!(imported[0].service, "GitHub");
        assert_eq!(imported[1].service, "Bank");
        assert_eq!(imported[1].password, "secret");
        assert_eq!(imported[1].tag, DEFAULT_TAG);
    }

    #[test]
    fn test_blob_hides_plaintext() {
        let key = key(3);
        let blob = export_blob(&[record(1, "MARKER_SERVICE")], &key).unwrap();
        assert!(!String::from_utf8_lossy(&blob).contains("MARKER_SERVICE"));
    }

    #[test]
    fn test_wrong_key_is_decryption_failure() {
        let blob = export_blob(&[record(1, "GitHub")], &key(3)).unwrap();
        assert!(matches!(
            import_blob(&blob, &key(4)),
            Err(ImportError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_garbage_is_decryption_failure() {
        assert!(matches!(
            import_blob(b"definitely not a blob", &key(3)),
            Err(ImportError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_field_ciphertext_is_not_a_blob() {
        let key = key(3);
        let field = encrypt_field("[]", &key).unwrap();
        assert!(matches!(
            import_blob(field.as_bytes(), &key),
            Err(ImportError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_non_array_is_malformed() {
        let key = key(3);
        let blob = seal_json(r#"{"service":"x"}"#, &key);
        assert!(matches!(
            import_blob(&blob, &key),
            Err(ImportError::MalformedPayload(_))
        ));

        let blob = seal_json("not json", &key);
        assert!(matches!(
            import_blob(&blob, &key),
            Err(ImportError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_invalid_entries_are_malformed() {
        let key = key(3);
        let blob = seal_json(r#"[{"service":"x","username":"u"}]"#, &key);
        assert!(matches!(
            import_blob(&blob, &key),
            Err(ImportError::MalformedPayload(_))
        ));

        let blob = seal_json(r#"[{"service":"x","username":"u","password":""}]"#, &key);
        assert!(matches!(
            import_blob(&blob, &key),
            Err(ImportError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_extra_keys_and_missing_tag_accepted() {
        let key = key(3);
        let blob = seal_json(
            r#"[{"id":12,"service":"x","username":"u","password":"p"}]"#,
            &key,
        );
        let records = import_blob(&blob, &key).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tag, DEFAULT_TAG);
        assert!(records[0].id.is_none());
    }

    #[test]
    fn test_empty_export() {
        let key = key(3);
        let blob = export_blob(&[], &key).unwrap();
        assert!(import_blob(&blob, &key).unwrap().is_empty());
    }

    #[test]
    fn test_select_records_preserves_list_order() {
        let records = vec![record(1, "A"), record(2, "B"), record(3, "C")];
        let selected =
            select_records(&records, &[RecordId::new(3), RecordId::new(1)]).unwrap();
        let services: Vec<&str> = selected.iter().map(|r| r.service.as_str()).collect();
        assert_eq!(services, vec!["A", "C"]);
    }

    #[test]
    fn test_select_records_unknown_id() {
        let records = vec![record(1, "A")];
        let result = select_records(&records, &[RecordId::new(1), RecordId::new(9)]);
        assert!(matches!(result, Err(VaultError::RecordNotFound(id)) if id == RecordId::new(9)));
    }
}
