//! Output formatting helpers for the CLI.

use std::io::IsTerminal;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use credvault_core::VaultRecord;

/// Shown in place of a password that was not asked for.
pub const PASSWORD_MASK: &str = "********";

fn id_text(record: &VaultRecord) -> String {
    record
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Convert a record to JSON for output. The password is masked unless
/// `reveal` is set.
pub fn record_json(record: &VaultRecord, reveal: bool) -> serde_json::Value {
    let password = if reveal {
        record.password.as_str()
    } else {
        PASSWORD_MASK
    };
    serde_json::json!({
        "id": record.id,
        "service": record.service,
        "username": record.username,
        "password": password,
        "tag": record.tag,
    })
}

/// Convert multiple records to a JSON array with masked passwords.
pub fn records_json(records: &[&VaultRecord]) -> Vec<serde_json::Value> {
    records
        .iter()
        .map(|record| record_json(record, false))
        .collect()
}

/// Render records as a table for a terminal, or as tab-separated lines
/// otherwise. Passwords are always masked.
pub fn records_table(records: &[&VaultRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                id_text(r),
                r.service.clone(),
                r.username.clone(),
                PASSWORD_MASK.to_string(),
                r.tag.clone(),
            ]
        })
        .collect();

    if !std::io::stdout().is_terminal() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Service", "Username", "Password", "Tag"]);
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Print a single record in human-readable format.
pub fn print_record(record: &VaultRecord, reveal: bool, quiet: bool) {
    if quiet {
        if reveal {
            println!("{}", record.password);
        }
        return;
    }
    println!("ID: {}", id_text(record));
    println!("Service: {}", record.service);
    println!("Username: {}", record.username);
    if reveal {
        println!("Password: {}", record.password);
    } else {
        println!("Password: {}", PASSWORD_MASK);
    }
    println!("Tag: {}", record.tag);
}
