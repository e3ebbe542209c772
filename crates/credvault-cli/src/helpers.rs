//! Input and parsing helper functions for the CLI.

use dialoguer::{Confirm, Password};
use zeroize::Zeroizing;

use credvault_core::RecordId;

use crate::constants::{PASSPHRASE_CONFIRM_ENV, PASSPHRASE_ENV};
use crate::errors::CliError;

/// Read the passphrase from `CREDVAULT_PASSPHRASE`, if set and non-blank.
pub fn env_passphrase() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Zeroizing::new)
}

/// Prompt for the vault passphrase.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No passphrase provided and no TTY available. Set {}.",
            PASSPHRASE_ENV
        ))
        .into());
    }
    Password::new()
        .with_prompt("Passphrase")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Confirm the passphrase that is about to key an empty vault.
///
/// `CREDVAULT_PASSPHRASE_CONFIRM` answers non-interactively; otherwise the
/// user is asked to type the passphrase again. Without either, the write is
/// refused.
pub fn confirm_new_passphrase(passphrase: &str, interactive: bool) -> anyhow::Result<()> {
    let confirmation = match std::env::var(PASSPHRASE_CONFIRM_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        Some(value) => Zeroizing::new(value),
        None if interactive => {
            eprintln!("This vault is empty; the passphrase you just entered will protect it.");
            Password::new()
                .with_prompt("Confirm passphrase")
                .interact()
                .map(Zeroizing::new)
                .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?
        }
        None => return Err(CliError::passphrase_not_confirmed(false).into()),
    };

    if !passphrases_match(passphrase, &confirmation) {
        return Err(CliError::passphrase_not_confirmed(true).into());
    }
    Ok(())
}

/// Compare two passphrases the way login sees them, ignoring surrounding
/// whitespace.
pub fn passphrases_match(first: &str, second: &str) -> bool {
    first.trim() == second.trim()
}

/// Prompt for a credential password with confirmation.
pub fn prompt_record_password(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if !interactive {
        return Err(CliError::invalid_input(
            "No password provided and no TTY available. Pass --password.",
        )
        .into());
    }
    Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Parse a record ID argument.
pub fn parse_record_id(value: &str) -> anyhow::Result<RecordId> {
    value.parse::<RecordId>().map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid record ID: {} (expected a number, see `credvault list`)",
            value.trim()
        ))
        .into()
    })
}

/// Parse several record ID arguments, keeping their order.
pub fn parse_record_ids(values: &[String]) -> anyhow::Result<Vec<RecordId>> {
    values.iter().map(|v| parse_record_id(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id(" 42 ").unwrap(), RecordId::new(42));
    }

    #[test]
    fn test_parse_record_id_rejects_garbage() {
        let err = parse_record_id("abc").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_record_ids_keeps_order() {
        let ids = parse_record_ids(&["3".to_string(), "1".to_string()]).unwrap();
        assert_eq!(ids, vec![RecordId::new(3), RecordId::new(1)]);
    }

    #[test]
    fn test_passphrases_match_ignores_surrounding_whitespace() {
        assert!(passphrases_match("correct-horse", " correct-horse\n"));
        assert!(!passphrases_match("correct-horse", "correct-horze"));
    }

    #[test]
    fn test_non_interactive_prompts_fail() {
        assert!(prompt_passphrase(false).is_err());
        assert!(prompt_record_password(false).is_err());
    }
}
