//! Typed CLI failures and their exit codes.
//!
//! Each constructor names one way a credvault command can fail and carries
//! the hint shown underneath the message. Core errors are translated here by
//! [`vault_error`] and [`import_error`].

use std::fmt;
use std::path::Path;

use credvault_core::{ImportError, RecordId, VaultError};

use crate::constants::{exit_codes, PASSPHRASE_CONFIRM_ENV};

#[derive(Debug)]
pub enum CliError {
    /// A vault, record or file the command needs does not exist.
    NotFound {
        message: String,
        hint: Option<String>,
    },

    /// The passphrase could not unlock the vault or an export file.
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    InvalidInput {
        message: String,
        hint: Option<String>,
    },
}

impl CliError {
    pub fn vault_not_found(path: &Path) -> Self {
        CliError::NotFound {
            message: format!("No vault found at {}", path.display()),
            hint: Some(
                "Run `credvault init`, or point at an existing vault with \
                 --vault / CREDVAULT_PATH."
                    .to_string(),
            ),
        }
    }

    pub fn record_not_found(id: RecordId) -> Self {
        CliError::NotFound {
            message: format!("Record {} not found.", id),
            hint: Some("Run `credvault list` to find record IDs.".to_string()),
        }
    }

    pub fn import_file_not_found(path: &Path) -> Self {
        CliError::NotFound {
            message: format!("Import file not found: {}", path.display()),
            hint: Some("Create one with `credvault export --out FILE --all`.".to_string()),
        }
    }

    /// The generic unlock failure. Wrong passphrase and corruption are never
    /// told apart.
    pub fn wrong_key() -> Self {
        CliError::AuthFailed {
            message: "Incorrect key or corrupted store.".to_string(),
            hint: None,
        }
    }

    pub fn too_many_attempts() -> Self {
        CliError::AuthFailed {
            message: "Too many failed passphrase attempts.".to_string(),
            hint: Some(
                "A forgotten passphrase cannot be recovered. Exports use the same passphrase."
                    .to_string(),
            ),
        }
    }

    pub fn import_undecryptable() -> Self {
        CliError::AuthFailed {
            message: "Import file could not be decrypted.".to_string(),
            hint: Some(
                "Exports can only be imported with the passphrase that created them.".to_string(),
            ),
        }
    }

    /// The first passphrase used on an empty vault was not confirmed.
    pub fn passphrase_not_confirmed(mismatch: bool) -> Self {
        let message = if mismatch {
            "Passphrases do not match. Nothing was written."
        } else {
            "This vault is empty, so this passphrase will become its key and must be confirmed."
        };
        CliError::InvalidInput {
            message: message.to_string(),
            hint: Some(format!(
                "Re-run in a terminal, or set {} to the same passphrase.",
                PASSPHRASE_CONFIRM_ENV
            )),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput { .. } => exit_codes::INVALID_INPUT,
        }
    }

    /// Print the error to stderr and terminate with its exit code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (CliError::NotFound { message, hint }
        | CliError::AuthFailed { message, hint }
        | CliError::InvalidInput { message, hint }) = self;
        write!(f, "{}", message)?;
        if let Some(hint) = hint {
            write!(f, "\nHint: {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for CliError {}

/// Translate a core error into the CLI's exit-code taxonomy.
///
/// Variants without a dedicated exit code pass through as plain errors.
pub fn vault_error(err: VaultError) -> anyhow::Error {
    match err {
        VaultError::Validation(inner) => CliError::invalid_input(inner.to_string()).into(),
        VaultError::InvalidInput(message) => CliError::invalid_input(message).into(),
        VaultError::RecordNotFound(id) => CliError::record_not_found(id).into(),
        VaultError::VaultNotFound => CliError::NotFound {
            message: "No vault found.".to_string(),
            hint: Some("Run `credvault init` to create one.".to_string()),
        }
        .into(),
        VaultError::WrongKeyOrCorruptStore => CliError::wrong_key().into(),
        other => other.into(),
    }
}

/// Translate an import failure.
pub fn import_error(err: ImportError) -> anyhow::Error {
    match err {
        ImportError::DecryptionFailed => CliError::import_undecryptable().into(),
        ImportError::MalformedPayload(detail) => {
            CliError::invalid_input(format!("Import file is malformed: {}", detail)).into()
        }
    }
}
