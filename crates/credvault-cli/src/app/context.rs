//! Application context for the Credvault CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::cell::OnceCell;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::VaultConfig;
use crate::constants::DEFAULT_PASSPHRASE_ATTEMPTS;

use super::passphrase::{unlock_vault_with_retry, Access, UnlockedVault};
use super::resolver::{load_config, resolve_vault_path};

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<VaultConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily. `None` when no
    /// config file exists yet.
    pub fn config(&self) -> anyhow::Result<Option<&VaultConfig>> {
        if self.config.get().is_none() {
            let loaded = load_config()?;
            let _ = self.config.set(loaded);
        }
        Ok(self.config.get().and_then(Option::as_ref))
    }

    /// Path of the vault this invocation operates on.
    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        resolve_vault_path(self.cli, self.config()?)
    }

    /// Passphrase prompts allowed before giving up.
    pub fn passphrase_attempts(&self) -> anyhow::Result<u32> {
        Ok(self
            .config()?
            .map(|c| c.security.passphrase_attempts)
            .unwrap_or(DEFAULT_PASSPHRASE_ATTEMPTS)
            .max(1))
    }

    /// Open and unlock the vault with passphrase handling and retry logic.
    pub async fn unlock(&self, access: Access, no_input: bool) -> anyhow::Result<UnlockedVault> {
        unlock_vault_with_retry(self, access, no_input).await
    }
}
