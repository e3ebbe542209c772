use std::path::PathBuf;

use tracing::info;

use credvault_core::SqliteRecordStore;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_vault_path, read_config, write_config, VaultConfig};
use crate::errors::{vault_error, CliError};

/// Create an empty vault and point the config file at it.
///
/// No passphrase is asked for: an empty vault accepts any passphrase, and the
/// first one used to add a record becomes the vault's passphrase.
pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let vault_path = match args.path.as_deref().or(ctx.cli().vault.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_vault_path()?,
    };
    if vault_path.exists() {
        return Err(CliError::invalid_input(format!(
            "A vault already exists at {}",
            vault_path.display()
        ))
        .into());
    }
    if let Some(parent) = vault_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create vault directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    SqliteRecordStore::create(&vault_path).map_err(vault_error)?;
    info!(path = %vault_path.display(), "vault created");

    let config_path = match args.config_path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };
    let config = if config_path.exists() {
        let mut existing = read_config(&config_path)?;
        existing.vault.path = vault_path.to_string_lossy().to_string();
        existing
    } else {
        VaultConfig::new(&vault_path)
    };
    write_config(&config_path, &config)?;

    if ctx.quiet() {
        println!("{}", vault_path.display());
    } else {
        println!("Vault created at {}", vault_path.display());
        println!("Config written to {}", config_path.display());
        println!();
        println!("The passphrase you use for your first `credvault add` protects the vault.");
    }
    Ok(())
}
