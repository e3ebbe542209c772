//! Path resolution for config and vault files.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, VaultConfig};
use crate::constants::CONFIG_ENV;
use crate::errors::CliError;

/// Resolve the config file path, checking CREDVAULT_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Read the config file if one exists.
pub fn load_config() -> anyhow::Result<Option<VaultConfig>> {
    let path = resolve_config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    read_config(&path).map(Some)
}

/// Resolve the vault file path from CLI args or config.
pub fn resolve_vault_path(cli: &Cli, config: Option<&VaultConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.vault.as_deref() {
        return Ok(PathBuf::from(path));
    }

    match config {
        Some(config) => Ok(PathBuf::from(&config.vault.path)),
        None => Err(CliError::vault_not_found(&resolve_config_path()?).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use crate::constants::exit_codes;
    use clap::Parser;

    #[test]
    fn test_explicit_vault_wins_over_config() {
        let cli = Cli::parse_from(["credvault", "--vault", "/tmp/a.db", "list"]);
        let config = VaultConfig::new(Path::new("/tmp/b.db"));

        let path = resolve_vault_path(&cli, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/a.db"));
    }

    #[test]
    fn test_config_path_used_without_flag() {
        let cli = Cli::parse_from(["credvault", "list"]);
        let config = VaultConfig::new(Path::new("/tmp/b.db"));

        let path = resolve_vault_path(&cli, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/b.db"));
    }

    #[test]
    fn test_missing_vault_error_is_not_found() {
        let err = CliError::vault_not_found(Path::new("/nowhere/vault.db"));
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
        assert!(err.to_string().contains("credvault init"));
    }
}
