//! Passphrase handling and vault unlocking with retry logic.

use std::io::IsTerminal;

use tracing::debug;
use zeroize::Zeroizing;

use credvault_core::{Session, SqliteRecordStore, VaultError, VaultRecord, VaultStore};

use crate::errors::{vault_error, CliError};
use crate::helpers::{confirm_new_passphrase, env_passphrase, prompt_passphrase};

use super::context::AppContext;

/// Whether a command is about to write records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// An opened vault together with the session that unlocked it.
pub struct UnlockedVault {
    pub vault: VaultStore<SqliteRecordStore>,
    pub session: Session,
    /// Every record, decrypted during login.
    pub records: Vec<VaultRecord>,
}

/// Open the configured vault and log in.
///
/// `CREDVAULT_PASSPHRASE` gets exactly one attempt. Otherwise the user is
/// prompted up to `[security] passphrase_attempts` times.
///
/// An empty vault accepts any passphrase, and the first write fixes it for
/// good, so `Access::Write` on an empty vault also requires the passphrase
/// to be confirmed.
pub async fn unlock_vault_with_retry(
    ctx: &AppContext<'_>,
    access: Access,
    no_input: bool,
) -> anyhow::Result<UnlockedVault> {
    let path = ctx.vault_path()?;
    if !path.exists() {
        return Err(CliError::vault_not_found(&path).into());
    }
    let vault = VaultStore::new(SqliteRecordStore::open(&path).map_err(vault_error)?);
    debug!(path = %path.display(), "opened vault");

    let interactive = std::io::stdin().is_terminal() && !no_input;
    let (passphrase, session, records) = match env_passphrase() {
        Some(passphrase) => {
            let (session, records) = Session::login(&passphrase, &vault)
                .await
                .map_err(vault_error)?;
            (passphrase, session, records)
        }
        None => login_with_prompt(ctx, &vault, interactive).await?,
    };

    if access == Access::Write && records.is_empty() {
        confirm_new_passphrase(&passphrase, interactive)?;
    }

    Ok(UnlockedVault {
        vault,
        session,
        records,
    })
}

async fn login_with_prompt(
    ctx: &AppContext<'_>,
    vault: &VaultStore<SqliteRecordStore>,
    interactive: bool,
) -> anyhow::Result<(Zeroizing<String>, Session, Vec<VaultRecord>)> {
    let max_attempts = if interactive {
        ctx.passphrase_attempts()?
    } else {
        1
    };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let passphrase = prompt_passphrase(interactive)?;
        let failure = match Session::login(&passphrase, vault).await {
            Ok((session, records)) => return Ok((passphrase, session, records)),
            Err(VaultError::WrongKeyOrCorruptStore) => CliError::wrong_key(),
            Err(VaultError::InvalidInput(_)) => {
                CliError::invalid_input("Passphrase cannot be empty.")
            }
            Err(err) => return Err(vault_error(err)),
        };

        let remaining = max_attempts.saturating_sub(attempts);
        if remaining == 0 {
            if max_attempts == 1 {
                return Err(failure.into());
            }
            return Err(CliError::too_many_attempts().into());
        }
        eprintln!(
            "{} {} attempt{} remaining.",
            failure,
            remaining,
            if remaining == 1 { "" } else { "s" }
        );
    }
}
