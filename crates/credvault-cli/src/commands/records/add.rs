use std::io::IsTerminal;

use zeroize::Zeroizing;

use credvault_core::VaultRecord;

use crate::app::{Access, AppContext};
use crate::cli::AddArgs;
use crate::errors::{vault_error, CliError};
use crate::helpers::prompt_record_password;

pub async fn handle_add(ctx: &AppContext<'_>, args: &AddArgs) -> anyhow::Result<()> {
    let interactive = std::io::stdin().is_terminal() && !args.no_input;
    let password = match args.password.as_deref() {
        Some(value) => Zeroizing::new(value.to_string()),
        None => prompt_record_password(interactive)?,
    };

    // Reject bad input before asking for the passphrase.
    let record = VaultRecord::from_input(
        &args.service,
        &args.username,
        &password,
        args.tag.as_deref().unwrap_or(""),
    )
    .map_err(|e| CliError::invalid_input(e.to_string()))?;

    let unlocked = ctx.unlock(Access::Write, args.no_input).await?;
    let id = unlocked
        .vault
        .create(record, unlocked.session.key())
        .await
        .map_err(vault_error)?;
    unlocked.session.logout();

    if ctx.quiet() {
        println!("{}", id);
    } else {
        println!("Added record {}", id);
    }
    Ok(())
}
