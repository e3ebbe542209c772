use std::io::IsTerminal;
use std::path::Path;

use credvault_core::import_blob;

use crate::app::{Access, AppContext};
use crate::cli::ImportArgs;
use crate::errors::{import_error, vault_error, CliError};
use crate::helpers::confirm;

/// Replace every record in the vault with the contents of an export file.
///
/// The file is fully decrypted and validated before the vault is touched;
/// the replacement itself is a single transaction.
pub async fn handle_import(ctx: &AppContext<'_>, args: &ImportArgs) -> anyhow::Result<()> {
    let path = Path::new(&args.file);
    if !path.exists() {
        return Err(CliError::import_file_not_found(path).into());
    }
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    let unlocked = ctx.unlock(Access::Write, false).await?;
    let records = import_blob(&bytes, unlocked.session.key()).map_err(import_error)?;

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            return Err(CliError::invalid_input(
                "Import replaces every record in the vault. Pass --yes to confirm.",
            )
            .into());
        }
        let prompt = format!(
            "Replace {} existing record(s) with {} imported record(s)?",
            unlocked.records.len(),
            records.len()
        );
        if !confirm(&prompt)? {
            if !ctx.quiet() {
                println!("Import cancelled.");
            }
            return Ok(());
        }
    }

    let count = records.len();
    unlocked
        .vault
        .replace_all(records, unlocked.session.key())
        .await
        .map_err(vault_error)?;
    unlocked.session.logout();

    if !ctx.quiet() {
        println!(
            "Imported {} record{}",
            count,
            if count == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
