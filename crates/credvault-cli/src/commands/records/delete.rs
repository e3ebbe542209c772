use crate::app::{Access, AppContext};
use crate::cli::DeleteArgs;
use crate::errors::{vault_error, CliError};
use crate::helpers::parse_record_id;

/// Delete one record.
///
/// The store treats deleting a missing id as a no-op; the CLI still reports
/// it so a mistyped id does not look like success.
pub async fn handle_delete(ctx: &AppContext<'_>, args: &DeleteArgs) -> anyhow::Result<()> {
    let id = parse_record_id(&args.id)?;
    let unlocked = ctx.unlock(Access::Read, false).await?;
    unlocked.session.logout();

    if !unlocked.records.iter().any(|r| r.id == Some(id)) {
        return Err(CliError::record_not_found(id).into());
    }
    unlocked.vault.delete(id).await.map_err(vault_error)?;

    if !ctx.quiet() {
        println!("Deleted record {}", id);
    }
    Ok(())
}
