use crate::app::{Access, AppContext};
use crate::cli::ShowArgs;
use crate::errors::CliError;
use crate::helpers::parse_record_id;
use crate::output::{print_record, record_json};

pub async fn handle_show(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_record_id(&args.id)?;
    let unlocked = ctx.unlock(Access::Read, false).await?;
    unlocked.session.logout();

    // Login already decrypted everything; look the record up in that snapshot.
    let record = unlocked
        .records
        .iter()
        .find(|r| r.id == Some(id))
        .ok_or_else(|| CliError::record_not_found(id))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record_json(record, args.reveal))?
        );
    } else {
        print_record(record, args.reveal, ctx.quiet());
    }
    Ok(())
}
