use std::path::Path;

use tracing::info;

use credvault_core::{export_blob, select_records};

use crate::app::{Access, AppContext};
use crate::cli::ExportArgs;
use crate::errors::vault_error;
use crate::helpers::parse_record_ids;

pub async fn handle_export(ctx: &AppContext<'_>, args: &ExportArgs) -> anyhow::Result<()> {
    let ids = parse_record_ids(&args.ids)?;
    let unlocked = ctx.unlock(Access::Read, false).await?;

    let selected = if args.all {
        None
    } else {
        Some(select_records(&unlocked.records, &ids).map_err(vault_error)?)
    };
    let records = selected.as_deref().unwrap_or(&unlocked.records);
    let blob = export_blob(records, unlocked.session.key()).map_err(vault_error)?;
    let count = records.len();

    let out = Path::new(&args.out);
    credvault_core::fs::write_atomic(out, &blob)
        .map_err(|e| anyhow::anyhow!("Failed to write export {}: {}", out.display(), e))?;
    info!(bytes = blob.len(), count, "export written");
    unlocked.session.logout();

    if !ctx.quiet() {
        println!(
            "Exported {} record{} to {}",
            count,
            if count == 1 { "" } else { "s" },
            out.display()
        );
    }
    Ok(())
}
