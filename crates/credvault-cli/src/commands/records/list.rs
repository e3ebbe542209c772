use credvault_core::filter_records;

use crate::app::{Access, AppContext};
use crate::cli::ListArgs;
use crate::output::{records_json, records_table};

pub async fn handle_list(ctx: &AppContext<'_>, args: &ListArgs) -> anyhow::Result<()> {
    let unlocked = ctx.unlock(Access::Read, false).await?;
    unlocked.session.logout();

    let query = args.search.as_deref().unwrap_or("");
    let records = filter_records(&unlocked.records, query);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records_json(&records))?
        );
        return Ok(());
    }

    if records.is_empty() {
        if !ctx.quiet() {
            eprintln!("No records found.");
        }
        return Ok(());
    }
    println!("{}", records_table(&records));
    Ok(())
}
