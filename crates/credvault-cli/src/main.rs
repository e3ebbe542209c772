//! Credvault CLI - a local, encrypted credential vault
//!
//! This is the command-line interface for Credvault. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;

use clap::{CommandFactory, Parser};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{exchange, init, misc, records};
use crate::errors::CliError;
use crate::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    // A broken config file is reported by the command that needs it.
    let config_level = ctx
        .config()
        .ok()
        .flatten()
        .map(|config| config.log.level.clone());
    init_logging(config_level.as_deref());

    if let Err(e) = run(&ctx, &cli).await {
        if let Some(cli_err) = e.downcast_ref::<CliError>() {
            cli_err.exit()
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(ctx: &AppContext<'_>, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args)?,
        Some(Commands::Add(args)) => records::handle_add(ctx, args).await?,
        Some(Commands::List(args)) => records::handle_list(ctx, args).await?,
        Some(Commands::Show(args)) => records::handle_show(ctx, args).await?,
        Some(Commands::Delete(args)) => records::handle_delete(ctx, args).await?,
        Some(Commands::Export(args)) => exchange::handle_export(ctx, args).await?,
        Some(Commands::Import(args)) => exchange::handle_import(ctx, args).await?,
        Some(Commands::Completions { shell }) => misc::handle_completions(*shell)?,
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}
