use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use credvault_core::VERSION;

/// Credvault - a local, encrypted credential vault
#[derive(Parser)]
#[command(name = "credvault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault database
    #[arg(short, long, global = true, env = "CREDVAULT_PATH")]
    pub vault: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new vault and write the config file
    Init(InitArgs),

    /// Add a credential
    Add(AddArgs),

    /// List credentials (passwords masked)
    List(ListArgs),

    /// Show a single credential
    Show(ShowArgs),

    /// Delete a credential
    Delete(DeleteArgs),

    /// Export credentials to an encrypted file
    Export(ExportArgs),

    /// Replace the whole vault with the contents of an export file
    Import(ImportArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the vault will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Service or site name
    #[arg(long)]
    pub service: String,

    /// Account username
    #[arg(short, long)]
    pub username: String,

    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Tag (defaults to "personal")
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive filter on service, username, or tag
    #[arg(short, long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the password in clear text
    #[arg(long)]
    pub reveal: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Destination file
    #[arg(short, long, value_name = "FILE")]
    pub out: String,

    /// Record IDs to export
    #[arg(long = "id", value_name = "ID", required_unless_present = "all")]
    pub ids: Vec<String>,

    /// Export every record
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// Export file to import
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
