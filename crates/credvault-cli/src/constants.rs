//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, vault, record, import file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase, corrupted store, too many attempts).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variable holding the passphrase for non-interactive use.
pub const PASSPHRASE_ENV: &str = "CREDVAULT_PASSPHRASE";

/// Environment variable confirming the passphrase that first keys an empty vault.
pub const PASSPHRASE_CONFIRM_ENV: &str = "CREDVAULT_PASSPHRASE_CONFIRM";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CREDVAULT_CONFIG";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "CREDVAULT_LOG";

/// Passphrase prompts allowed before giving up.
pub const DEFAULT_PASSPHRASE_ATTEMPTS: u32 = 3;

/// Log level used when neither the environment nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
