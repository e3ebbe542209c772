//! Application-level utilities for the Credvault CLI.
//!
//! This module provides:
//! - Path resolution for config and vault files
//! - The per-invocation application context
//! - Passphrase handling with retry logic

mod context;
mod passphrase;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use passphrase::Access;
pub use resolver::resolve_config_path;
