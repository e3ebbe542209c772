//! Encrypted export and import.

mod export;
mod import;

pub use export::handle_export;
pub use import::handle_import;
