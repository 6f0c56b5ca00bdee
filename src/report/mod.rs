//! Formatted terminal output for the non-interactive subcommands.
//!
//! We keep formatting code in one place so:
//! - the data-loading code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;
