//! Terminal front end.
//!
//! This module provides command parsing and terminal output used by the
//! interactive session.

pub mod command;
pub mod output;

// Re-export public API
pub use command::{Command, CommandError, HELP_TEXT};
pub use output::{print_regions, print_view};
