//! CLI command handling
//!
//! This module turns raw command-line arguments into store operations and
//! terminal output, including the interactive clear confirmation.

pub mod command;
pub mod dispatcher;
pub mod keys;

pub use command::{Command, HELP_TEXT};
pub use dispatcher::Dispatcher;
pub use keys::{KeySource, TerminalKeys};
