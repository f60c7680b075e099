//! Display formatting for terminal output
//!
//! Provides the shared result-set rendering used by `list`, `search` and the
//! delete confirmation.

pub mod expense;

pub use expense::{format_count_header, format_expense_list, format_expense_row};
