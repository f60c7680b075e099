//! expense-cli - Command-line expense tracker
//!
//! Records, lists, searches, deletes and clears expenses kept in a single
//! SQLite table.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The typed expense row and its value types
//! - `storage`: SQLite store owning the connection and all queries
//! - `display`: Result-set rendering
//! - `cli`: Command parsing, dispatch and keystroke input
//!
//! # Example
//!
//! ```rust
//! use expense_cli::storage::Store;
//!
//! let store = Store::open_in_memory()?;
//! store.add("5.00", "coffee")?;
//! assert_eq!(store.search("COF")?.len(), 1);
//! # Ok::<(), expense_cli::ExpenseError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
