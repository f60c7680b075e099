//! Core data models for the expense tracker
//!
//! This module contains the typed row struct for the expenses table and the
//! value types it is built from.

pub mod amount;
pub mod expense;
pub mod ids;

pub use amount::{Amount, AmountParseError};
pub use expense::{Expense, NewExpense};
pub use ids::ExpenseId;
