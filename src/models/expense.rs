//! Expense model
//!
//! One recorded expense: an amount, a memo and the day it was recorded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::ids::ExpenseId;
use crate::error::{ExpenseError, ExpenseResult};

/// Snapshot of one row of the expenses table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier assigned by the store
    pub id: ExpenseId,

    /// Amount spent, always within the recordable range
    pub amount: Amount,

    /// Free-form description
    pub memo: String,

    /// Day the expense was recorded
    pub created_on: NaiveDate,
}

/// Validated input for a new expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Amount,
    pub memo: String,
}

impl NewExpense {
    /// Validate raw user input
    pub fn parse(amount: &str, memo: &str) -> ExpenseResult<Self> {
        let amount = Amount::parse(amount)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if !amount.is_recordable() {
            return Err(ExpenseError::Validation(format!(
                "Amount must be between 0.01 and 9999.99, got {}",
                amount
            )));
        }

        if memo.trim().is_empty() {
            return Err(ExpenseError::Validation("Memo cannot be empty".into()));
        }

        Ok(Self {
            amount,
            memo: memo.to_string(),
        })
    }
}
