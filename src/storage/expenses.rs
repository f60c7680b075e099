//! Expense queries
//!
//! Every operation is a single parameterized statement (delete is a lookup
//! followed by one statement) against the expenses table.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::Store;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, Expense, ExpenseId, NewExpense};

const SELECT_COLUMNS: &str = "SELECT id, amount, memo, created_on FROM expenses";

/// Map one result row onto the typed row struct
fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    // NUMERIC affinity hands the amount back as INTEGER or REAL
    let amount: f64 = row.get(1)?;
    Ok(Expense {
        id: ExpenseId::new(row.get(0)?),
        amount: Amount::from_cents((amount * 100.0).round() as i64),
        memo: row.get(2)?,
        created_on: row.get(3)?,
    })
}

/// Escape LIKE wildcards so the query is matched literally
fn like_pattern(substring: &str) -> String {
    let mut pattern = String::with_capacity(substring.len() + 2);
    pattern.push('%');
    for c in substring.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn amount_param(amount: Amount) -> f64 {
    amount.cents() as f64 / 100.0
}

impl Store {
    /// All expenses, oldest first
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{} ORDER BY created_on ASC, id ASC", SELECT_COLUMNS))?;

        let expenses = stmt
            .query_map([], expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = expenses.len(), "Listed expenses");
        Ok(expenses)
    }

    /// Record a new expense dated today
    pub fn add(&self, amount: &str, memo: &str) -> ExpenseResult<Expense> {
        let input = NewExpense::parse(amount, memo)?;

        self.conn().execute(
            "INSERT INTO expenses (amount, memo) VALUES (?1, ?2)",
            params![amount_param(input.amount), input.memo],
        )?;

        self.inserted()
    }

    /// Record a new expense with an explicit date
    pub fn add_on(&self, amount: &str, memo: &str, created_on: NaiveDate) -> ExpenseResult<Expense> {
        let input = NewExpense::parse(amount, memo)?;

        self.conn().execute(
            "INSERT INTO expenses (amount, memo, created_on) VALUES (?1, ?2, ?3)",
            params![amount_param(input.amount), input.memo, created_on],
        )?;

        self.inserted()
    }

    fn inserted(&self) -> ExpenseResult<Expense> {
        let id = ExpenseId::new(self.conn().last_insert_rowid());
        let expense = self
            .get(id)?
            .ok_or_else(|| ExpenseError::Store(format!("Inserted expense {} vanished", id)))?;

        info!(id = %expense.id, amount = %expense.amount, "Added expense");
        Ok(expense)
    }

    /// Expenses whose memo contains `substring`, ignoring case
    ///
    /// Both sides go through `fold_case` so non-ASCII letters fold too.
    pub fn search(&self, substring: &str) -> ExpenseResult<Vec<Expense>> {
        let mut stmt = self.conn().prepare(&format!(
            "{} WHERE fold_case(memo) LIKE fold_case(?1) ESCAPE '\\' \
             ORDER BY created_on ASC, id ASC",
            SELECT_COLUMNS
        ))?;

        let expenses = stmt
            .query_map([like_pattern(substring)], expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(query = substring, count = expenses.len(), "Searched expenses");
        Ok(expenses)
    }

    /// Fetch a single expense
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let expense = self
            .conn()
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                [id.get()],
                expense_from_row,
            )
            .optional()?;
        Ok(expense)
    }

    /// Delete one expense, returning what was removed
    ///
    /// `Ok(None)` means no row had that id and nothing changed.
    pub fn delete_by_id(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let Some(expense) = self.get(id)? else {
            debug!(id = %id, "No expense to delete");
            return Ok(None);
        };

        self.conn()
            .execute("DELETE FROM expenses WHERE id = ?1", [id.get()])?;

        info!(id = %id, "Deleted expense");
        Ok(Some(expense))
    }

    /// Delete every expense
    pub fn clear_all(&self) -> ExpenseResult<usize> {
        let removed = self.conn().execute("DELETE FROM expenses", [])?;
        info!(removed, "Cleared all expenses");
        Ok(removed)
    }

    /// Number of recorded expenses
    pub fn count(&self) -> ExpenseResult<usize> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
