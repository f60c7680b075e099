//! Expense display formatting
//!
//! Renders a result set as fixed-width rows followed by a total of exactly
//! the rows shown.

use crate::models::{Amount, Expense};

/// Width of the separator line above the total
const SEPARATOR_WIDTH: usize = 50;

/// Header line announcing how many expenses follow
pub fn format_count_header(count: usize) -> String {
    match count {
        0 => "There are no expenses.".to_string(),
        1 => "There is 1 expense".to_string(),
        n => format!("There are {} expenses", n),
    }
}

/// Format a single expense as one table row
pub fn format_expense_row(expense: &Expense) -> String {
    format!(
        "{:>3} | {:>10} | {:>12} | {}",
        expense.id,
        expense.created_on.format("%Y-%m-%d").to_string(),
        expense.amount,
        expense.memo
    )
}

/// Format a result set with its header, rows and total
pub fn format_expense_list(expenses: &[Expense]) -> String {
    let mut output = format_count_header(expenses.len());
    output.push('\n');

    if expenses.is_empty() {
        return output;
    }

    for expense in expenses {
        output.push_str(&format_expense_row(expense));
        output.push('\n');
    }

    let total: Amount = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&"-".repeat(SEPARATOR_WIDTH));
    output.push('\n');
    output.push_str(&format!("Total {:>25}\n", total));

    output
}
