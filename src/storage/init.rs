//! Schema initialization
//!
//! Creates the expenses table on first run. Safe to call on every startup.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use tracing::info;

use crate::error::ExpenseError;

/// Name of the single table the tracker owns
pub const EXPENSES_TABLE: &str = "expenses";

const CREATE_EXPENSES_TABLE: &str = "
    CREATE TABLE expenses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount NUMERIC(6, 2) NOT NULL CHECK (amount >= 0.01 AND amount <= 9999.99),
        memo TEXT NOT NULL CHECK (length(memo) > 0),
        created_on TEXT NOT NULL DEFAULT (date('now', 'localtime'))
    );
";

/// SQL name of the Unicode-aware lowercase function
pub const FOLD_CASE_FN: &str = "fold_case";

/// Lowercase text for case-insensitive comparison
///
/// SQLite's built-in LIKE and lower() only fold ASCII letters.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Make `fold_case(text)` available to queries on this connection
pub fn register_functions(conn: &Connection) -> Result<(), ExpenseError> {
    conn.create_scalar_function(
        FOLD_CASE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: String = ctx.get(0)?;
            Ok(fold_case(&text))
        },
    )?;
    Ok(())
}

/// Check whether the expenses table exists in the schema catalog
pub fn table_exists(conn: &Connection) -> Result<bool, ExpenseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [EXPENSES_TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Create the expenses table if it is missing
///
/// Returns `true` when the table was created by this call.
pub fn ensure_schema(conn: &Connection) -> Result<bool, ExpenseError> {
    if table_exists(conn)? {
        return Ok(false);
    }

    conn.execute_batch(CREATE_EXPENSES_TABLE)?;
    info!(table = EXPENSES_TABLE, "Created table");
    Ok(true)
}
