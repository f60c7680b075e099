//! Storage layer for the expense tracker
//!
//! A single SQLite connection, opened once per process, owns the expenses
//! table. The schema is ensured before the store is handed out.

pub mod expenses;
pub mod init;

pub use init::{ensure_schema, register_functions, EXPENSES_TABLE};

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::ExpenseError;

/// Owner of the database connection and all data access
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path` and ensure the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExpenseError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            ExpenseError::Connection(format!("{}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Opened database");

        Self::from_connection(conn)
    }

    /// Open a private in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self, ExpenseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ExpenseError::Connection(e.to_string()))?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, ExpenseError> {
        register_functions(&conn).map_err(|e| ExpenseError::Connection(e.to_string()))?;
        // A file that is not a database only shows up on first use
        ensure_schema(&conn).map_err(|e| ExpenseError::Connection(e.to_string()))?;

        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_file_and_schema() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("expenses.db");

        let store = Store::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert!(init::table_exists(store.conn()).unwrap());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("expenses.db");

        {
            let store = Store::open(&db_path).unwrap();
            store.add("5.00", "coffee").unwrap();
        }

        let store = Store::open(&db_path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_open_missing_directory_is_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("missing").join("expenses.db");

        let err = Store::open(&db_path).err().unwrap();
        assert!(matches!(err, ExpenseError::Connection(_)));
    }

    #[test]
    fn test_open_non_database_is_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("notes.txt");
        std::fs::write(&db_path, "not a database\n".repeat(64)).unwrap();

        let err = Store::open(&db_path).err().unwrap();
        assert!(matches!(err, ExpenseError::Connection(_)));
    }
}
