//! Command dispatcher
//!
//! Routes one parsed command to the store and renders the outcome. The
//! output writer and key source are injected so every flow can be driven
//! from tests.

use std::io::Write;

use tracing::debug;

use super::command::{Command, HELP_TEXT};
use super::keys::KeySource;
use crate::display::format_expense_list;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseId;
use crate::storage::Store;

const CLEAR_PROMPT: &str = "This will remove all expenses. Are you sure? (y/n)";
const CLEAR_REPROMPT: &str = "I didn't get that, are you sure you want to remove all expenses? (y/n)";

/// Runs a single command against the store
pub struct Dispatcher<'a, K, W> {
    store: &'a Store,
    keys: K,
    out: W,
}

impl<'a, K: KeySource, W: Write> Dispatcher<'a, K, W> {
    pub fn new(store: &'a Store, keys: K, out: W) -> Self {
        Self { store, keys, out }
    }

    /// Parse raw arguments and run the resulting command
    pub fn run<S: AsRef<str>>(&mut self, args: &[S]) -> ExpenseResult<()> {
        let command = Command::parse(args);
        debug!(?command, "Dispatching");
        self.execute(command)
    }

    /// Run an already parsed command
    pub fn execute(&mut self, command: Command) -> ExpenseResult<()> {
        match command {
            Command::List => {
                let expenses = self.store.list_all()?;
                write!(self.out, "{}", format_expense_list(&expenses))?;
            }
            Command::Add { amount, memo } => {
                self.store.add(&amount, &memo)?;
                writeln!(self.out, "Expense added.")?;
            }
            Command::Search { query } => {
                let expenses = self.store.search(&query)?;
                write!(self.out, "{}", format_expense_list(&expenses))?;
            }
            Command::Delete { id } => self.delete(&id)?,
            Command::Clear => self.clear()?,
            Command::Usage(message) => writeln!(self.out, "{}", message)?,
            Command::Help => write!(self.out, "{}", HELP_TEXT)?,
        }

        self.out.flush()?;
        Ok(())
    }

    fn delete(&mut self, raw_id: &str) -> ExpenseResult<()> {
        // A token that is not an integer cannot name any row
        let deleted = match raw_id.parse::<ExpenseId>() {
            Ok(id) => self.store.delete_by_id(id)?,
            Err(_) => None,
        };

        match deleted {
            Some(expense) => {
                writeln!(self.out, "The following expense has been deleted:")?;
                write!(self.out, "{}", format_expense_list(&[expense]))?;
            }
            None => writeln!(self.out, "{}", ExpenseError::NotFound(raw_id.to_string()))?,
        }
        Ok(())
    }

    fn clear(&mut self) -> ExpenseResult<()> {
        writeln!(self.out, "{}", CLEAR_PROMPT)?;
        self.out.flush()?;

        loop {
            match self.keys.read_key()? {
                Some('y') => {
                    self.store.clear_all()?;
                    writeln!(self.out, "All expenses have been deleted.")?;
                    return Ok(());
                }
                Some('n') => return Ok(()),
                None => {
                    debug!("Input closed before confirmation");
                    return Ok(());
                }
                Some(_) => {
                    writeln!(self.out, "{}", CLEAR_REPROMPT)?;
                    self.out.flush()?;
                }
            }
        }
    }

    /// Give back the output writer
    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::{ADD_USAGE, DELETE_USAGE};
    use std::collections::VecDeque;

    /// Replays a fixed sequence of keys, then reports end of input
    struct CannedKeys(VecDeque<char>);

    impl CannedKeys {
        fn new(keys: &str) -> Self {
            Self(keys.chars().collect())
        }
    }

    impl KeySource for CannedKeys {
        fn read_key(&mut self) -> ExpenseResult<Option<char>> {
            Ok(self.0.pop_front())
        }
    }

    fn run(store: &Store, args: &[&str], keys: &str) -> String {
        let mut dispatcher = Dispatcher::new(store, CannedKeys::new(keys), Vec::new());
        dispatcher.run(args).unwrap();
        String::from_utf8(dispatcher.into_output()).unwrap()
    }

    fn seeded() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.add("5.00", "coffee").unwrap();
        store.add("12.50", "books").unwrap();
        store
    }

    #[test]
    fn test_list_shows_rows_and_total() {
        let store = seeded();
        let output = run(&store, &["list"], "");

        assert!(output.starts_with("There are 2 expenses\n"));
        assert!(output.contains(" | coffee\n"));
        assert!(output.contains(" | books\n"));
        assert!(output.ends_with(&format!("Total {:>25}\n", "17.50")));
    }

    #[test]
    fn test_list_empty() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(run(&store, &["list"], ""), "There are no expenses.\n");
    }

    #[test]
    fn test_add_inserts() {
        let store = Store::open_in_memory().unwrap();
        let output = run(&store, &["add", "3.25", "bagel"], "");

        assert_eq!(output, "Expense added.\n");
        assert_eq!(store.search("bagel").unwrap().len(), 1);
    }

    #[test]
    fn test_add_with_one_argument_is_usage_error() {
        let store = Store::open_in_memory().unwrap();
        let output = run(&store, &["add", "5.00"], "");

        assert_eq!(output, format!("{}\n", ADD_USAGE));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_add_invalid_amount_propagates() {
        let store = Store::open_in_memory().unwrap();
        let mut dispatcher = Dispatcher::new(&store, CannedKeys::new(""), Vec::new());

        let err = dispatcher.run(&["add", "free", "lunch"]).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_search_returns_only_matches() {
        let store = seeded();
        let output = run(&store, &["search", "cof"], "");

        assert!(output.starts_with("There is 1 expense\n"));
        assert!(output.contains(" | coffee\n"));
        assert!(!output.contains("books"));
        assert!(output.ends_with(&format!("Total {:>25}\n", "5.00")));
    }

    #[test]
    fn test_delete_missing_id() {
        let store = seeded();
        let output = run(&store, &["delete", "999"], "");

        assert_eq!(output, "There is no expense with id '999'\n");
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_delete_non_numeric_id() {
        let store = seeded();
        let output = run(&store, &["delete", "abc"], "");

        assert_eq!(output, "There is no expense with id 'abc'\n");
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_delete_without_id_is_usage_error() {
        let store = seeded();
        assert_eq!(run(&store, &["delete"], ""), format!("{}\n", DELETE_USAGE));
    }

    #[test]
    fn test_delete_existing_echoes_row() {
        let store = seeded();
        let coffee = store.search("coffee").unwrap().remove(0);

        let id = coffee.id.to_string();
        let output = run(&store, &["delete", id.as_str()], "");

        assert!(output.starts_with("The following expense has been deleted:\nThere is 1 expense\n"));
        assert!(output.contains(" | coffee\n"));
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.search("coffee").unwrap().is_empty());
    }

    #[test]
    fn test_clear_declined_keeps_rows() {
        let store = seeded();
        let output = run(&store, &["clear"], "n");

        assert_eq!(output, format!("{}\n", CLEAR_PROMPT));
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_clear_confirmed_empties_table() {
        let store = seeded();
        let output = run(&store, &["clear"], "y");

        assert!(output.ends_with("All expenses have been deleted.\n"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_clear_reprompts_until_y_or_n() {
        let store = seeded();
        let output = run(&store, &["clear"], "x\nY y");

        // 'x', '\n', 'Y' and ' ' are all rejected before the final 'y'
        assert_eq!(output.matches(CLEAR_REPROMPT).count(), 4);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_clear_end_of_input_keeps_rows() {
        let store = seeded();
        let output = run(&store, &["clear"], "q");

        assert_eq!(output.matches(CLEAR_REPROMPT).count(), 1);
        assert!(!output.contains("All expenses have been deleted."));
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_unknown_command_prints_help() {
        let store = Store::open_in_memory().unwrap();
        let none: [&str; 0] = [];

        assert_eq!(run(&store, &["bogus"], ""), HELP_TEXT);
        assert_eq!(run(&store, &none, ""), HELP_TEXT);
    }
}
