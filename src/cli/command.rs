//! Command parsing
//!
//! The first positional argument names the command; the rest are checked
//! for shape only. Values are validated by the store.

/// Static help text printed for unknown or missing commands
pub const HELP_TEXT: &str = "
An expense recording system

Commands:

add AMOUNT MEMO - record a new expense
clear - delete all expenses
list - list all expenses
delete NUMBER - remove expense with id NUMBER
search QUERY - list expenses with a matching memo field

";

pub const ADD_USAGE: &str = "You must provide an amount and a memo";
pub const SEARCH_USAGE: &str = "You must provide a search query";
pub const DELETE_USAGE: &str = "You must provide an expense id";

/// A command line, resolved to one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add { amount: String, memo: String },
    Search { query: String },
    Delete { id: String },
    Clear,
    Help,
    /// Known command with the wrong number of arguments
    Usage(&'static str),
}

impl Command {
    /// Resolve raw arguments (without the program name)
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        match args.as_slice() {
            ["list", ..] => Command::List,
            ["clear", ..] => Command::Clear,
            ["add", amount, memo] => Command::Add {
                amount: amount.to_string(),
                memo: memo.to_string(),
            },
            ["add", ..] => Command::Usage(ADD_USAGE),
            ["search", query] => Command::Search {
                query: query.to_string(),
            },
            ["search", ..] => Command::Usage(SEARCH_USAGE),
            ["delete", id] => Command::Delete { id: id.to_string() },
            ["delete", ..] => Command::Usage(DELETE_USAGE),
            _ => Command::Help,
        }
    }
}
