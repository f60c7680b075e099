//! Strongly-typed expense identifier
//!
//! Ids are assigned by the database and never reused, so the wrapper only
//! offers parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Database-assigned id of an expense row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Wrap a raw row id
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw row id
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for ExpenseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
