//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings loading
//! - Per-run database selection

pub mod paths;
pub mod run;
pub mod settings;

pub use paths::ExpensePaths;
pub use run::RunConfig;
pub use settings::Settings;
