//! Per-invocation configuration
//!
//! Settles which settings and database file one run uses. An explicit
//! database path makes the settings file optional.

use std::path::PathBuf;

use super::paths::ExpensePaths;
use super::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};

/// Settings and database file for one run
#[derive(Debug)]
pub struct RunConfig {
    pub settings: Settings,
    pub database: PathBuf,
    /// Settings failure skipped because the database was given explicitly
    pub ignored: Option<ExpenseError>,
}

impl RunConfig {
    /// Resolve from the environment, with an optional `--database` value
    pub fn resolve(cli_override: Option<PathBuf>) -> ExpenseResult<Self> {
        Self::resolve_with(ExpensePaths::new(), cli_override)
    }

    /// Resolve against already computed paths
    pub fn resolve_with(
        paths: ExpenseResult<ExpensePaths>,
        cli_override: Option<PathBuf>,
    ) -> ExpenseResult<Self> {
        let loaded = paths.and_then(|paths| Settings::load(&paths).map(|s| (paths, s)));

        match (loaded, cli_override) {
            (Ok((paths, settings)), cli_override) => {
                let database = settings.database_path(&paths, cli_override);
                if database == paths.database_file() {
                    paths.ensure_directories()?;
                }
                Ok(Self {
                    settings,
                    database,
                    ignored: None,
                })
            }
            (Err(err), Some(database)) => Ok(Self {
                settings: Settings::default(),
                database,
                ignored: Some(err),
            }),
            (Err(err), None) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn malformed(temp_dir: &TempDir) -> ExpensePaths {
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();
        paths
    }

    #[test]
    fn test_default_database_creates_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().join("cfg"));

        let config = RunConfig::resolve_with(Ok(paths.clone()), None).unwrap();

        assert_eq!(config.database, paths.database_file());
        assert!(paths.base_dir().exists());
        assert!(config.ignored.is_none());
    }

    #[test]
    fn test_malformed_settings_without_override_fails() {
        let temp_dir = TempDir::new().unwrap();

        let err = RunConfig::resolve_with(Ok(malformed(&temp_dir)), None).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_malformed_settings_with_override_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let db = temp_dir.path().join("explicit.db");

        let config =
            RunConfig::resolve_with(Ok(malformed(&temp_dir)), Some(db.clone())).unwrap();

        assert_eq!(config.database, db);
        assert_eq!(config.settings, Settings::default());
        assert!(matches!(config.ignored, Some(ExpenseError::Config(_))));
    }

    #[test]
    fn test_unresolvable_paths_with_override_is_skipped() {
        let no_home = Err(ExpenseError::Config("Could not determine HOME directory".into()));

        let config =
            RunConfig::resolve_with(no_home, Some(PathBuf::from("/tmp/explicit.db"))).unwrap();

        assert_eq!(config.database, PathBuf::from("/tmp/explicit.db"));
        assert!(config.ignored.is_some());
    }

    #[test]
    fn test_unresolvable_paths_without_override_fails() {
        let no_home = Err(ExpenseError::Config("Could not determine HOME directory".into()));

        assert!(RunConfig::resolve_with(no_home, None).is_err());
    }
}
