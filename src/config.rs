//! App configuration.
//!
//! Read from `gymflow.json` in the working directory, or from the file named
//! by `GYMFLOW_CONFIG`. Every field is optional:
//!
//! ```json
//! {
//!   "log_path": "workout_logs.csv",
//!   "program_path": "my_program.json",
//!   "rest_seconds": 90,
//!   "history_rows": 10,
//!   "weight_step": 2.5
//! }
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::Result;

pub const CONFIG_ENV: &str = "GYMFLOW_CONFIG";
const DEFAULT_CONFIG: &str = "gymflow.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_path: PathBuf,
    /// Custom program file. The built-in program is used when unset.
    pub program_path: Option<PathBuf>,
    pub rest_seconds: u64,
    /// Rows shown in the history table.
    pub history_rows: usize,
    /// Increment of the weight input, in kg.
    pub weight_step: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_path: PathBuf::from("workout_logs.csv"),
            program_path: None,
            rest_seconds: 60,
            history_rows: 10,
            weight_step: 2.5,
        }
    }
}

impl AppConfig {
    /// Loads the config file named by `GYMFLOW_CONFIG`, else `gymflow.json`, else defaults.
    pub fn load() -> Result<AppConfig> {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
        AppConfig::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let json = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&json)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn rest_duration(&self) -> Duration {
        Duration::from_secs(self.rest_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("gymflow.json")).unwrap();
        assert_eq!(config.log_path, PathBuf::from("workout_logs.csv"));
        assert_eq!(config.program_path, None);
        assert_eq!(config.rest_duration(), Duration::from_secs(60));
        assert_eq!(config.history_rows, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gymflow.json");
        fs::write(&path, r#"{"rest_seconds": 90, "log_path": "logs/gym.csv"}"#).unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.rest_seconds, 90);
        assert_eq!(config.log_path, PathBuf::from("logs/gym.csv"));
        assert_eq!(config.weight_step, 2.5);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gymflow.json");
        fs::write(&path, "{ rest_seconds: ").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(Error::Json(_))));
    }
}
