//! Runtime configuration read from `salary.toml`.
//!
//! ```toml
//! model_path = "batting_basic_model.json"
//! season_path = "batting_merged_2022.csv"
//! batting_path = "batting_basic.csv"
//! log_level = "info"
//! log_file = "salary.log"
//! ```
//!
//! Every key is optional. Relative paths are resolved against the working
//! directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "salary.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub season_path: PathBuf,
    pub batting_path: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("batting_basic_model.json"),
            season_path: PathBuf::from("batting_merged_2022.csv"),
            batting_path: PathBuf::from("batting_basic.csv"),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `salary.toml` in the
    /// working directory is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml_str(&contents, &path),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no {} found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        overrides: ConfigOverrides,
    ) -> Self {
        if let Some(p) = overrides.model_path {
            self.model_path = p;
        }
        if let Some(p) = overrides.season_path {
            self.season_path = p;
        }
        if let Some(p) = overrides.batting_path {
            self.batting_path = p;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }
}

/// Values given on the command line; `None` leaves the file value in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model_path: Option<PathBuf>,
    pub season_path: Option<PathBuf>,
    pub batting_path: Option<PathBuf>,
    pub log_level: Option<String>,
}
