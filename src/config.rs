use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{WrappedError, WrappedResult};
use crate::types::CategorySet;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.youneedabudget.com/v1";
pub const DEFAULT_DATA_DIR: &str = "../data/expense-reports";
pub const DEFAULT_OUTPUT_FILE: &str = "report.txt";

/// Environment variable that takes precedence over the configured token.
pub const TOKEN_ENV: &str = "WRAPPED_TOKEN";

/// Settings for a single run. Every field is optional in the JSON file.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub token: Option<String>,
    pub base_url: String,
    pub data_dir: PathBuf,
    pub output_file: PathBuf,
    pub categories: CategorySet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            categories: CategorySet::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("data_dir", &self.data_dir)
            .field("output_file", &self.output_file)
            .field("categories", &self.categories)
            .finish()
    }
}

impl Config {
    pub fn from_json(content: &str) -> WrappedResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads the config file at `path`; a missing file means defaults.
    pub fn load(path: impl AsRef<Path>) -> WrappedResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn with_env(self) -> Self {
        self.with_token_override(std::env::var(TOKEN_ENV).ok())
    }

    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }

    pub fn token(&self) -> WrappedResult<&str> {
        self.token.as_deref().ok_or(WrappedError::MissingToken)
    }
}
