//! Navigator configuration, read from TOML.
//!
//! ```toml
//! default_locale = "ar"
//! records = "articles.csv"
//!
//! [outline]
//! order = "sorted"
//! article_keying = "tuple"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use rc128_model::{Locale, OutlineOptions};

use crate::error::LoadError;

/// Environment variable naming the default config file.
pub const CONFIG_ENV_VAR: &str = "RC128_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Locale shown when no `--lang` is given.
    pub default_locale: Locale,
    pub outline: OutlineOptions,
    /// Record file used when no path is given. Relative paths resolve
    /// against the config file's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<PathBuf>,
}

impl NavigatorConfig {
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let mut config = Self::parse(&content, path)?;
        if let Some(records) = config.records.take() {
            let resolved = match path.parent() {
                Some(dir) if records.is_relative() => dir.join(records),
                _ => records,
            };
            config.records = Some(resolved);
        }
        debug!(path = %path.display(), "navigator config loaded");
        Ok(config)
    }

    /// Parse TOML text. `path` is only used for error context.
    pub fn parse(content: &str, path: &Path) -> Result<Self, LoadError> {
        toml::from_str(content).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit path if given, else `RC128_CONFIG` if set, else
    /// defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, LoadError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
