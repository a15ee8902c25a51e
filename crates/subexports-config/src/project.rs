use crate::build_options::{BuildOptions, SubExportsOptions};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default project configuration file name
pub const CONFIG_FILE_NAME: &str = "subexports.toml";

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV_VAR: &str = "SUBEXPORTS_CONFIG";

/// Project configuration file contents
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub build: BuildOptions,

    #[serde(default)]
    pub subexports: SubExportsOptions,
}

impl ProjectConfig {
    /// Resolve the configuration file path
    ///
    /// An explicit path wins, then `SUBEXPORTS_CONFIG`, then
    /// `subexports.toml` in the project root. Relative paths resolve
    /// against `root`.
    pub fn path(root: &Path, explicit: Option<&Path>) -> PathBuf {
        if let Some(explicit) = explicit {
            return root.join(explicit);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return root.join(trimmed);
            }
        }

        root.join(CONFIG_FILE_NAME)
    }

    /// Load configuration from a path, returning an empty config if the file doesn't exist
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let config = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        } else {
            toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        };

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
