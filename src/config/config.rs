//! Config file handling

use std::path::{Path, PathBuf};

use crate::errors::SwaggenError;
use crate::output::options::DEFAULT_FETCH_MODULE;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "SWAGGEN_CONFIG_DIR";

/// swaggen configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Extra arguments prepended to the command line
    pub default_options: Vec<String>,
    /// Server prefix removed from `servers[0].url`
    pub strip_server: Option<String>,
    pub fetch_module: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_options: Vec::new(),
            strip_server: None,
            fetch_module: DEFAULT_FETCH_MODULE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the config file (TOML format)
    ///
    /// An explicit `path` must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, SwaggenError> {
        let config_file = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let file = Self::default_config_dir().join("config.toml");
                if !file.exists() {
                    return Ok(Self::default());
                }
                file
            }
        };

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| SwaggenError::Config(format!("Failed to read config {}: {}", config_file.display(), e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, SwaggenError> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| SwaggenError::Config(format!("Invalid config TOML: {}", e)))?;

        let default_options = toml_value
            .get("defaults")
            .and_then(|d| d.get("options"))
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        let generator = toml_value.get("generator");

        let strip_server = generator
            .and_then(|g| g.get("strip_server"))
            .and_then(|v| v.as_str())
            .map(String::from);

        let fetch_module = generator
            .and_then(|g| g.get("fetch_module"))
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_FETCH_MODULE.to_string());

        Ok(Self {
            default_options,
            strip_server,
            fetch_module,
        })
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("swaggen"))
            .unwrap_or_else(|| PathBuf::from(".swaggen"))
    }
}
