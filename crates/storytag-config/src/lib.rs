use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "storytag.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    #[default]
    Placeholder,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,
    /// Text-generation endpoint, queried with `?prompt=...`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Name of the environment variable holding the bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub timeout_secs: u64,
    pub max_concurrent: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::Placeholder,
            endpoint: None,
            api_key_env: None,
            timeout_secs: 30,
            max_concurrent: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: "npx".to_string(),
            args: vec!["jest".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tests_dir: PathBuf,
    pub test_suffix: String,
    pub require_project_tag: bool,
    pub generator: GeneratorConfig,
    pub runner: RunnerConfig,
    /// Story id to human-readable description
    pub descriptions: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tests_dir: PathBuf::from("tests"),
            test_suffix: ".test.js".to_string(),
            require_project_tag: false,
            generator: GeneratorConfig::default(),
            runner: RunnerConfig::default(),
            descriptions: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the tests directory
        config.tests_dir = Self::expand_path(&config.tests_dir).unwrap_or(config.tests_dir);

        Ok(Some(config))
    }

    /// Load the workspace config, falling back to defaults when there is none
    pub fn load(workspace_root: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::config_path(workspace_root);
        Ok(Self::load_from_path(&config_path)?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn config_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(CONFIG_FILE_NAME)
    }

    /// Bearer token for the remote generator, read from the configured variable
    pub fn api_key(&self) -> Option<String> {
        self.generator
            .api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.is_empty())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
