//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::errors::{CodeswapError, Result};
use crate::core::models::{FileTask, OutputLayout};

/// Key of the generation service settings in the configuration file
pub const CLIENT_CONFIG_KEY: &str = "chatgpt";

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Generation service settings, passed through to the client untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientConfig(serde_yaml::Value);

impl ClientConfig {
    pub fn new(value: serde_yaml::Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &serde_yaml::Value {
        &self.0
    }
}

/// Parsed configuration file
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    values: serde_yaml::Mapping,
}

impl AppConfig {
    /// Parse a YAML document; the top level must be a mapping
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        match value {
            serde_yaml::Value::Mapping(values) => Ok(Self { values }),
            serde_yaml::Value::Null => Ok(Self::default()),
            _ => Err(CodeswapError::ConfigError {
                message: "configuration must be a mapping of keys to values".to_string(),
            }),
        }
    }

    /// Load from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CodeswapError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.values.get(key)
    }

    /// Generation service settings stored under [`CLIENT_CONFIG_KEY`]
    pub fn client_config(&self) -> Result<ClientConfig> {
        self.get(CLIENT_CONFIG_KEY)
            .cloned()
            .map(ClientConfig::new)
            .ok_or_else(|| CodeswapError::MissingField {
                field: CLIENT_CONFIG_KEY.to_string(),
            })
    }
}

/// Prefix `ext` with a dot unless it already has one
pub fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Resolve an optional extension flag.
///
/// An unset or empty extension falls back to `fallback` (the matching path argument),
/// and the result is normalized either way.
pub fn resolve_extension(ext: Option<&str>, fallback: &str) -> String {
    let ext = ext.filter(|e| !e.is_empty()).unwrap_or(fallback);
    normalize_extension(ext)
}

/// Settings for one run, shared read-only by every file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dry_run: bool,
    pub source_language: String,
    pub destination_language: String,
    pub input_path: PathBuf,
    pub input_extension: String,
    pub output_path: PathBuf,
    pub output_extension: String,
    pub client_config: ClientConfig,
    pub continue_on_error: bool,
    pub layout: OutputLayout,
}

impl RunConfig {
    /// Create a run with normalized extensions and the default policies
    pub fn new(
        source_language: impl Into<String>,
        destination_language: impl Into<String>,
        input_path: impl Into<PathBuf>,
        input_extension: &str,
        output_path: impl Into<PathBuf>,
        output_extension: &str,
    ) -> Self {
        Self {
            dry_run: false,
            source_language: source_language.into(),
            destination_language: destination_language.into(),
            input_path: input_path.into(),
            input_extension: normalize_extension(input_extension),
            output_path: output_path.into(),
            output_extension: normalize_extension(output_extension),
            client_config: ClientConfig::default(),
            continue_on_error: false,
            layout: OutputLayout::Flat,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_client_config(mut self, client_config: ClientConfig) -> Self {
        self.client_config = client_config;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(CodeswapError::ConfigError {
                message: "source language is required".to_string(),
            });
        }

        if self.destination_language.trim().is_empty() {
            return Err(CodeswapError::ConfigError {
                message: "destination language is required".to_string(),
            });
        }

        Ok(())
    }

    /// Build the task for `path`, found while walking `root`
    pub fn task_for(&self, root: &Path, path: &Path) -> FileTask {
        let relative_dir = path
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        FileTask {
            input_path: path.to_path_buf(),
            input_extension: self.input_extension.clone(),
            output_dir: self.output_path.clone(),
            output_extension: self.output_extension.clone(),
            relative_dir,
        }
    }
}
