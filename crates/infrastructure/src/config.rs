//! Engine configuration loading
//!
//! The configuration carries the resolver settings and the batch variables:
//!
//! ```yaml
//! settings:
//!   dryRun: false
//!   maxDepth: 16
//! variables:
//!   name: Vividus
//!   retries: 3
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tessera_domain::{ResolverSettings, VariableMap, Variables};

use crate::error::{InfrastructureError, InfrastructureResult};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl ConfigFormat {
    /// Detects the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`InfrastructureError::UnsupportedFormat`] for unknown extensions.
    pub fn from_path(path: &Path) -> InfrastructureResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            _ => Err(InfrastructureError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Settings and batch variables for building an engine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Resolver settings.
    #[serde(default)]
    pub settings: ResolverSettings,

    /// Batch-scope variables.
    #[serde(default)]
    pub variables: VariableMap,
}

impl EngineConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or has the wrong shape.
    pub fn from_json(json: &str) -> InfrastructureResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or has the wrong shape.
    pub fn from_yaml(yaml: &str) -> InfrastructureResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a configuration from text in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is invalid or has the wrong shape.
    pub fn parse(text: &str, format: ConfigFormat) -> InfrastructureResult<Self> {
        match format {
            ConfigFormat::Json => Self::from_json(text),
            ConfigFormat::Yaml => Self::from_yaml(text),
        }
    }

    /// Loads a configuration file, detecting the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension
    /// or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> InfrastructureResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Creates a layered variable store with the configured batch variables.
    #[must_use]
    pub fn to_variables(&self) -> Variables {
        Variables::new(self.variables.clone())
    }
}
