//! YAML configuration file support for fuzzline.
//!
//! Lets users keep index and lookup settings in a single YAML file and load
//! them at runtime. Every field is optional; omitted fields take the
//! [`SearchConfig`] defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # fuzzline configuration
//! version: "1.0"
//! name: "phoenician corpus"
//!
//! index:
//!   n_gram_upto: 4
//!   downcase: true
//!
//! lookup:
//!   weighting: 0.7
//!   limit: 8
//!   threshold: 0.6
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use search::SearchConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct FuzzlineConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Index construction settings
    #[serde(default)]
    pub index: IndexYamlConfig,

    /// Lookup settings
    #[serde(default)]
    pub lookup: LookupYamlConfig,
}

impl FuzzlineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: FuzzlineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Flatten both sections into the config the search crate consumes.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig::new()
            .with_n_gram_upto(self.index.n_gram_upto)
            .with_downcase(self.index.downcase)
            .with_weighting(self.lookup.weighting)
            .with_limit(self.lookup.limit)
            .with_threshold(self.lookup.threshold)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.index.validate()?;
        self.lookup.validate()?;

        // Catch anything the section checks do not cover.
        self.to_search_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }
}

impl Default for FuzzlineConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            index: IndexYamlConfig::default(),
            lookup: LookupYamlConfig::default(),
        }
    }
}

/// Index section of the YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexYamlConfig {
    #[serde(default = "default_n_gram_upto")]
    pub n_gram_upto: usize,

    #[serde(default = "true_value")]
    pub downcase: bool,
}

impl IndexYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.n_gram_upto == 0 {
            return Err(ConfigLoadError::Validation(
                "index.n_gram_upto must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for IndexYamlConfig {
    fn default() -> Self {
        Self {
            n_gram_upto: default_n_gram_upto(),
            downcase: true,
        }
    }
}

/// Lookup section of the YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupYamlConfig {
    #[serde(default = "default_weighting")]
    pub weighting: f64,

    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LookupYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !self.weighting.is_finite() || !(0.0..=1.0).contains(&self.weighting) {
            return Err(ConfigLoadError::Validation(format!(
                "lookup.weighting must be within [0, 1] (got {})",
                self.weighting
            )));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigLoadError::Validation(format!(
                "lookup.threshold must be >= 0 (got {})",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for LookupYamlConfig {
    fn default() -> Self {
        Self {
            weighting: default_weighting(),
            limit: default_limit(),
            threshold: default_threshold(),
        }
    }
}

// Helper functions for serde defaults, mirroring `SearchConfig::default()`.
fn default_n_gram_upto() -> usize {
    SearchConfig::default().n_gram_upto
}
fn true_value() -> bool {
    true
}
fn default_weighting() -> f64 {
    SearchConfig::default().weighting
}
fn default_limit() -> usize {
    SearchConfig::default().limit
}
fn default_threshold() -> f64 {
    SearchConfig::default().threshold
}
