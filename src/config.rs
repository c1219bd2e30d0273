//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML
//! file, then command-line overrides applied by the CLI. The defaults
//! reproduce the fixed file locations and line rules of the London
//! network so that running with no configuration at all does the job.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CONNECTIONS_OUTPUT, DEFAULT_LINES_INPUT,
    DEFAULT_STATIONS_INPUT, DEFAULT_STATIONS_OUTPUT,
};
use crate::error::{Result, TransitError};
use crate::normalize::{LineCatalog, LineNameNormalizer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input and output file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub stations_input: PathBuf,
    pub lines_input: PathBuf,
    pub stations_output: PathBuf,
    pub connections_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            stations_input: PathBuf::from(DEFAULT_STATIONS_INPUT),
            lines_input: PathBuf::from(DEFAULT_LINES_INPUT),
            stations_output: PathBuf::from(DEFAULT_STATIONS_OUTPUT),
            connections_output: PathBuf::from(DEFAULT_CONNECTIONS_OUTPUT),
        }
    }
}

/// What a pass does when a feature lacks a required field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Abort the whole pass on the first malformed feature
    #[default]
    Abort,
    /// Log and count the malformed feature, then continue
    Skip,
}

/// Processing behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub on_malformed: MalformedPolicy,

    /// Pretty-print output JSON instead of the compact form
    pub pretty: bool,

    /// Run both passes without writing output files
    pub dry_run: bool,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub processing: ProcessingConfig,

    /// Recognized lines; a `[[lines]]` list in the file replaces the
    /// built-in catalog entirely
    pub lines: LineCatalog,
}

impl Config {
    /// Platform default config file location, e.g.
    /// `~/.config/transit-geojson/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            TransitError::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| TransitError::configuration(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TransitError::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&contents)?;
        debug!(
            "Loaded config from {} ({} catalog lines)",
            path.display(),
            config.lines.len()
        );
        Ok(config)
    }

    /// Load from `path` if given, otherwise defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check the configuration is usable before any file is touched
    pub fn validate(&self) -> Result<()> {
        self.lines.validate()?;

        let paths = &self.paths;
        if paths.stations_output == paths.connections_output {
            return Err(TransitError::configuration(format!(
                "stations and connections would both be written to '{}'",
                paths.stations_output.display()
            )));
        }
        for output in [&paths.stations_output, &paths.connections_output] {
            if output == &paths.stations_input || output == &paths.lines_input {
                return Err(TransitError::configuration(format!(
                    "output '{}' would overwrite an input file",
                    output.display()
                )));
            }
        }

        Ok(())
    }

    /// Build the normalizer for this configuration's catalog
    pub fn normalizer(&self) -> Result<LineNameNormalizer> {
        LineNameNormalizer::new(&self.lines)
    }

    pub fn with_paths(mut self, paths: PathsConfig) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.processing.on_malformed = policy;
        self
    }

    pub fn with_dry_run(mut self) -> Self {
        self.processing.dry_run = true;
        self
    }

    pub fn with_catalog(mut self, catalog: LineCatalog) -> Self {
        self.lines = catalog;
        self
    }
}
