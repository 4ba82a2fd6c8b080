//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use surveysavvy_extractor::ExtractorConfig;
use surveysavvy_importer::ImportConfig;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database file
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Output settings
    #[serde(default)]
    pub settings: Settings,

    /// Report layout
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Discipline and campus handling
    #[serde(default)]
    pub import: ImportConfig,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and default database.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".surveysavvy"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// `path` if given, otherwise the default location.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::path(),
        }
    }

    /// Load configuration from a specific file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the extractor and import sections.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.import
            .validate()
            .map_err(|e| CliError::Config(format!("[import] {}", e)))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            settings: Settings::default(),
            extractor: ExtractorConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_database() -> PathBuf {
    Config::home()
        .map(|home| home.join("surveysavvy.db"))
        .unwrap_or_else(|_| PathBuf::from("surveysavvy.db"))
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
