//! User configuration file handling
//!
//! Manages settings from ~/.config/fontsmith/settings.json

use crate::data::OutputFormat;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// User configuration from ~/.config/fontsmith/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// FontForge executable to run instead of looking it up on PATH
    pub fontforge_path: Option<PathBuf>,
    /// Output format for `convert` when `--format` is not given
    pub default_format: Option<OutputFormat>,
    /// Simplify value for `optimize` when `--simplify` is not given
    pub default_simplify: Option<f64>,
    /// File name suffix for fonts written by `optimize`
    pub optimize_suffix: Option<String>,
    /// Also write logs to ~/.config/fontsmith/logs/
    pub log_to_file: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the fontsmith config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("fontsmith")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from the user config file, `None` if there is none
    pub fn load() -> anyhow::Result<Option<Self>> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file written by `--new-config`, spelling out every default
    pub fn with_defaults() -> Self {
        Self {
            fontforge_path: None,
            default_format: Some(OutputFormat::default()),
            default_simplify: Some(crate::commands::optimize::DEFAULT_SIMPLIFY),
            optimize_suffix: Some(crate::commands::optimize::DEFAULT_SUFFIX.to_string()),
            log_to_file: Some(false),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/fontsmith directory structure
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();

        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = Self::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::with_defaults().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View logs written with --log-file in: {:?}", logs_dir);

        Ok(())
    }
}
