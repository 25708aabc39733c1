//! Settings file handling.
//!
//! Loads user configuration from an INI file with compiled-in defaults. A
//! missing file yields the defaults; a present file overrides per key.
//! The library never reads configuration implicitly; the CLI loads
//! settings once at startup and passes values down.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

/// Default snapshot/support-file directory.
pub const DEFAULT_SUPPORT_DIR: &str = "support";

/// Default log directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Datasets indexed when the config file does not say otherwise.
pub const DEFAULT_DATASETS: &[&str] = &["HLSS30.v2.0", "HLSL30.v2.0"];

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read or parse the config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// A value failed validation
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// User settings for the support store, logging, and search behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding catalog snapshots and geometry support files
    pub support_dir: PathBuf,
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Dataset tags to index
    pub datasets: Vec<String>,
    /// Use the parallel search driver
    pub parallel_search: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            support_dir: PathBuf::from(DEFAULT_SUPPORT_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            datasets: DEFAULT_DATASETS.iter().map(|s| s.to_string()).collect(),
            parallel_search: false,
        }
    }
}

impl Settings {
    /// Load settings from an INI file.
    ///
    /// A missing file returns the defaults. Recognized keys:
    /// `[paths] support_dir`, `[paths] log_dir`,
    /// `[catalog] datasets` (comma-separated), `[search] parallel`.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path)?;
        let mut settings = Self::default();

        if let Some(section) = ini.section(Some("paths")) {
            if let Some(value) = section.get("support_dir") {
                settings.support_dir = PathBuf::from(value);
            }
            if let Some(value) = section.get("log_dir") {
                settings.log_dir = PathBuf::from(value);
            }
        }

        if let Some(section) = ini.section(Some("catalog")) {
            if let Some(value) = section.get("datasets") {
                let datasets: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                if datasets.is_empty() {
                    return Err(SettingsError::InvalidValue {
                        section: "catalog".to_string(),
                        key: "datasets".to_string(),
                        value: value.to_string(),
                        reason: "expected a comma-separated list of dataset tags".to_string(),
                    });
                }
                settings.datasets = datasets;
            }
        }

        if let Some(section) = ini.section(Some("search")) {
            if let Some(value) = section.get("parallel") {
                settings.parallel_search =
                    parse_bool(value).ok_or_else(|| SettingsError::InvalidValue {
                        section: "search".to_string(),
                        key: "parallel".to_string(),
                        value: value.to_string(),
                        reason: "expected true or false".to_string(),
                    })?;
            }
        }

        Ok(settings)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
