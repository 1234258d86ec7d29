//! Configuration management for the recommender dashboard

use crate::report::ReportStyle;
use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bundle: BundleConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model bundle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BundleConfig {
    /// Path to the bundle manifest exported by the training pipeline
    #[serde(default = "default_bundle_path")]
    pub path: String,
    /// Number of threads for ONNX inference per model (default: 1)
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

/// Report presentation configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Presentation style: "plain" or "cards"
    #[serde(default)]
    pub style: ReportStyle,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

fn default_bundle_path() -> String {
    "models/bundle.json".to_string()
}

fn default_intra_threads() -> usize {
    1
}

impl AppConfig {
    /// Load configuration from the default location, falling back to the
    /// built-in defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let path = Path::new("config/config.toml");
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bundle: BundleConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            path: default_bundle_path(),
            intra_threads: default_intra_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
