//! Report configuration and its persistence.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::datasets::SourceKind;
use crate::Result;

/// Presentation settings. The engine itself takes no configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Report heading
    pub title: String,
    /// Decimal places for percentages and correlation
    pub decimals: usize,
    /// Directory reports are written to when no explicit path is given
    pub output_dir: PathBuf,
    /// Dataset used when the CLI is not told otherwise
    pub default_source: SourceKind,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Diversification of Risk Calculator".to_string(),
            decimals: 2,
            output_dir: PathBuf::from("."),
            default_source: SourceKind::Reference,
        }
    }
}

impl ReportConfig {
    /// Default config file path.
    ///
    /// Default path: `~/.diversify/config.json`
    /// Can be overridden with `DIVERSIFY_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("DIVERSIFY_CONFIG") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".diversify/config.json"))
            .unwrap_or_else(|| PathBuf::from("diversify.json"))
    }

    /// Load from the default path, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Where a report named `file_name` goes under `output_dir`.
    pub fn report_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
