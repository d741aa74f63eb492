//! Configuration structures for the `warung` tooling.
//!
//! Only input/output handling is configurable. The line parser's date
//! patterns and extraction order are fixed.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, WarungError};

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WarungConfig {
    /// Output configuration.
    pub output: OutputConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

/// Output rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when `--format` is not given ("json", "csv", "text").
    pub format: String,

    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Print parser warnings to stderr.
    pub show_warnings: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty_json: true,
            show_warnings: false,
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions accepted as OCR line files.
    pub extensions: Vec<String>,

    /// Keep going when a file fails to load.
    pub continue_on_error: bool,

    /// Maximum number of files parsed concurrently.
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string(), "json".to_string()],
            continue_on_error: false,
            max_concurrency: 4,
        }
    }
}

impl BatchConfig {
    /// Check whether a path's extension is accepted for batch input.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl WarungConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the CLI cannot act on.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.output.format.as_str(), "json" | "csv" | "text") {
            return Err(WarungError::Config(format!(
                "unknown output format: {}",
                self.output.format
            )));
        }
        if self.batch.max_concurrency == 0 {
            return Err(WarungError::Config(
                "batch.max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: WarungConfig =
            serde_json::from_str(r#"{"output": {"format": "csv"}}"#).unwrap();

        assert_eq!(config.output.format, "csv");
        assert!(config.output.pretty_json);
        assert_eq!(config.batch.max_concurrency, 4);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = WarungConfig::default();
        config.batch.continue_on_error = true;
        config.save(&path).unwrap();

        let loaded = WarungConfig::from_file(&path).unwrap();
        assert!(loaded.batch.continue_on_error);
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let mut config = WarungConfig::default();
        config.output.format = "xlsx".to_string();

        assert!(matches!(config.validate(), Err(WarungError::Config(_))));
    }

    #[test]
    fn test_batch_accepts() {
        let batch = BatchConfig::default();

        assert!(batch.accepts(Path::new("scans/a.TXT")));
        assert!(batch.accepts(Path::new("b.json")));
        assert!(!batch.accepts(Path::new("c.png")));
        assert!(!batch.accepts(Path::new("noext")));
    }
}
