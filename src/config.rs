use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::chart::spec::DEFAULT_CATEGORY_COLUMN;

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "brew-explorer.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup settings.  Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Dataset read once at startup.
    pub dataset_path: PathBuf,
    /// Categorical column that groups and colours box plots.
    pub category_column: String,
    /// Number of histogram bins.
    pub histogram_bins: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/cleaned_starbucks.csv"),
            category_column: DEFAULT_CATEGORY_COLUMN.to_string(),
            histogram_bins: 30,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl AppConfig {
    /// `./brew-explorer.json` when present, otherwise defaults.
    pub fn load() -> Result<Self> {
        Self::load_in(Path::new("."))
    }

    /// Look for the config file in `dir`.
    pub fn load_in(dir: &Path) -> Result<Self> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            return Self::from_file(&path);
        }
        Ok(Self::default())
    }

    /// Read and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.histogram_bins = config.histogram_bins.max(1);
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"histogram_bins": 0, "dataset_path": "drinks.parquet"}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("drinks.parquet"));
        assert_eq!(config.histogram_bins, 1);
        assert_eq!(config.category_column, "Beverage_category");
        assert_eq!(config.window_width, 1200.0);
    }

    #[test]
    fn directory_without_config_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(AppConfig::load_in(dir.path()).unwrap(), AppConfig::default());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{"category_column": "Beverage"}"#,
        )
        .unwrap();
        let config = AppConfig::load_in(dir.path()).unwrap();
        assert_eq!(config.category_column, "Beverage");
        assert_eq!(config.histogram_bins, 30);
    }

    #[test]
    fn unknown_keys_and_missing_files_fail() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"histogram_binz": 10}}"#).unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
        assert!(AppConfig::from_file(Path::new("/nonexistent/brew-explorer.json")).is_err());
    }
}
