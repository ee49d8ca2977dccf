//! Application configuration, read from an optional JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GENDER_ATLAS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "gender_atlas.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Decade/region enrollment averages for the bar chart.
    pub gap_csv: PathBuf,
    /// Region/year indicators for the life path.
    pub life_path_csv: PathBuf,
    /// TopoJSON world boundaries.
    pub world_topology: PathBuf,
    pub topology_object: String,
    pub window_size: [f32; 2],
    pub first_decade: i64,
    pub last_decade: i64,
    pub default_decade: i64,
    pub transition_ms: u64,
    /// Degrees of longitude per frame.
    pub rotation_velocity: f64,
    /// Degrees per dragged pixel.
    pub drag_sensitivity: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gap_csv: PathBuf::from("data/gender_clean_regions.csv"),
            life_path_csv: PathBuf::from("data/gender_regions_decades.csv"),
            world_topology: PathBuf::from("data/countries-110m.json"),
            topology_object: "countries".to_string(),
            window_size: [1400.0, 900.0],
            first_decade: 1970,
            last_decade: 2010,
            default_decade: 2010,
            transition_ms: 900,
            rotation_velocity: crate::globe::DEFAULT_VELOCITY,
            drag_sensitivity: crate::globe::DEFAULT_SENSITIVITY,
        }
    }
}

impl AppConfig {
    pub fn decade_range(&self) -> RangeInclusive<i64> {
        self.first_decade..=self.last_decade
    }

    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))
    }

    /// Config from `$GENDER_ATLAS_CONFIG` or `./gender_atlas.json`, else defaults.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_or_default(Path::new(&path), true),
            None => Self::load_or_default(Path::new(DEFAULT_CONFIG_FILE), false),
        }
    }

    /// A missing optional file silently yields defaults; any other failure warns.
    fn load_or_default(path: &Path, explicit: bool) -> Self {
        if !explicit && !path.exists() {
            tracing::debug!("No config at '{}', using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!("Loaded config from '{}'", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.decade_range(), 1970..=2010);
        assert_eq!(config.default_decade, 2010);
        assert_eq!(config.transition_secs(), 0.9);
        assert_eq!(config.rotation_velocity, 0.02);
        assert_eq!(config.drag_sensitivity, 0.4);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = config_file(r#"{ "default_decade": 1990, "gap_csv": "other.csv" }"#);
        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.default_decade, 1990);
        assert_eq!(config.gap_csv, PathBuf::from("other.csv"));
        assert_eq!(config.last_decade, 2010);
        assert_eq!(config.topology_object, "countries");
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let file = config_file("{ not json");
        assert!(AppConfig::from_file(file.path()).is_err());
        assert_eq!(AppConfig::load_or_default(file.path(), true), AppConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(AppConfig::load_or_default(&missing, false), AppConfig::default());
        assert_eq!(AppConfig::load_or_default(&missing, true), AppConfig::default());
    }
}
