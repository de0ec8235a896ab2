use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Environment variable overriding `data_path`.
pub const DATA_PATH_ENV: &str = "BIKE_DASHBOARD_DATA";

/// Startup settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Daily rental table loaded at startup.
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    /// Height of each chart in points.
    pub chart_height: f32,
    /// Caption shown under the last chart.
    pub footer: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("main_data.csv"),
            window_size: [1280.0, 900.0],
            chart_height: 320.0,
            footer: "Copyright © Fajri Fathur Rahman 2024".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read `dashboard.json` from the working directory and apply the
    /// environment override.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE), std::env::var_os(DATA_PATH_ENV))
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: &Path, data_override: Option<OsString>) -> Result<Self> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        } else {
            Self::default()
        };

        if let Some(data_path) = data_override.filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(data_path);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = DashboardConfig::load_from(Path::new("/nonexistent/dashboard.json"), None).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_partial_file_and_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "chart_height": 250.0, "data_path": "data/day.csv" }}"#).unwrap();

        let config = DashboardConfig::load_from(file.path(), None).unwrap();
        assert_eq!(config.chart_height, 250.0);
        assert_eq!(config.data_path, PathBuf::from("data/day.csv"));
        assert_eq!(config.window_size, [1280.0, 900.0]);
        assert_eq!(config.footer, "Copyright © Fajri Fathur Rahman 2024");

        let config = DashboardConfig::load_from(file.path(), Some("other.parquet".into())).unwrap();
        assert_eq!(config.data_path, PathBuf::from("other.parquet"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = DashboardConfig::load_from(file.path(), None).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}
