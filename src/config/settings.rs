//! Settings structures for GraphSearch-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable pointing at a settings file
pub const SETTINGS_PATH_ENV: &str = "GRAPHSEARCH_SETTINGS_PATH";

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub dispatch: DispatchSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Load settings from the first file found, falling back to defaults,
    /// then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut settings = match Self::locate() {
            Some(path) => {
                info!("Loading settings from: {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                info!("No settings file found, using defaults");
                Settings::default()
            }
        };
        settings.merge_env();
        Ok(settings)
    }

    /// Find a settings file; the environment variable wins over default paths
    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        [
            PathBuf::from("graphsearch.yml"),
            PathBuf::from("config/graphsearch.yml"),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// Merge with environment variables (GRAPHSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GRAPHSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("GRAPHSEARCH_LOG_LEVEL") {
            self.general.log_level = val;
        }
        if let Some(val) = lookup("GRAPHSEARCH_MAX_CONCURRENCY") {
            if let Ok(limit) = val.parse() {
                self.dispatch.max_concurrency = Some(limit);
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Log filter directive used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

/// Dispatcher settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// Maximum strategies running at once; unbounded when unset
    pub max_concurrency: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.general.debug);
        assert_eq!(settings.general.log_level, "info");
        assert_eq!(settings.dispatch.max_concurrency, None);
    }

    #[test]
    fn test_partial_yaml() {
        let settings = Settings::from_yaml_str("dispatch:\n  max_concurrency: 4\n").unwrap();
        assert_eq!(settings.dispatch.max_concurrency, Some(4));
        assert_eq!(settings.general.log_level, "info");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Settings::from_yaml_str("dispatch: [1, 2").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GRAPHSEARCH_DEBUG", "true"),
            ("GRAPHSEARCH_LOG_LEVEL", "graphsearch_rs=trace"),
            ("GRAPHSEARCH_MAX_CONCURRENCY", "8"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_from(|key| env.get(key).map(|v| v.to_string()));

        assert!(settings.general.debug);
        assert_eq!(settings.general.log_level, "graphsearch_rs=trace");
        assert_eq!(settings.dispatch.max_concurrency, Some(8));
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut settings = Settings::default();
        settings.merge_from(|key| match key {
            "GRAPHSEARCH_MAX_CONCURRENCY" => Some("many".to_string()),
            "GRAPHSEARCH_DEBUG" => Some("yes please".to_string()),
            _ => None,
        });

        assert!(!settings.general.debug);
        assert_eq!(settings.dispatch.max_concurrency, None);
    }
}
