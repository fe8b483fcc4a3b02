//! Configuration module for GraphSearch-RS
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::Path;

/// Global settings instance
static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Initialize global settings from a file
pub fn init_from_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let mut settings = Settings::from_file(path)?;
    settings.merge_env();
    init(settings)
}

/// Initialize global settings with defaults
pub fn init_default() -> Result<()> {
    init(Settings::default())
}

/// Initialize global settings with the given value
pub fn init(settings: Settings) -> Result<()> {
    SETTINGS
        .set(settings)
        .map_err(|_| anyhow::anyhow!("Settings already initialized"))
}

/// Get the global settings, if initialized
pub fn get() -> Option<&'static Settings> {
    SETTINGS.get()
}

/// Check if settings have been initialized
pub fn is_initialized() -> bool {
    SETTINGS.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_settings_initialize_once() {
        // The only test that touches the global cell
        let first = init_default();
        assert!(first.is_ok());
        assert!(is_initialized());
        assert_eq!(get().map(|s| s.general.log_level.as_str()), Some("info"));

        let second = init(Settings::default());
        assert_eq!(second.unwrap_err().to_string(), "Settings already initialized");
    }
}
