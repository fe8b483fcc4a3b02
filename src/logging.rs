//! Logging setup

use crate::config::GeneralSettings;
use tracing_subscriber::EnvFilter;

/// Filter directive for the given settings when RUST_LOG is unset
pub fn default_directive(settings: &GeneralSettings) -> &str {
    if settings.debug {
        "debug"
    } else {
        &settings.log_level
    }
}

/// Install a global fmt subscriber
///
/// Returns `false` when a subscriber was already installed.
pub fn init(settings: &GeneralSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(settings)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        let mut settings = GeneralSettings::default();
        assert_eq!(default_directive(&settings), "info");

        settings.log_level = "graphsearch_rs=trace".to_string();
        assert_eq!(default_directive(&settings), "graphsearch_rs=trace");

        settings.debug = true;
        assert_eq!(default_directive(&settings), "debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let settings = GeneralSettings::default();
        init(&settings);
        assert!(!init(&settings));
    }
}
