//! Device configuration
//!
//! `device.toml` is compiled into the image and parsed once at boot.

use defmt::*;
use resq_core::config::{parse_config, AlertConfig};

/// Embedded configuration (edit device.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../../device.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load() -> AlertConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs validates device.toml, so this only trips on parser drift
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            AlertConfig::default()
        }
    }
}
