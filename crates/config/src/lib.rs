pub mod schema;
pub mod watcher;

pub use schema::{ApiConfig, MonitorConfig, OverlapPolicy, UiConfig, VaasConfig};
pub use watcher::{ConfigEvent, ConfigWatcher};

use vaas_core::{Result, VaasError};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `VaasConfig::default()` if
/// the file doesn't exist so the monitor always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<VaasConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(VaasConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| VaasError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<VaasConfig> {
    let config: VaasConfig =
        toml::from_str(raw).map_err(|e| VaasError::Config(format!("TOML parse error: {e}")))?;
    validate(&config)?;
    Ok(config)
}

/// Reject values the poller or chart sync cannot work with.
pub fn validate(config: &VaasConfig) -> Result<()> {
    let monitor = &config.monitor;

    if monitor.refresh_ms == 0 {
        return Err(VaasError::Config("monitor.refresh_ms must be > 0".into()));
    }
    if monitor.system_status_ms == 0 {
        return Err(VaasError::Config("monitor.system_status_ms must be > 0".into()));
    }
    if monitor.history_len == 0 {
        return Err(VaasError::Config("monitor.history_len must be > 0".into()));
    }
    if let Some(bad) = monitor.refresh_presets.iter().find(|ms| **ms == 0) {
        return Err(VaasError::Config(format!("invalid refresh preset: {bad}")));
    }
    if !monitor.is_preset(monitor.refresh_ms) {
        tracing::warn!(
            refresh_ms = monitor.refresh_ms,
            "refresh_ms is not one of the configured presets"
        );
    }

    if config.ui.palette.is_empty() {
        return Err(VaasError::Config("ui.palette must list at least one colour".into()));
    }
    if let Some(bad) = config.ui.palette.iter().find(|c| !is_hex_color(c)) {
        return Err(VaasError::Config(format!("invalid palette colour '{bad}'")));
    }

    if config.api.base_url.trim().is_empty() {
        return Err(VaasError::Config("api.base_url must not be empty".into()));
    }

    Ok(())
}

/// `#RRGGBB` or `#RRGGBBAA`.
fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("vaas").join("monitor.toml")
}
