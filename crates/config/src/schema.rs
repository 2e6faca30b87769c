use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure parsed from `monitor.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaasConfig {
    /// Where the telemetry API lives.
    pub api: ApiConfig,
    /// Polling cadence and history settings.
    pub monitor: MonitorConfig,
    /// Chart colours and notification timing.
    pub ui: UiConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, e.g. `http://host/api`.
    pub base_url: String,
    /// Per-request timeout. Unset = requests may hang until the server answers.
    pub timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url:   "http://localhost:8000/api".to_string(),
            timeout_ms: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// What to do when an older tick resolves after a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Apply every tick in resolution order (last write wins).
    #[default]
    Allow,
    /// Discard ticks older than the newest applied one.
    DropStale,
}

/// Telemetry poller settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Poll period in milliseconds.
    pub refresh_ms: u64,
    /// Periods the operator may switch between at runtime.
    pub refresh_presets: Vec<u64>,
    /// Samples kept per chart series.
    pub history_len: usize,
    /// Start polling as soon as the monitor launches.
    pub autostart: bool,
    pub overlap: OverlapPolicy,
    /// Period of the container/uptime refresh in milliseconds.
    pub system_status_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_ms:       3_000,
            refresh_presets:  vec![1_000, 3_000, 5_000, 10_000],
            history_len:      20,
            autostart:        true,
            overlap:          OverlapPolicy::Allow,
            system_status_ms: 30_000,
        }
    }
}

impl MonitorConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    pub fn system_status_interval(&self) -> Duration {
        Duration::from_millis(self.system_status_ms)
    }

    /// `true` if `ms` is one of the configured presets.
    pub fn is_preset(&self, ms: u64) -> bool {
        self.refresh_presets.contains(&ms)
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Series colours (hex), assigned to cameras in sorted-name order.
    pub palette: Vec<String>,
    /// How long a toast stays visible, in milliseconds.
    pub toast_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            palette: [
                "#3b82f6", // blue
                "#10b981", // emerald
                "#f59e0b", // amber
                "#ef4444", // red
                "#8b5cf6", // violet
                "#ec4899", // pink
                "#14b8a6", // teal
                "#f97316", // orange
                "#06b6d4", // cyan
                "#84cc16", // lime
            ]
            .map(String::from)
            .to_vec(),
            toast_ms: 3_000,
        }
    }
}

impl UiConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}
