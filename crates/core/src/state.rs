//! Typed contract for the telemetry endpoints.
//!
//! Every field defaults when missing or `null`, so a partially populated
//! payload still decodes; a body with the wrong shape fails in [`decode`].

use crate::error::{Result, VaasError};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode a JSON body for `endpoint`, turning shape errors into
/// [`VaasError::Malformed`].
pub fn decode<T>(endpoint: &str, body: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_slice(body).map_err(|e| VaasError::Malformed {
        endpoint: endpoint.to_string(),
        reason:   e.to_string(),
    })
}

/// Treat `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── GET /hardware ─────────────────────────────────────────────────────────────

/// Response of `GET /hardware`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareReport {
    #[serde(deserialize_with = "null_as_default")]
    pub system: SystemInfo,
    /// `null` when `nvidia-smi` is missing or reports no device.
    pub gpu: Option<GpuReport>,
    #[serde(deserialize_with = "null_as_default")]
    pub gpu_processes: Vec<GpuProcess>,
}

/// GPU availability as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpuStatus<'a> {
    /// At least one GPU reported.
    Ready(&'a [GpuInfo]),
    /// The GPU block is present and available but lists no device.
    NoDevices,
    /// No GPU block, or the backend flagged it unavailable.
    Unavailable,
}

impl HardwareReport {
    #[must_use]
    pub fn gpu_status(&self) -> GpuStatus<'_> {
        match &self.gpu {
            Some(gpu) if gpu.available && !gpu.gpus.is_empty() => GpuStatus::Ready(&gpu.gpus),
            Some(gpu) if gpu.available => GpuStatus::NoDevices,
            _ => GpuStatus::Unavailable,
        }
    }

    /// First GPU, the only one tracked by the aggregate charts.
    #[must_use]
    pub fn primary_gpu(&self) -> Option<&GpuInfo> {
        match self.gpu_status() {
            GpuStatus::Ready(gpus) => gpus.first(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuReport {
    pub available: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub gpus: Vec<GpuInfo>,
}

/// One row of `nvidia-smi --query-gpu`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuInfo {
    pub index:              u32,
    pub name:               String,
    /// Degrees Celsius.
    pub temperature:        f64,
    pub utilization_gpu:    f64,
    pub utilization_memory: f64,
    pub memory_used_mb:     f64,
    pub memory_total_mb:    f64,
    pub power_draw_w:       f64,
    pub power_limit_w:      f64,
}

impl GpuInfo {
    /// Memory usage in percent, `0.0` when the total is unknown.
    #[must_use]
    pub fn memory_percent(&self) -> f64 {
        percent_of(self.memory_used_mb, self.memory_total_mb)
    }

    /// Power draw in percent of the limit, `0.0` when the limit is unknown.
    #[must_use]
    pub fn power_percent(&self) -> f64 {
        percent_of(self.power_draw_w, self.power_limit_w)
    }
}

fn percent_of(used: f64, total: f64) -> f64 {
    if total > 0.0 {
        used / total * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuProcess {
    pub pid:           u32,
    pub name:          String,
    pub cmdline:       String,
    pub gpu_memory_mb: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub cpu:    CpuInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub memory: MemoryInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub disk:   DiskInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub ffmpeg_processes: Vec<FfmpegProcess>,
    pub ffmpeg_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuInfo {
    pub cores:   u32,
    pub threads: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryInfo {
    pub total_gb:     f64,
    pub used_gb:      f64,
    pub available_gb: f64,
    pub percent:      f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskInfo {
    pub total_gb: f64,
    pub used_gb:  f64,
    pub free_gb:  f64,
    pub percent:  f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfmpegProcess {
    pub pid:         u32,
    pub name:        String,
    pub cmdline:     String,
    pub cpu_percent: f64,
    pub memory_mb:   f64,
}

// ── GET /hardware/gpu-per-camera ──────────────────────────────────────────────

/// Response of `GET /hardware/gpu-per-camera`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraGpuReport {
    #[serde(deserialize_with = "null_as_default")]
    pub cameras: Vec<CameraGpuUsage>,
    pub total_gpu_memory_mb: f64,
    pub camera_count: Option<u32>,
    /// Set by the backend when it could not correlate processes to cameras.
    pub error: Option<String>,
}

impl CameraGpuReport {
    /// Backend-side failure message, if the report is degraded.
    #[must_use]
    pub fn degraded_reason(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraGpuUsage {
    pub camera_id:     Option<i64>,
    pub camera_name:   String,
    pub client_slug:   Option<String>,
    pub gpu_memory_mb: f64,
    pub process_count: u32,
}

// ── GET /admin/system/status ──────────────────────────────────────────────────

/// Response of `GET /admin/system/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    pub uptime_seconds: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub containers: Vec<ContainerInfo>,
}

/// One `docker compose ps --format json` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContainerInfo {
    pub service: Option<String>,
    pub name:    Option<String>,
    pub image:   Option<String>,
    pub state:   String,
}

impl ContainerInfo {
    /// Compose service name, falling back to the container name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.service
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("?")
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_with_null_gpu_is_unavailable() {
        let body = br#"{"system": {"cpu": {"percent": 12.5}}, "gpu": null, "gpu_processes": null}"#;
        let report: HardwareReport = decode("/hardware", body).unwrap();
        assert_eq!(report.gpu_status(), GpuStatus::Unavailable);
        assert_eq!(report.system.cpu.percent, 12.5);
        assert!(report.gpu_processes.is_empty());
        assert!(report.primary_gpu().is_none());
    }

    #[test]
    fn hardware_primary_gpu_is_first_listed() {
        let body = br#"{
            "gpu": {"available": true, "gpus": [
                {"index": 0, "name": "RTX A4000", "utilization_gpu": 41.0, "memory_used_mb": 2048},
                {"index": 1, "name": "RTX A2000"}
            ]}
        }"#;
        let report: HardwareReport = decode("/hardware", body).unwrap();
        let gpu = report.primary_gpu().unwrap();
        assert_eq!(gpu.name, "RTX A4000");
        assert_eq!(gpu.memory_used_mb, 2048.0);
    }

    #[test]
    fn available_gpu_block_without_devices() {
        let body = br#"{"gpu": {"available": true, "gpus": []}}"#;
        let report: HardwareReport = decode("/hardware", body).unwrap();
        assert_eq!(report.gpu_status(), GpuStatus::NoDevices);
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let err = decode::<HardwareReport>("/hardware", br#"{"system": "down"}"#).unwrap_err();
        assert!(matches!(err, VaasError::Malformed { ref endpoint, .. } if endpoint == "/hardware"));

        let err = decode::<CameraGpuReport>("/hardware/gpu-per-camera", b"<html>").unwrap_err();
        assert!(matches!(err, VaasError::Malformed { .. }));
    }

    #[test]
    fn percentages_guard_zero_totals() {
        let gpu = GpuInfo { memory_used_mb: 512.0, power_draw_w: 90.0, ..GpuInfo::default() };
        assert_eq!(gpu.memory_percent(), 0.0);
        assert_eq!(gpu.power_percent(), 0.0);

        let gpu = GpuInfo { memory_used_mb: 512.0, memory_total_mb: 2048.0, ..gpu };
        assert_eq!(gpu.memory_percent(), 25.0);
    }

    #[test]
    fn camera_report_surfaces_backend_error() {
        let body = br#"{"cameras": [], "total_gpu_memory_mb": 0, "error": "nvidia-smi timed out"}"#;
        let report: CameraGpuReport = decode("/hardware/gpu-per-camera", body).unwrap();
        assert!(report.cameras.is_empty());
        assert_eq!(report.degraded_reason(), Some("nvidia-smi timed out"));
    }

    #[test]
    fn container_falls_back_to_name() {
        let body = br#"{"uptime_seconds": 90061, "containers": [
            {"Name": "vaas-api-1", "State": "exited"},
            {"Service": "mediamtx", "Name": "vaas-mediamtx-1", "Image": "bluenviron/mediamtx", "State": "running"}
        ]}"#;
        let status: SystemStatus = decode("/admin/system/status", body).unwrap();
        assert_eq!(status.containers[0].display_name(), "vaas-api-1");
        assert!(!status.containers[0].is_running());
        assert_eq!(status.containers[1].display_name(), "mediamtx");
        assert!(status.containers[1].is_running());
    }
}
