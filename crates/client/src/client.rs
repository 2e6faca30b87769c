use serde::Deserialize;
use vaas_config::ApiConfig;
use vaas_core::{decode, CameraGpuReport, HardwareReport, Result, SystemStatus, VaasError};
use tracing::debug;

/// Hardware, GPU and system summary.
pub const HARDWARE: &str = "/hardware";
/// GPU memory attributed to each running camera.
pub const GPU_PER_CAMERA: &str = "/hardware/gpu-per-camera";
/// Container list and host uptime.
pub const SYSTEM_STATUS: &str = "/admin/system/status";

/// HTTP client for the VaaS admin API.
///
/// Only issues `GET`s; every response body is decoded into the typed
/// contract from `vaas-core`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http:     reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `config.base_url`, applying the optional request timeout.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| VaasError::Transport(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /hardware`.
    pub async fn hardware(&self) -> Result<HardwareReport> {
        self.get_json(HARDWARE).await
    }

    /// `GET /hardware/gpu-per-camera`.
    pub async fn gpu_per_camera(&self) -> Result<CameraGpuReport> {
        self.get_json(GPU_PER_CAMERA).await
    }

    /// `GET /admin/system/status`.
    pub async fn system_status(&self) -> Result<SystemStatus> {
        self.get_json(SYSTEM_STATUS).await
    }

    async fn get_json<T>(&self, endpoint: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| VaasError::Transport(format!("{endpoint}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VaasError::Status {
                endpoint: endpoint.to_string(),
                status:   status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| VaasError::Transport(format!("{endpoint}: {e}")))?;

        decode(endpoint, &body)
    }
}
