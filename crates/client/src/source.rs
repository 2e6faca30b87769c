use crate::client::ApiClient;
use std::future::Future;
use std::sync::Arc;
use vaas_core::{CameraGpuReport, HardwareReport, Result};

/// The two resources fetched on every poll tick.
///
/// [`ApiClient`] is the production implementation; tests plug in scripted
/// sources to control timing and failures.
pub trait TelemetrySource: Send + Sync + 'static {
    fn hardware(&self) -> impl Future<Output = Result<HardwareReport>> + Send;

    fn gpu_per_camera(&self) -> impl Future<Output = Result<CameraGpuReport>> + Send;
}

impl TelemetrySource for ApiClient {
    fn hardware(&self) -> impl Future<Output = Result<HardwareReport>> + Send {
        ApiClient::hardware(self)
    }

    fn gpu_per_camera(&self) -> impl Future<Output = Result<CameraGpuReport>> + Send {
        ApiClient::gpu_per_camera(self)
    }
}

impl<S: TelemetrySource> TelemetrySource for Arc<S> {
    fn hardware(&self) -> impl Future<Output = Result<HardwareReport>> + Send {
        S::hardware(self)
    }

    fn gpu_per_camera(&self) -> impl Future<Output = Result<CameraGpuReport>> + Send {
        S::gpu_per_camera(self)
    }
}
