pub mod client;
pub mod source;

pub use client::{ApiClient, GPU_PER_CAMERA, HARDWARE, SYSTEM_STATUS};
pub use source::TelemetrySource;
