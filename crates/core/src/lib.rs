pub mod error;
pub mod event;
pub mod naming;
pub mod state;

pub use error::{Result, VaasError};
pub use event::Message;
pub use naming::next_camera_name;
pub use state::{
    decode, CameraGpuReport, CameraGpuUsage, ContainerInfo, GpuInfo, GpuProcess, GpuStatus,
    HardwareReport, SystemInfo, SystemStatus,
};
