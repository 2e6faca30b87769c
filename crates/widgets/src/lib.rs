pub mod chart;
pub mod containers;
pub mod format;
pub mod gpu;
pub mod processes;
pub mod system;
pub mod toast;

pub use chart::ChartWidget;
pub use containers::ContainersWidget;
pub use format::format_uptime;
pub use gpu::GpuCardsWidget;
pub use processes::GpuProcessesWidget;
pub use system::SystemStatsWidget;
pub use toast::{Notifier, Toast, ToastKind};
