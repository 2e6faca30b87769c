//! Polling-driven refresh engine for the GPU dashboard.
//!
//! - [`ScheduledTask`]   : cancellable repeating timer
//! - [`TelemetryPoller`] : Stopped/Active lifecycle, one task per tick
//! - [`Dashboard`]       : applies ticks to history and builds chart frames

pub mod dashboard;
pub mod poller;
pub mod schedule;

pub use dashboard::{Applied, Dashboard};
pub use poller::{PollerState, TelemetryPoller, DEFAULT_INTERVAL};
pub use schedule::ScheduledTask;
