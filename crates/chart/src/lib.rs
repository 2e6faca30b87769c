//! Turns rolling history into chart datasets aligned on a shared time axis.

pub mod palette;
pub mod sink;
pub mod sync;

pub use palette::{Color, Palette};
pub use sink::{ChannelSink, ChartSink, NullSink};
pub use sync::{align, camera_datasets, ChartDataset, ChartFrame};
