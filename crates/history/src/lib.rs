//! Rolling history buffers feeding the dashboard charts.
//!
//! One [`TelemetryHistory`] holds everything the charts need:
//! - the shared [`LabelAxis`]
//! - aggregate series for the first GPU (utilisation, memory used)
//! - an [`EntityRegistry`] with GPU memory per camera

pub mod axis;
pub mod registry;
pub mod series;

pub use axis::LabelAxis;
pub use registry::EntityRegistry;
pub use series::MetricSeries;

use std::collections::BTreeMap;
use tracing::debug;

/// Samples kept per series unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 20;

/// Aggregate GPU reading for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuSample {
    pub utilization:    f64,
    pub memory_used_mb: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryHistory {
    labels:      LabelAxis,
    utilization: MetricSeries,
    memory:      MetricSeries,
    cameras:     EntityRegistry,
}

impl Default for TelemetryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl TelemetryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            labels:      LabelAxis::new(capacity),
            utilization: MetricSeries::new(capacity),
            memory:      MetricSeries::new(capacity),
            cameras:     EntityRegistry::new(capacity),
        }
    }

    /// Record one tick: advance the label axis, append the GPU aggregate if
    /// one was reported, append each camera's value and drop cameras that
    /// are no longer reported.
    ///
    /// A camera name listed twice in the same tick contributes the sum of
    /// its values as a single sample.
    pub fn record<'a, I>(&mut self, label: impl Into<String>, gpu: Option<GpuSample>, cameras: I)
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        self.labels.push(label);

        if let Some(gpu) = gpu {
            self.utilization.push(gpu.utilization);
            self.memory.push(gpu.memory_used_mb);
        }

        let mut this_tick: BTreeMap<&str, f64> = BTreeMap::new();
        for (name, value) in cameras {
            *this_tick.entry(name).or_insert(0.0) += value;
        }

        for (name, value) in &this_tick {
            self.cameras.push(name, *value);
        }

        let removed = self.cameras.prune(this_tick.keys().copied());
        if !removed.is_empty() {
            debug!(?removed, "cameras left the poll; history dropped");
        }
    }

    pub fn labels(&self) -> &LabelAxis {
        &self.labels
    }

    pub fn utilization(&self) -> &MetricSeries {
        &self.utilization
    }

    pub fn memory(&self) -> &MetricSeries {
        &self.memory
    }

    pub fn cameras(&self) -> &EntityRegistry {
        &self.cameras
    }

    /// Forget everything, e.g. when the dashboard shuts down.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.utilization.clear();
        self.memory.clear();
        self.cameras.clear();
    }
}
