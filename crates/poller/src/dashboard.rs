use vaas_chart::{ChartFrame, Palette};
use vaas_config::{OverlapPolicy, VaasConfig};
use vaas_core::{CameraGpuReport, HardwareReport};
use vaas_history::{GpuSample, TelemetryHistory};
use tracing::{debug, warn};

/// Outcome of applying one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// History updated; this is the frame to paint.
    Frame(Box<ChartFrame>),
    /// Dropped because a newer tick was already applied.
    Discarded { newest: u64 },
}

/// Owns the chart history and the last reports the panels render from.
#[derive(Debug, Clone)]
pub struct Dashboard {
    history:  TelemetryHistory,
    palette:  Palette,
    overlap:  OverlapPolicy,
    /// Highest sequence number applied so far.
    newest:   Option<u64>,
    hardware: Option<HardwareReport>,
    cameras:  Option<CameraGpuReport>,
}

impl Dashboard {
    pub fn new(capacity: usize, palette: Palette, overlap: OverlapPolicy) -> Self {
        Self {
            history: TelemetryHistory::new(capacity),
            palette,
            overlap,
            newest: None,
            hardware: None,
            cameras: None,
        }
    }

    pub fn from_config(config: &VaasConfig) -> Self {
        Self::new(
            config.monitor.history_len,
            Palette::from_config(&config.ui),
            config.monitor.overlap,
        )
    }

    /// Write the result of tick `seq` into history and build its chart frame.
    ///
    /// With [`OverlapPolicy::Allow`] ticks apply in the order they resolve,
    /// so a slow older tick lands after a newer one.
    pub fn apply(
        &mut self,
        seq: u64,
        label: impl Into<String>,
        hardware: HardwareReport,
        cameras: CameraGpuReport,
    ) -> Applied {
        if let (OverlapPolicy::DropStale, Some(newest)) = (self.overlap, self.newest) {
            if seq < newest {
                debug!(seq, newest, "stale tick discarded");
                return Applied::Discarded { newest };
            }
        }

        if let Some(reason) = cameras.degraded_reason() {
            warn!(seq, "per-camera GPU report degraded: {reason}");
        }

        let gpu = hardware.primary_gpu().map(|g| GpuSample {
            utilization:    g.utilization_gpu,
            memory_used_mb: g.memory_used_mb,
        });

        self.history.record(
            label,
            gpu,
            cameras
                .cameras
                .iter()
                .map(|c| (c.camera_name.as_str(), c.gpu_memory_mb)),
        );

        self.newest = Some(self.newest.map_or(seq, |n| n.max(seq)));
        self.hardware = Some(hardware);
        self.cameras = Some(cameras);

        Applied::Frame(Box::new(ChartFrame::build(&self.history, &self.palette)))
    }

    pub fn history(&self) -> &TelemetryHistory {
        &self.history
    }

    /// Last applied `/hardware` report.
    pub fn hardware(&self) -> Option<&HardwareReport> {
        self.hardware.as_ref()
    }

    /// Last applied `/hardware/gpu-per-camera` report.
    pub fn cameras(&self) -> Option<&CameraGpuReport> {
        self.cameras.as_ref()
    }

    pub fn frame(&self) -> ChartFrame {
        ChartFrame::build(&self.history, &self.palette)
    }

    /// Drop all history and cached reports.
    pub fn clear(&mut self) {
        self.history.clear();
        self.newest = None;
        self.hardware = None;
        self.cameras = None;
    }
}
