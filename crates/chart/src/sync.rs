use crate::palette::{Color, Palette};
use vaas_history::TelemetryHistory;

/// One line on a chart, aligned index-for-index with the frame's labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data:  Vec<f64>,
    pub color: Color,
    /// Area under the line is filled (aggregate charts only).
    pub fill:  bool,
    /// Fixed upper bound of the y axis, if the metric has one.
    pub ceiling: Option<f64>,
}

/// Everything needed to repaint the GPU charts after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub labels:      Vec<String>,
    pub utilization: ChartDataset,
    pub memory:      ChartDataset,
    /// One dataset per camera, sorted by camera name.
    pub cameras:     Vec<ChartDataset>,
    pub show_legend: bool,
}

impl ChartFrame {
    /// Ticks without GPU data advance the label axis but add no aggregate
    /// sample, so after one the utilisation and memory lines are re-aligned
    /// to the newest labels: earlier samples shift one label to the right.
    pub fn build(history: &TelemetryHistory, palette: &Palette) -> Self {
        let axis_len = history.labels().len();

        let utilization = ChartDataset {
            label:   "GPU utilization (%)".to_string(),
            data:    align(history.utilization().iter(), axis_len),
            color:   Color::BLUE,
            fill:    true,
            ceiling: Some(100.0),
        };

        let memory = ChartDataset {
            label:   "GPU memory (MB)".to_string(),
            data:    align(history.memory().iter(), axis_len),
            color:   Color::AMBER,
            fill:    true,
            ceiling: None,
        };

        let cameras = camera_datasets(history, palette);

        Self {
            labels: history.labels().to_vec(),
            utilization,
            memory,
            show_legend: !cameras.is_empty(),
            cameras,
        }
    }
}

/// One dataset per camera; colours follow sorted name order.
pub fn camera_datasets(history: &TelemetryHistory, palette: &Palette) -> Vec<ChartDataset> {
    let axis_len = history.labels().len();

    history
        .cameras()
        .iter()
        .enumerate()
        .map(|(index, (name, series))| ChartDataset {
            label:   name.to_string(),
            data:    align(series.iter(), axis_len),
            color:   palette.color_for(index),
            fill:    false,
            ceiling: None,
        })
        .collect()
}

/// Fit `samples` to an axis of `axis_len` labels.
///
/// Shorter input is left-padded with zeros; longer input keeps its most
/// recent `axis_len` samples. The samples themselves are not modified.
///
/// Alignment is right-anchored: the newest sample always sits under the
/// newest label, whatever ticks in between went unrecorded.
pub fn align<I>(samples: I, axis_len: usize) -> Vec<f64>
where
    I: ExactSizeIterator<Item = f64>,
{
    let len = samples.len();
    if len >= axis_len {
        return samples.skip(len - axis_len).collect();
    }

    let mut out = vec![0.0; axis_len - len];
    out.extend(samples);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaas_history::GpuSample;

    #[test]
    fn short_series_is_left_padded() {
        let aligned = align([7.0, 8.0].into_iter(), 5);
        assert_eq!(aligned, vec![0.0, 0.0, 0.0, 7.0, 8.0]);
    }

    #[test]
    fn long_series_keeps_most_recent() {
        let aligned = align([1.0, 2.0, 3.0, 4.0].into_iter(), 2);
        assert_eq!(aligned, vec![3.0, 4.0]);
        assert!(align([1.0].into_iter(), 0).is_empty());
    }

    #[test]
    fn new_camera_aligns_with_existing_axis() {
        let mut history = TelemetryHistory::new(20);
        for (i, label) in ["t0", "t1", "t2"].iter().enumerate() {
            history.record(*label, None, [("cam1", i as f64)]);
        }
        history.record("t3", None, [("cam1", 3.0), ("cam2", 40.0)]);
        history.record("t4", None, [("cam1", 4.0), ("cam2", 50.0)]);

        let datasets = camera_datasets(&history, &Palette::default());
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].data, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(datasets[1].label, "cam2");
        assert_eq!(datasets[1].data, vec![0.0, 0.0, 0.0, 40.0, 50.0]);
        // Padding is a view; the stored series is untouched.
        assert_eq!(history.cameras().get("cam2").unwrap().len(), 2);
    }

    #[test]
    fn colours_follow_sorted_names_and_shift_on_removal() {
        let palette = Palette::default();
        let mut history = TelemetryHistory::new(20);
        history.record("t0", None, [("cam3", 1.0), ("cam1", 1.0), ("cam2", 1.0)]);

        let before = camera_datasets(&history, &palette);
        let names: Vec<_> = before.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(names, vec!["cam1", "cam2", "cam3"]);
        assert_eq!(before[2].color, palette.color_for(2));

        history.record("t1", None, [("cam3", 1.0), ("cam2", 1.0)]);
        let after = camera_datasets(&history, &palette);
        assert_eq!(after[1].label, "cam3");
        assert_eq!(after[1].color, palette.color_for(1));
    }

    #[test]
    fn eleventh_camera_reuses_first_colour() {
        let palette = Palette::default();
        let names: Vec<String> = (0..11).map(|i| format!("cam{i:02}")).collect();
        let mut history = TelemetryHistory::new(20);
        history.record("t0", None, names.iter().map(|n| (n.as_str(), 1.0)));

        let datasets = camera_datasets(&history, &palette);
        assert_eq!(datasets[10].color, datasets[0].color);
    }

    #[test]
    fn frame_without_cameras_hides_legend() {
        let mut history = TelemetryHistory::new(20);
        history.record("t0", Some(GpuSample { utilization: 30.0, memory_used_mb: 900.0 }), []);
        history.record("t1", None, []);

        let frame = ChartFrame::build(&history, &Palette::default());
        assert_eq!(frame.labels, vec!["t0", "t1"]);
        assert!(frame.cameras.is_empty());
        assert!(!frame.show_legend);
        assert_eq!(frame.utilization.data, vec![0.0, 30.0]);
        assert_eq!(frame.utilization.ceiling, Some(100.0));
        assert_eq!(frame.memory.data, vec![0.0, 900.0]);
    }

    #[test]
    fn gpu_gap_shifts_aggregate_samples_right() {
        let sample = |u: f64| Some(GpuSample { utilization: u, memory_used_mb: u });
        let mut history = TelemetryHistory::new(20);
        history.record("t0", sample(10.0), []);
        history.record("t1", sample(20.0), []);
        history.record("t2", None, []);

        let frame = ChartFrame::build(&history, &Palette::default());
        assert_eq!(frame.labels, vec!["t0", "t1", "t2"]);
        assert_eq!(frame.utilization.data, vec![0.0, 10.0, 20.0]);
        assert_eq!(history.utilization().to_vec(), vec![10.0, 20.0]);
    }
}
