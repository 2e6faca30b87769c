use vaas_chart::{ChartDataset, ChartFrame};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Sparkline rendering of a [`ChartFrame`], one line per dataset.
#[derive(Debug, Default)]
pub struct ChartWidget {
    /// Colour each line with 24-bit ANSI escapes.
    pub ansi: bool,
}

impl ChartWidget {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    pub fn view(&self, frame: &ChartFrame) -> Vec<String> {
        let span = match (frame.labels.first(), frame.labels.last()) {
            (Some(first), Some(last)) => format!("{first} → {last}"),
            _ => "no samples yet".to_string(),
        };

        let mut lines = vec![format!("GPU history ({span})")];
        lines.push(self.line(&frame.utilization));
        lines.push(self.line(&frame.memory));

        if frame.show_legend {
            lines.push("GPU memory per camera (MB)".to_string());
            lines.extend(frame.cameras.iter().map(|d| self.line(d)));
        }
        lines
    }

    fn line(&self, dataset: &ChartDataset) -> String {
        let latest = dataset.data.last().copied().unwrap_or(0.0);
        let text = format!(
            "{:<22} {} {latest:.0}",
            dataset.label,
            sparkline(&dataset.data, dataset.ceiling)
        );

        if self.ansi {
            let [r, g, b, _] = dataset.color.to_rgba8();
            format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
        } else {
            text
        }
    }
}

/// Scale `data` to block characters. Without a `ceiling` the largest sample
/// sets the top of the scale.
pub fn sparkline(data: &[f64], ceiling: Option<f64>) -> String {
    let top = ceiling.unwrap_or_else(|| data.iter().copied().fold(0.0, f64::max));
    if top <= 0.0 {
        return BARS[0].to_string().repeat(data.len());
    }

    data.iter()
        .map(|v| {
            let level = (v.clamp(0.0, top) / top * (BARS.len() - 1) as f64).round() as usize;
            BARS[level]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaas_chart::Palette;
    use vaas_history::TelemetryHistory;

    #[test]
    fn sparkline_scales_to_ceiling() {
        assert_eq!(sparkline(&[0.0, 50.0, 100.0], Some(100.0)), "▁▅█");
        assert_eq!(sparkline(&[0.0, 0.0], None), "▁▁");
        assert_eq!(sparkline(&[10.0, 20.0], None), "▅█");
    }

    #[test]
    fn legend_lines_only_with_cameras() {
        let mut history = TelemetryHistory::new(20);
        history.record("10:00:00", None, []);
        let frame = ChartFrame::build(&history, &Palette::default());
        assert_eq!(ChartWidget::new(false).view(&frame).len(), 3);

        history.record("10:00:03", None, [("cam1", 120.0)]);
        let frame = ChartFrame::build(&history, &Palette::default());
        let lines = ChartWidget::new(false).view(&frame);
        assert_eq!(lines[0], "GPU history (10:00:00 → 10:00:03)");
        assert_eq!(lines.len(), 5);
        assert!(lines[4].starts_with("cam1"));
        assert!(lines[4].ends_with("▁█ 120"));
    }

    #[test]
    fn ansi_wraps_in_dataset_colour() {
        let mut history = TelemetryHistory::new(20);
        history.record("t0", None, []);
        let frame = ChartFrame::build(&history, &Palette::default());
        let lines = ChartWidget::new(true).view(&frame);
        assert!(lines[1].starts_with("\x1b[38;2;59;130;246m"));
        assert!(lines[1].ends_with("\x1b[0m"));
    }
}
