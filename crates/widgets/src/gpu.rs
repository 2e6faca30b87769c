use crate::format::progress_bar;
use vaas_core::{GpuInfo, GpuStatus, HardwareReport};

/// Above this temperature a card is flagged hot.
pub const HOT_CELSIUS: f64 = 80.0;

/// One card per GPU: utilisation, temperature, memory and power.
#[derive(Debug, Default)]
pub struct GpuCardsWidget;

impl GpuCardsWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, report: &HardwareReport) -> Vec<String> {
        match report.gpu_status() {
            GpuStatus::Ready(gpus) => gpus.iter().flat_map(card).collect(),
            GpuStatus::NoDevices => vec!["GPU: no devices reported".to_string()],
            GpuStatus::Unavailable => vec!["GPU: NVIDIA GPU unavailable".to_string()],
        }
    }
}

fn card(gpu: &GpuInfo) -> Vec<String> {
    let hot = if gpu.temperature > HOT_CELSIUS { " HOT" } else { "" };
    let mem = gpu.memory_percent();
    let pwr = gpu.power_percent();

    vec![
        format!("{} (#{})", gpu.name, gpu.index),
        format!(
            "  util {:>3.0}%   temp {:.0}°C{hot}",
            gpu.utilization_gpu, gpu.temperature
        ),
        format!(
            "  mem  {:.0} / {:.0} MB {} {mem:.1}%",
            gpu.memory_used_mb,
            gpu.memory_total_mb,
            progress_bar(mem, 20)
        ),
        format!(
            "  pwr  {:.0} / {:.0} W {} {pwr:.1}%",
            gpu.power_draw_w,
            gpu.power_limit_w,
            progress_bar(pwr, 20)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaas_core::state::GpuReport;

    fn report(gpu: GpuInfo) -> HardwareReport {
        HardwareReport {
            gpu: Some(GpuReport { available: true, gpus: vec![gpu] }),
            ..HardwareReport::default()
        }
    }

    #[test]
    fn hot_card_is_flagged() {
        let lines = GpuCardsWidget::new().view(&report(GpuInfo {
            name: "RTX A4000".into(),
            temperature: 86.0,
            utilization_gpu: 97.0,
            ..GpuInfo::default()
        }));
        assert_eq!(lines[0], "RTX A4000 (#0)");
        assert!(lines[1].contains("97%"));
        assert!(lines[1].ends_with("86°C HOT"));
    }

    #[test]
    fn zero_totals_render_zero_percent() {
        let lines = GpuCardsWidget::new().view(&report(GpuInfo {
            memory_used_mb: 900.0,
            power_draw_w: 40.0,
            ..GpuInfo::default()
        }));
        assert!(lines[2].ends_with(" 0.0%"));
        assert!(lines[3].ends_with(" 0.0%"));
    }

    #[test]
    fn missing_gpu_block() {
        let lines = GpuCardsWidget::new().view(&HardwareReport::default());
        assert_eq!(lines, vec!["GPU: NVIDIA GPU unavailable"]);
    }
}
