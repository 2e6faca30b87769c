use crate::format::progress_bar;
use vaas_core::SystemInfo;

/// CPU, memory and disk summary of the host running the pipeline.
#[derive(Debug, Default)]
pub struct SystemStatsWidget;

impl SystemStatsWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, system: &SystemInfo) -> Vec<String> {
        vec![
            format!(
                "CPU  {:>3.0}%  ({} cores / {} threads)",
                system.cpu.percent, system.cpu.cores, system.cpu.threads
            ),
            format!(
                "MEM  {:.2} / {:.2} GB {}",
                system.memory.used_gb,
                system.memory.total_gb,
                progress_bar(system.memory.percent, 20)
            ),
            format!(
                "DISK {:.2} / {:.2} GB {}",
                system.disk.used_gb,
                system.disk.total_gb,
                progress_bar(system.disk.percent, 20)
            ),
            format!("ffmpeg processes: {}", system.ffmpeg_count),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaas_core::state::{CpuInfo, MemoryInfo};

    #[test]
    fn renders_rounded_cpu_and_memory() {
        let system = SystemInfo {
            cpu: CpuInfo { cores: 8, threads: 16, percent: 23.6 },
            memory: MemoryInfo { total_gb: 31.2, used_gb: 15.6, available_gb: 15.6, percent: 50.0 },
            ..SystemInfo::default()
        };
        let lines = SystemStatsWidget::new().view(&system);
        assert_eq!(lines[0], "CPU   24%  (8 cores / 16 threads)");
        assert_eq!(lines[1], "MEM  15.60 / 31.20 GB [##########----------]");
    }
}
