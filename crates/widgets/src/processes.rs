use vaas_core::GpuProcess;

/// Processes holding GPU memory, as listed by `nvidia-smi --query-compute-apps`.
#[derive(Debug, Default)]
pub struct GpuProcessesWidget;

impl GpuProcessesWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, processes: &[GpuProcess]) -> Vec<String> {
        let mut lines = vec![format!("GPU processes: {}", processes.len())];

        if processes.is_empty() {
            lines.push("  no process is using the GPU".to_string());
            return lines;
        }

        for proc in processes {
            lines.push(format!(
                "  PID {} • {}  {:.0} MB",
                proc.pid, proc.name, proc.gpu_memory_mb
            ));
            if !proc.cmdline.is_empty() {
                lines.push(format!("    {}", proc.cmdline));
            }
        }
        lines
    }
}
