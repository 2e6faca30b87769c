use crate::format::format_uptime;
use vaas_core::SystemStatus;

/// Docker containers of the stack with a state badge, plus host uptime.
#[derive(Debug, Default)]
pub struct ContainersWidget;

impl ContainersWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, status: &SystemStatus) -> Vec<String> {
        let mut lines = vec![format!("Uptime {}", format_uptime(status.uptime_seconds))];

        if status.containers.is_empty() {
            lines.push("  no containers found".to_string());
            return lines;
        }

        for c in &status.containers {
            let badge = if c.is_running() {
                "RUNNING".to_string()
            } else {
                c.state.to_uppercase()
            };
            lines.push(format!(
                "  [{badge}] {}  {}",
                c.display_name(),
                c.image.as_deref().unwrap_or("N/A")
            ));
        }
        lines
    }
}
