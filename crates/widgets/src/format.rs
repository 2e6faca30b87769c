/// Host uptime as `Xd Yh` when at least a day, otherwise `Xh Ym`.
pub fn format_uptime(seconds: u64) -> String {
    let days    = seconds / 86_400;
    let hours   = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Fixed-width text progress bar for a percentage.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
