/// Format a position or duration in seconds as `HH:MM:SS`
///
/// Negative or non-finite values (e.g. an unknown duration of -1) render
/// as `00:00:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
