/// Formats a position in seconds as `m:ss` for the overlay clock.
/// Unknown or non-positive values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    let minutes = total / 60;
    let remaining = total % 60;
    format!("{}:{:02}", minutes, remaining)
}

/// Human readable resolution, empty when either dimension is unknown.
pub fn format_video_size(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return String::new();
    }
    format!("{}x{}", width, height)
}
