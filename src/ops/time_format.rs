/// Formats a playback position as `MM:SS:CC`.
///
/// The last field is hundredths of a second, not milliseconds. Fields are
/// truncated, never rounded, so the label never runs ahead of the clock.
pub fn format_time(time: f64) -> String {
    let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
    let minutes = (time / 60.0) as u64;
    let seconds = (time % 60.0) as u64;
    let centis = ((time % 1.0) * 100.0) as u64;
    format!("{:02}:{:02}:{:02}", minutes, seconds, centis)
}
