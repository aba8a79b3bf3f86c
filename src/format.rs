/// Renders a duration in seconds as `HH:MM:SS`. Hours are not capped, so
/// 100 hours render as `100:00:00`.
pub fn elapsed_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let seconds = seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
