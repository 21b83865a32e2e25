/// Format a runtime as `"<hours>h <minutes>m"`
pub fn convert_minutes_to_time(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
