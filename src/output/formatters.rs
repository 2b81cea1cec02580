use crate::extractors::TranscriptEntry;

/// Format a start offset as `[HH:MM:SS]`, dropping fractions of a second
pub fn format_timestamp(start: f64) -> String {
    let total_seconds = if start.is_finite() && start > 0.0 { start as u64 } else { 0 };
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("[{:02}:{:02}:{:02}]", hours, minutes, seconds)
}

/// Format entries as one `[HH:MM:SS] text` line each
pub fn format_as_text(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{} {}\n", format_timestamp(entry.start), entry.text))
        .collect()
}

/// Join all entry texts with single spaces
pub fn format_as_plain_text(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
