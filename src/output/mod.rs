use std::path::{Path, PathBuf};

use crate::extractors::extract_video_id;
use crate::{Result, TranscriptorError};

pub mod formatters;

pub use formatters::*;

/// File name used when the URL yields no video id
pub const FALLBACK_FILENAME: &str = "youtube_transcript.txt";

fn banner() -> String {
    "=".repeat(50)
}

/// Name of the transcript file for a video URL
pub fn transcript_filename(url: &str) -> String {
    match extract_video_id(url) {
        Ok(video_id) => format!("youtube_transcript_{}.txt", video_id),
        Err(_) => FALLBACK_FILENAME.to_string(),
    }
}

/// Full contents of the transcript file
pub fn render_file(url: &str, transcript: &str) -> String {
    format!("YouTube URL: {}\n\nTranscript:\n{}\n{}", url, banner(), transcript)
}

/// Where the transcript for `url` is written inside `dir`
pub fn transcript_path(url: &str, dir: &Path) -> PathBuf {
    dir.join(transcript_filename(url))
}

/// Save a formatted transcript into `dir`, replacing any earlier file for the same video
pub fn save_transcript(url: &str, transcript: &str, dir: &Path) -> Result<PathBuf> {
    let path = transcript_path(url, dir);
    tracing::debug!("Writing transcript to {}", path.display());

    fs_err::write(&path, render_file(url, transcript))
        .map_err(|e| TranscriptorError::FileError(e.to_string()))?;

    Ok(path)
}

/// Print a formatted transcript to the console
pub fn print_to_console(transcript: &str) {
    println!("\n{}", banner());
    println!("Transcript:");
    println!("{}", banner());
    println!("{}", transcript);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_filename() {
        assert_eq!(
            transcript_filename("https://www.youtube.com/watch?v=ABC123&t=10"),
            "youtube_transcript_ABC123.txt"
        );
        assert_eq!(
            transcript_filename("https://youtu.be/XYZ789?t=5"),
            "youtube_transcript_XYZ789.txt"
        );
        assert_eq!(transcript_filename("https://example.com/clip"), FALLBACK_FILENAME);
    }

    #[test]
    fn test_default_directory_gives_bare_file_name() {
        let dir = crate::Config::default().output_dir();
        let path = transcript_path("https://youtu.be/XYZ789", &dir);

        assert_eq!(path, PathBuf::from("youtube_transcript_XYZ789.txt"));
        assert_eq!(path.display().to_string(), "youtube_transcript_XYZ789.txt");
    }

    #[test]
    fn test_save_transcript_writes_header_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://youtu.be/XYZ789";
        let path = save_transcript(url, "[00:00:01] hello\n", dir.path()).unwrap();

        assert_eq!(path, dir.path().join("youtube_transcript_XYZ789.txt"));
        let expected = format!(
            "YouTube URL: {}\n\nTranscript:\n{}\n[00:00:01] hello\n",
            url,
            "=".repeat(50)
        );
        assert_eq!(fs_err::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_save_transcript_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://www.youtube.com/watch?v=SAME";

        save_transcript(url, "[00:00:00] first\n", dir.path()).unwrap();
        let path = save_transcript(url, "[00:00:00] second\n", dir.path()).unwrap();

        let content = fs_err::read_to_string(path).unwrap();
        assert!(content.ends_with("[00:00:00] second\n"));
        assert!(!content.contains("first"));
    }

    #[test]
    fn test_save_transcript_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(save_transcript("https://youtu.be/X", "", &missing).is_err());
    }
}
