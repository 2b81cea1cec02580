//! YouTube Transcript Fetcher - A Rust CLI tool for downloading video transcripts
//!
//! This library resolves a YouTube URL to a video id, lists the caption tracks the
//! platform offers, picks one through a language fallback cascade and renders it as
//! `[HH:MM:SS] text` lines.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod transcribe;

pub use cli::Cli;
pub use config::Config;
pub use extractors::{
    extract_video_id, TrackList, TranscriptEntry, TranscriptSource, TranscriptTrack,
};
pub use transcribe::{FetchedTranscript, TranscriptFetcher};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the transcript fetcher
#[derive(thiserror::Error, Debug)]
pub enum TranscriptorError {
    #[error("Could not extract video ID from URL: {0}")]
    UnsupportedUrl(String),

    #[error("Could not list transcripts: {0}")]
    BackendUnavailable(String),

    #[error("No transcripts found for video {0}")]
    NoTranscriptAvailable(String),

    #[error("Could not fetch transcript data: {0}")]
    FetchFailed(String),

    #[error("File operation failed: {0}")]
    FileError(String),
}
