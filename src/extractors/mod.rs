use async_trait::async_trait;

pub mod youtube;

use crate::{Result, TranscriptorError};

/// One caption track offered for a video
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTrack {
    /// Video the track belongs to
    pub video_id: String,

    /// Language code as reported by the platform (en, de, pt-BR, ...)
    pub language_code: String,

    /// Human readable language name
    pub language: String,

    /// Whether the track was produced by speech recognition
    pub is_generated: bool,
}

impl TranscriptTrack {
    pub fn kind(&self) -> &'static str {
        if self.is_generated {
            "auto-generated"
        } else {
            "manually created"
        }
    }
}

/// One caption unit
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

/// The caption tracks available for a single video.
///
/// Manually created and generated tracks are kept apart, each in the order the
/// platform listed them. Iteration yields manual tracks first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackList {
    pub video_id: String,
    manual: Vec<TranscriptTrack>,
    generated: Vec<TranscriptTrack>,
}

impl TrackList {
    pub fn new(video_id: impl Into<String>, tracks: Vec<TranscriptTrack>) -> Self {
        let (generated, manual): (Vec<_>, Vec<_>) =
            tracks.into_iter().partition(|t| t.is_generated);
        Self {
            video_id: video_id.into(),
            manual,
            generated,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.manual.is_empty() && self.generated.is_empty()
    }

    pub fn len(&self) -> usize {
        self.manual.len() + self.generated.len()
    }

    /// All tracks in natural order
    pub fn iter(&self) -> impl Iterator<Item = &TranscriptTrack> {
        self.manual.iter().chain(self.generated.iter())
    }

    /// Find a track for the first language in `languages` that has one,
    /// preferring a manually created track over a generated one for that language.
    pub fn find_transcript(&self, languages: &[&str]) -> Result<&TranscriptTrack> {
        self.find_in(languages, &[self.manual.as_slice(), self.generated.as_slice()])
    }

    pub fn find_manually_created_transcript(&self, languages: &[&str]) -> Result<&TranscriptTrack> {
        self.find_in(languages, &[self.manual.as_slice()])
    }

    pub fn find_generated_transcript(&self, languages: &[&str]) -> Result<&TranscriptTrack> {
        self.find_in(languages, &[self.generated.as_slice()])
    }

    fn find_in<'a>(
        &'a self,
        languages: &[&str],
        groups: &[&'a [TranscriptTrack]],
    ) -> Result<&'a TranscriptTrack> {
        for lang in languages {
            for group in groups.iter().copied() {
                if let Some(track) = group.iter().find(|t| t.language_code == *lang) {
                    return Ok(track);
                }
            }
        }

        tracing::debug!(
            "No track for {:?} among {:?}",
            languages,
            self.iter().map(|t| t.language_code.as_str()).collect::<Vec<_>>()
        );
        Err(TranscriptorError::NoTranscriptAvailable(self.video_id.clone()).into())
    }
}

/// A service that can list and fetch caption tracks for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List the caption tracks available for a video
    async fn list_transcripts(&self, video_id: &str) -> Result<TrackList>;

    /// Fetch the ordered entries of one track
    async fn fetch_entries(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptEntry>>;

    /// Get the name of this platform
    fn platform_name(&self) -> &'static str;
}

/// Extract the video id from a watch URL (`...watch?v=<id>&...`) or a short link
/// (`youtu.be/<id>?...`). The id itself is not validated.
pub fn extract_video_id(url: &str) -> Result<String> {
    let id = if let Some((_, rest)) = url.split_once("v=") {
        rest.split('&').next().unwrap_or(rest)
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest.split('?').next().unwrap_or(rest)
    } else {
        return Err(TranscriptorError::UnsupportedUrl(url.to_string()).into());
    };

    Ok(id.to_string())
}
