use std::fmt;

use crate::extractors::{TrackList, TranscriptTrack};
use crate::{Result, TranscriptorError};

/// Transcript languages tried in order when none are configured
pub const DEFAULT_LANGUAGES: [&str; 12] = [
    "en", "zh", "ja", "ko", "es", "fr", "de", "it", "pt", "ru", "ar", "hi",
];

/// One step of the selection cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// A track in exactly this language, manual or generated
    PreferredLanguage(String),
    /// Any manually created track in one of the preferred languages
    AnyManual,
    /// Any generated track in one of the preferred languages
    AnyGenerated,
    /// Whatever track the platform lists first
    FirstAvailable,
}

impl Strategy {
    fn lookup<'t>(
        &self,
        tracks: &'t TrackList,
        languages: &[&str],
    ) -> Result<&'t TranscriptTrack> {
        match self {
            Strategy::PreferredLanguage(lang) => tracks.find_transcript(&[lang.as_str()]),
            Strategy::AnyManual => tracks.find_manually_created_transcript(languages),
            Strategy::AnyGenerated => tracks.find_generated_transcript(languages),
            Strategy::FirstAvailable => tracks.iter().next().ok_or_else(|| {
                TranscriptorError::NoTranscriptAvailable(tracks.video_id.clone()).into()
            }),
        }
    }

    /// Console line announcing the chosen track
    pub fn announcement(&self, track: &TranscriptTrack) -> String {
        match self {
            Strategy::PreferredLanguage(lang) => format!("Using {} transcript...", lang),
            Strategy::AnyManual => {
                format!("Using manually created transcript ({})...", track.language_code)
            }
            Strategy::AnyGenerated => {
                format!("Using auto-generated transcript ({})...", track.language_code)
            }
            Strategy::FirstAvailable => {
                format!("Using default transcript ({})...", track.language_code)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::PreferredLanguage(lang) => write!(f, "preferred language {}", lang),
            Strategy::AnyManual => write!(f, "any manual track"),
            Strategy::AnyGenerated => write!(f, "any generated track"),
            Strategy::FirstAvailable => write!(f, "first available track"),
        }
    }
}

/// A track together with the strategy that found it
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'t> {
    pub track: &'t TranscriptTrack,
    pub strategy: Strategy,
}

/// The ordered strategies tried for a language preference list
pub fn cascade(languages: &[&str]) -> Vec<Strategy> {
    languages
        .iter()
        .map(|lang| Strategy::PreferredLanguage(lang.to_string()))
        .chain([Strategy::AnyManual, Strategy::AnyGenerated, Strategy::FirstAvailable])
        .collect()
}

/// Pick a track by running the cascade until a strategy finds one.
///
/// A failing lookup counts as "not found" and the cascade moves on, so a backend
/// error here looks the same as a missing language.
pub fn select_track<'t>(tracks: &'t TrackList, languages: &[&str]) -> Option<Selection<'t>> {
    if tracks.is_empty() {
        tracing::debug!("No caption tracks listed for {}", tracks.video_id);
        return None;
    }

    cascade(languages).into_iter().find_map(|strategy| {
        match strategy.lookup(tracks, languages) {
            Ok(track) => Some(Selection { track, strategy }),
            Err(err) => {
                tracing::debug!("No match for {}: {}", strategy, err);
                None
            }
        }
    })
}
