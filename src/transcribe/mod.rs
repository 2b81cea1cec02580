use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::config::Config;
use crate::extractors::youtube::YoutubeSource;
use crate::extractors::{extract_video_id, TranscriptEntry, TranscriptSource, TranscriptTrack};
use crate::output::formatters;
use crate::{Result, TranscriptorError};

pub mod retry;
pub mod selection;

use retry::{Delay, RetryPolicy, TokioDelay};

/// Transcript of one video in the selected track
#[derive(Debug, Clone)]
pub struct FetchedTranscript {
    pub video_id: String,

    /// Track the entries were fetched from
    pub track: TranscriptTrack,

    /// Caption entries in platform order
    pub entries: Vec<TranscriptEntry>,
}

impl FetchedTranscript {
    /// All entry texts joined by spaces
    pub fn plain_text(&self) -> String {
        formatters::format_as_plain_text(&self.entries)
    }

    /// One `[HH:MM:SS] text` line per entry
    pub fn to_timestamped_text(&self) -> String {
        formatters::format_as_text(&self.entries)
    }
}

/// Fetches a video's transcript: list tracks, pick one, fetch its entries
pub struct TranscriptFetcher {
    source: Box<dyn TranscriptSource>,
    delay: Box<dyn Delay>,
    languages: Vec<String>,
    retry_policy: RetryPolicy,
    show_progress: bool,
}

impl TranscriptFetcher {
    /// Create a fetcher backed by YouTube
    pub fn new(config: &Config) -> Result<Self> {
        let source = YoutubeSource::new(&config.http)?;
        tracing::debug!("Using {} transcript backend", source.platform_name());

        Ok(Self::with_source(Box::new(source), Box::new(TokioDelay), config))
    }

    /// Create a fetcher over any transcript source
    pub fn with_source(
        source: Box<dyn TranscriptSource>,
        delay: Box<dyn Delay>,
        config: &Config,
    ) -> Self {
        Self {
            source,
            delay,
            languages: config.languages.clone(),
            retry_policy: config.retry_policy(),
            show_progress: true,
        }
    }

    /// Enable or disable the progress spinner
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Fetch the transcript for a video URL
    pub async fn fetch(&self, url: &str) -> Result<FetchedTranscript> {
        let video_id = extract_video_id(url)?;
        let source = self.source.as_ref();
        let id = video_id.as_str();

        let progress = self.spinner("Listing available transcripts...");
        let tracks = retry::retry(
            &self.retry_policy,
            self.delay.as_ref(),
            move || source.list_transcripts(id),
            |attempt, _| progress.suspend(|| println!("Attempt {} failed, retrying...", attempt)),
        )
        .await;
        progress.finish_and_clear();

        let tracks = tracks.map_err(|e| TranscriptorError::BackendUnavailable(format!("{:#}", e)))?;
        tracing::debug!("{} transcript tracks available for {}", tracks.len(), video_id);

        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        let selection = match selection::select_track(&tracks, &languages) {
            Some(selection) => selection,
            None => {
                println!("No available transcripts found.");
                return Err(TranscriptorError::NoTranscriptAvailable(video_id).into());
            }
        };
        println!("{}", selection.strategy.announcement(selection.track));

        let track = selection.track;
        let progress = self.spinner("Fetching transcript data...");
        let entries = retry::retry(
            &self.retry_policy,
            self.delay.as_ref(),
            move || source.fetch_entries(track),
            |attempt, _| {
                progress.suspend(|| {
                    println!("Attempt {} to fetch transcript data failed, retrying...", attempt)
                })
            },
        )
        .await;
        progress.finish_and_clear();

        let entries = entries.map_err(|e| TranscriptorError::FetchFailed(format!("{:#}", e)))?;
        tracing::info!(
            "Fetched {} entries of the {} {} transcript for {}",
            entries.len(),
            track.kind(),
            track.language_code,
            video_id
        );

        Ok(FetchedTranscript {
            video_id,
            track: track.clone(),
            entries,
        })
    }

    /// Fetch and format the transcript for a video URL.
    ///
    /// Every failure is reported on the console and turned into `None`.
    pub async fn get_transcript(&self, url: &str) -> Option<String> {
        match self.fetch(url).await {
            Ok(transcript) => {
                tracing::debug!("Plain text is {} characters long", transcript.plain_text().len());
                Some(transcript.to_timestamped_text())
            }
            Err(err) => {
                // Already announced by the cascade
                if !matches!(
                    err.downcast_ref::<TranscriptorError>(),
                    Some(TranscriptorError::NoTranscriptAvailable(_))
                ) {
                    println!("Error fetching transcript: {:#}", err);
                }
                None
            }
        }
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.set_message(message);
        progress.enable_steady_tick(Duration::from_millis(120));
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{MockTranscriptSource, TrackList};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingDelay {
        waits: Arc<Mutex<Vec<Duration>>>,
    }

    #[async_trait::async_trait]
    impl Delay for RecordingDelay {
        async fn wait(&self, duration: Duration) {
            self.waits.lock().unwrap().push(duration);
        }
    }

    fn track(code: &str, generated: bool) -> TranscriptTrack {
        TranscriptTrack {
            language_code: code.to_string(),
            language: code.to_string(),
            is_generated: generated,
            video_id: "vid".to_string(),
        }
    }

    fn entry(text: &str, start: f64) -> TranscriptEntry {
        TranscriptEntry {
            text: text.to_string(),
            start,
            duration: 1.0,
        }
    }

    fn fetcher(source: MockTranscriptSource, delay: RecordingDelay) -> TranscriptFetcher {
        TranscriptFetcher::with_source(Box::new(source), Box::new(delay), &Config::default())
            .show_progress(false)
    }

    #[tokio::test]
    async fn test_fetches_preferred_track() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_list_transcripts()
            .withf(|id| id == "ABC123")
            .times(1)
            .returning(|id| Ok(TrackList::new(id, vec![track("fr", true), track("de", false)])));
        source
            .expect_fetch_entries()
            .withf(|t| t.language_code == "fr")
            .times(1)
            .returning(|_| Ok(vec![entry("hi", 65.0), entry("there", 3661.0)]));

        let transcript = fetcher(source, RecordingDelay::default())
            .get_transcript("https://www.youtube.com/watch?v=ABC123&t=10")
            .await;

        assert_eq!(transcript.as_deref(), Some("[00:01:05] hi\n[01:01:01] there\n"));
    }

    #[tokio::test]
    async fn test_retries_listing_then_succeeds() {
        let mut source = MockTranscriptSource::new();
        let mut calls = 0;
        source.expect_list_transcripts().times(3).returning(move |id| {
            calls += 1;
            if calls < 3 {
                Err(anyhow::anyhow!("connection reset"))
            } else {
                Ok(TrackList::new(id, vec![track("en", false)]))
            }
        });
        source
            .expect_fetch_entries()
            .returning(|_| Ok(vec![entry("hello", 0.0)]));

        let delay = RecordingDelay::default();
        let transcript = fetcher(source, delay.clone())
            .fetch("https://youtu.be/XYZ789?t=5")
            .await
            .unwrap();

        assert_eq!(transcript.video_id, "XYZ789");
        assert_eq!(transcript.plain_text(), "hello");
        assert_eq!(*delay.waits.lock().unwrap(), [Duration::from_secs(2); 2]);
    }

    #[tokio::test]
    async fn test_listing_failure_is_backend_unavailable() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_list_transcripts()
            .times(3)
            .returning(|_| Err(anyhow::anyhow!("timed out")));
        source.expect_fetch_entries().never();

        let delay = RecordingDelay::default();
        let err = fetcher(source, delay.clone())
            .fetch("https://youtu.be/XYZ789")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TranscriptorError>(),
            Some(TranscriptorError::BackendUnavailable(msg)) if msg == "timed out"
        ));
        assert_eq!(delay.waits.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_entry_failure_is_fetch_failed() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_list_transcripts()
            .returning(|id| Ok(TrackList::new(id, vec![track("ja", true)])));
        source
            .expect_fetch_entries()
            .times(6)
            .returning(|_| Err(anyhow::anyhow!("HTTP 500")));

        let fetcher = fetcher(source, RecordingDelay::default());
        let err = fetcher.fetch("https://www.youtube.com/watch?v=JA1").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TranscriptorError>(),
            Some(TranscriptorError::FetchFailed(_))
        ));
        assert!(fetcher.get_transcript("https://www.youtube.com/watch?v=JA1").await.is_none());
    }

    #[tokio::test]
    async fn test_no_tracks_yields_nothing() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_list_transcripts()
            .returning(|id| Ok(TrackList::new(id, Vec::new())));
        source.expect_fetch_entries().never();

        let fetcher = fetcher(source, RecordingDelay::default());
        let err = fetcher.fetch("https://youtu.be/EMPTY").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TranscriptorError>(),
            Some(TranscriptorError::NoTranscriptAvailable(id)) if id == "EMPTY"
        ));
    }

    #[tokio::test]
    async fn test_malformed_url_never_reaches_backend() {
        let mut source = MockTranscriptSource::new();
        source.expect_list_transcripts().never();

        let fetcher = fetcher(source, RecordingDelay::default());
        assert!(fetcher.get_transcript("https://example.com/watch/123").await.is_none());
    }
}
