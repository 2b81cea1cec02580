use anyhow::Context;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use yt_transcript_rs::YouTubeTranscriptApi;

use super::{TrackList, TranscriptEntry, TranscriptSource, TranscriptTrack};
use crate::config::HttpConfig;
use crate::Result;

/// YouTube caption backend on top of `yt-transcript-rs`
pub struct YoutubeSource {
    api: YouTubeTranscriptApi,
    timeout: Duration,
}

impl YoutubeSource {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .context("Failed to create YouTube transcript client")?;

        Ok(Self {
            api,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Bound a backend call by the configured timeout
    async fn bounded<T>(&self, what: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| anyhow::anyhow!("{} timed out after {}s", what, self.timeout.as_secs()))?
    }
}

#[async_trait]
impl TranscriptSource for YoutubeSource {
    async fn list_transcripts(&self, video_id: &str) -> Result<TrackList> {
        tracing::debug!("Listing caption tracks for: {}", video_id);

        let listed = self
            .bounded("Listing transcripts", async {
                self.api
                    .list_transcripts(video_id)
                    .await
                    .context("Failed to list transcripts")
            })
            .await?;

        let tracks = listed
            .transcripts()
            .into_iter()
            .map(|t| TranscriptTrack {
                video_id: video_id.to_string(),
                language_code: t.language_code().to_string(),
                language: t.language().to_string(),
                is_generated: t.is_generated(),
            })
            .collect();

        Ok(TrackList::new(video_id, tracks))
    }

    async fn fetch_entries(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptEntry>> {
        tracing::debug!("Fetching {} caption data for: {}", track.language_code, track.video_id);

        // The cascade only settles on a generated track when no manual one shares
        // its language, so a lookup by language code returns this same track.
        let fetched = self
            .bounded("Fetching transcript", async {
                self.api
                    .fetch_transcript(&track.video_id, &[track.language_code.as_str()], false)
                    .await
                    .context("Failed to fetch transcript")
            })
            .await?;

        Ok(fetched
            .parts()
            .into_iter()
            .map(|part| TranscriptEntry {
                text: part.text.clone(),
                start: part.start,
                duration: part.duration,
            })
            .collect())
    }

    fn platform_name(&self) -> &'static str {
        "YouTube"
    }
}
