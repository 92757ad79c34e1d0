//! Pipeline orchestration
//!
//! Resolves the user-ordered sequence into concrete buffers, assembles the
//! timeline, and encodes the master MP3.
//!
//! Per-item resolution is independent, so it fans out concurrently; results
//! are gathered back into original list order before assembly. Order is a
//! correctness-critical input, not an optimization detail. Assembly and
//! encoding are strictly sequential.

use crate::audio::types::{AudioBuffer, EncodedAudioBlob};
use crate::audio::{mp3, pcm, silence, timeline};
use crate::config::AudioConfig;
use crate::session::{PayloadSource, SequenceItem};
use crate::{Error, Result};
use futures::future::join_all;
use tracing::{debug, warn};

/// Mixdown pipeline orchestrator
///
/// One invocation runs to completion, success, or failure; there is no
/// mid-pipeline cancellation.
pub struct MixdownPipeline {
    config: AudioConfig,
}

impl MixdownPipeline {
    /// Create a pipeline with the given audio configuration
    pub fn new(config: AudioConfig) -> Self {
        Self { config }
    }

    /// Audio configuration shared across this pipeline's components
    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Resolve the sequence and assemble the pre-encode timeline.
    ///
    /// Track items with no resolvable payload are skipped (they do not appear
    /// in the timeline); this is the deliberate skip policy for tracks the
    /// user never synthesized. A payload that is present but malformed is a
    /// real [`Error::Decode`] and aborts the invocation. Fails with
    /// [`Error::EmptyTimeline`] when nothing resolved.
    pub async fn assemble(
        &self,
        sequence: &[SequenceItem],
        source: &dyn PayloadSource,
    ) -> Result<AudioBuffer> {
        let sample_rate = self.config.sample_rate;

        // Fan out per-item resolution; join_all preserves input order.
        let resolutions = sequence.iter().map(|item| async move {
            match item {
                SequenceItem::Track { track_id } => match source.payload(*track_id) {
                    Some(raw) => {
                        let buffer = pcm::decode_pcm16(&raw, sample_rate, 1)?;
                        debug!(track_id = %track_id, frames = buffer.frame_count(), "Resolved track");
                        Ok(Some(buffer))
                    }
                    None => {
                        warn!(track_id = %track_id, "Skipping track with no synthesized audio");
                        Ok(None)
                    }
                },
                SequenceItem::Silence { duration } => {
                    Ok(Some(silence::silence(*duration, sample_rate)))
                }
            }
        });

        let buffers: Vec<AudioBuffer> = join_all(resolutions)
            .await
            .into_iter()
            .collect::<Result<Vec<Option<AudioBuffer>>>>()?
            .into_iter()
            .flatten()
            .collect();

        if buffers.is_empty() {
            return Err(Error::EmptyTimeline);
        }

        Ok(timeline::concatenate(&buffers, &self.config))
    }

    /// Run the full pipeline: resolve, assemble, encode.
    ///
    /// Returns the downloadable `audio/mpeg` blob. Any assembler or encoder
    /// failure aborts the invocation; no partial file is surfaced.
    pub async fn render(
        &self,
        sequence: &[SequenceItem],
        source: &dyn PayloadSource,
    ) -> Result<EncodedAudioBlob> {
        let master = self.assemble(sequence, source).await?;
        let blob = mp3::encode(&master, self.config.bitrate_kbps)?;
        debug!(bytes = blob.len(), "Encoded master audio");
        Ok(blob)
    }
}
