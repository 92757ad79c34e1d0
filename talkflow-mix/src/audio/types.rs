//! Core audio data types
//!
//! Defines the buffer and blob structures used throughout the assembly
//! pipeline.
//!
//! **Format:**
//! - Samples are f32 (floating point -1.0 to 1.0)
//! - Planar channel layout: one sample array per channel
//! - Sample rate is stamped by the producer and never resampled

/// MIME type of the encoded master audio
pub const MIME_AUDIO_MPEG: &str = "audio/mpeg";

/// AudioBuffer holds decoded (or generated) audio data ready for assembly.
///
/// Every channel array has exactly `frame_count()` elements; the constructors
/// enforce this. Buffers are immutable once returned - callers that need a
/// new shape build a new buffer rather than mutating in place.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Per-channel sample arrays, all the same length
    channels: Vec<Vec<f32>>,

    /// Sample rate in Hz, as declared by the producer
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a silent buffer of the given shape
    ///
    /// # Panics
    /// Panics if `channel_count` is zero.
    pub fn silent(channel_count: usize, frame_count: usize, sample_rate: u32) -> Self {
        assert!(channel_count >= 1, "buffer must have at least one channel");

        Self {
            channels: vec![vec![0.0; frame_count]; channel_count],
            sample_rate,
        }
    }

    /// Create a buffer from per-channel sample arrays
    ///
    /// # Panics
    /// Panics if `channels` is empty or the channel arrays differ in length.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        assert!(!channels.is_empty(), "buffer must have at least one channel");
        let frame_count = channels[0].len();
        assert!(
            channels.iter().all(|c| c.len() == frame_count),
            "all channels must have the same frame count"
        );

        Self { channels, sample_rate }
    }

    /// Number of channels (>= 1)
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Sample data for one channel
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Mutable sample data for one channel (assembler use only)
    pub(crate) fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    /// Get duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

/// EncodedAudioBlob is the terminal artifact of the pipeline: a compressed
/// byte sequence plus its MIME type.
#[derive(Debug, Clone)]
pub struct EncodedAudioBlob {
    /// Encoded bytes
    pub bytes: Vec<u8>,

    /// MIME type of the container
    pub mime_type: &'static str,
}

impl EncodedAudioBlob {
    /// Byte length of the encoded data
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when no bytes were produced
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the blob to a file
    pub fn write_to<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}
