//! MP3 encoding via LAME
//!
//! Wraps the stateful LAME session behind [`Mp3Writer`]: samples are fed in
//! fixed-size blocks, the encoder accumulates frames and bit reservoir state
//! across calls, and a terminal flush extracts the remaining output. The
//! session is strictly sequential; chunk order matters.

use crate::audio::types::{AudioBuffer, EncodedAudioBlob, MIME_AUDIO_MPEG};
use crate::{Error, Result};
use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, MonoPcm, Quality};
use std::mem::MaybeUninit;
use tracing::debug;

/// Encoder block granularity in samples (one MPEG audio frame)
const SAMPLE_BLOCK_SIZE: usize = 1152;

/// Encode a mono buffer into an `audio/mpeg` blob at the configured bitrate.
///
/// Only channel 0 is read; the pipeline operates on mono sources throughout.
pub fn encode(buffer: &AudioBuffer, bitrate_kbps: u32) -> Result<EncodedAudioBlob> {
    let mut writer = Mp3Writer::new(buffer.sample_rate(), bitrate_kbps)?;
    writer.write(buffer)?;
    writer.finish()
}

/// Stateful MP3 encoding session
///
/// Holds the LAME encoder and the accumulated output bytes. On any error the
/// writer is dropped and partial output is discarded, never returned.
pub struct Mp3Writer {
    encoder: mp3lame_encoder::Encoder,
    output: Vec<u8>,
}

impl Mp3Writer {
    /// Create a mono encoding session
    pub fn new(sample_rate: u32, bitrate_kbps: u32) -> Result<Self> {
        let mut builder = Builder::new()
            .ok_or_else(|| Error::Encode("failed to create LAME encoder".to_string()))?;

        builder
            .set_num_channels(1)
            .map_err(|e| Error::Encode(format!("invalid channel count: {:?}", e)))?;
        builder
            .set_sample_rate(sample_rate)
            .map_err(|e| Error::Encode(format!("invalid sample rate: {:?}", e)))?;
        builder
            .set_brate(nearest_bitrate(bitrate_kbps))
            .map_err(|e| Error::Encode(format!("invalid bitrate: {:?}", e)))?;
        builder
            .set_quality(Quality::Best)
            .map_err(|e| Error::Encode(format!("invalid quality: {:?}", e)))?;

        let encoder = builder
            .build()
            .map_err(|e| Error::Encode(format!("failed to build encoder: {:?}", e)))?;

        Ok(Self {
            encoder,
            output: Vec::new(),
        })
    }

    /// Feed a buffer's channel 0 through the encoder in 1152-sample blocks.
    ///
    /// The final partial block is encoded as-is; LAME handles short blocks.
    pub fn write(&mut self, buffer: &AudioBuffer) -> Result<()> {
        let pcm = quantize(buffer.channel(0));

        for block in pcm.chunks(SAMPLE_BLOCK_SIZE) {
            let mut out = vec![MaybeUninit::uninit(); worst_case_output_size(block.len())];
            let written = self
                .encoder
                .encode(MonoPcm(block), &mut out)
                .map_err(|e| Error::Encode(format!("MP3 encoding failed: {:?}", e)))?;
            self.append(&out[..written]);
        }

        Ok(())
    }

    /// Flush trailing encoder output and return the finished blob
    pub fn finish(mut self) -> Result<EncodedAudioBlob> {
        let mut out = vec![MaybeUninit::uninit(); worst_case_output_size(SAMPLE_BLOCK_SIZE)];
        let written = self
            .encoder
            .flush::<FlushNoGap>(&mut out)
            .map_err(|e| Error::Encode(format!("MP3 flush failed: {:?}", e)))?;
        self.append(&out[..written]);

        debug!(bytes = self.output.len(), "Finished MP3 encoding session");

        Ok(EncodedAudioBlob {
            bytes: self.output,
            mime_type: MIME_AUDIO_MPEG,
        })
    }

    fn append(&mut self, block: &[MaybeUninit<u8>]) {
        // The encoder initialized this prefix up to the returned length
        self.output
            .extend(block.iter().map(|b| unsafe { b.assume_init() }));
    }
}

/// Convert floating-point samples to 16-bit signed integers.
///
/// Each sample is clamped to [-1.0, 1.0] and scaled asymmetrically: negatives
/// by 32768, non-negatives by 32767. The asymmetry avoids integer overflow at
/// exactly 1.0 and is required for bit-compatibility with existing output.
fn quantize(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            let s = s.clamp(-1.0, 1.0);
            if s < 0.0 {
                (s * 32768.0) as i16
            } else {
                (s * 32767.0) as i16
            }
        })
        .collect()
}

/// Worst-case MP3 output size for a sample block (1.25 * n + 7200)
fn worst_case_output_size(sample_count: usize) -> usize {
    (sample_count as f64 * 1.25) as usize + 7200
}

/// Map a kbps value onto the nearest supported CBR bitrate
fn nearest_bitrate(kbps: u32) -> Bitrate {
    match kbps {
        0..=96 => Bitrate::Kbps96,
        97..=112 => Bitrate::Kbps112,
        113..=128 => Bitrate::Kbps128,
        129..=160 => Bitrate::Kbps160,
        161..=192 => Bitrate::Kbps192,
        193..=224 => Bitrate::Kbps224,
        225..=256 => Bitrate::Kbps256,
        _ => Bitrate::Kbps320,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_extremes() {
        let pcm = quantize(&[-1.0, 0.0, 1.0]);
        assert_eq!(pcm, vec![-32768, 0, 32767]);
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        let pcm = quantize(&[-2.0, 1.5]);
        assert_eq!(pcm, vec![-32768, 32767]);
    }

    #[test]
    fn test_quantize_asymmetric_scaling() {
        let pcm = quantize(&[-0.5, 0.5]);
        assert_eq!(pcm[0], -16384); // -0.5 * 32768
        assert_eq!(pcm[1], 16383); // 0.5 * 32767, truncated
    }

    #[test]
    fn test_encode_tone_produces_nonempty_mpeg_blob() {
        let samples: Vec<f32> = (0..24000)
            .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 24000.0).sin() * 0.5)
            .collect();
        let buffer = AudioBuffer::from_channels(vec![samples], 24000);

        let blob = encode(&buffer, 128).unwrap();
        assert!(!blob.is_empty());
        assert_eq!(blob.mime_type, "audio/mpeg");
    }

    #[test]
    fn test_encode_short_final_block() {
        // 1500 samples: one full block plus a 348-sample tail
        let buffer = AudioBuffer::silent(1, 1500, 24000);
        let blob = encode(&buffer, 128).unwrap();
        assert!(!blob.is_empty());
    }
}
