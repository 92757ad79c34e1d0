//! Raw PCM payload decoding
//!
//! The synthesis API returns base64-encoded raw 16-bit signed little-endian
//! PCM samples, not a container format, so the payload is decoded directly
//! into an [`AudioBuffer`] rather than going through a demuxer.

use crate::audio::types::AudioBuffer;
use crate::{Error, Result};
use base64::{engine::general_purpose, Engine as _};

/// Decode a standard-alphabet base64 string into raw bytes
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    general_purpose::STANDARD
        .decode(data)
        .map_err(|e| Error::Decode(format!("invalid base64 payload: {}", e)))
}

/// Decode raw 16-bit LE PCM bytes into a normalized floating-point buffer.
///
/// Samples are interleaved across channels in the payload and de-interleaved
/// into one array per channel. Each 16-bit sample `s` maps to `s / 32768.0`.
/// The declared sample rate is trusted and stamped onto the buffer as-is; no
/// resampling is performed.
///
/// Fails with [`Error::Decode`] when the byte length is odd or the sample
/// count is not a multiple of `channel_count`.
pub fn decode_pcm16(data: &[u8], sample_rate: u32, channel_count: usize) -> Result<AudioBuffer> {
    if channel_count == 0 {
        return Err(Error::Decode("channel count must be at least 1".to_string()));
    }
    if data.len() % 2 != 0 {
        return Err(Error::Decode(format!(
            "payload length {} is not a whole number of 16-bit samples",
            data.len()
        )));
    }

    let total_samples = data.len() / 2;
    if total_samples % channel_count != 0 {
        return Err(Error::Decode(format!(
            "sample count {} is not divisible by channel count {}",
            total_samples, channel_count
        )));
    }

    let frame_count = total_samples / channel_count;
    let mut channels = vec![vec![0.0f32; frame_count]; channel_count];

    for frame in 0..frame_count {
        for ch in 0..channel_count {
            let byte_index = (frame * channel_count + ch) * 2;
            let sample = i16::from_le_bytes([data[byte_index], data[byte_index + 1]]);
            channels[ch][frame] = sample as f32 / 32768.0;
        }
    }

    Ok(AudioBuffer::from_channels(channels, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pack i16 samples into an LE byte payload
    fn pcm_bytes(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_mono() {
        let data = pcm_bytes(&[0, 16384, -16384, 32767, -32768]);
        let buffer = decode_pcm16(&data, 24000, 1).unwrap();

        assert_eq!(buffer.channel_count(), 1);
        assert_eq!(buffer.frame_count(), 5);
        assert_eq!(buffer.sample_rate(), 24000);

        let samples = buffer.channel(0);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], 0.5);
        assert_eq!(samples[2], -0.5);
        assert!((samples[3] - 32767.0 / 32768.0).abs() < f32::EPSILON);
        assert_eq!(samples[4], -1.0);
    }

    #[test]
    fn test_decode_deinterleaves_stereo() {
        // L R L R
        let data = pcm_bytes(&[100, -100, 200, -200]);
        let buffer = decode_pcm16(&data, 24000, 2).unwrap();

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.channel(0), &[100.0 / 32768.0, 200.0 / 32768.0]);
        assert_eq!(buffer.channel(1), &[-100.0 / 32768.0, -200.0 / 32768.0]);
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        let result = decode_pcm16(&[0, 0, 0], 24000, 1);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_channel_mismatch() {
        // 3 samples cannot split across 2 channels
        let data = pcm_bytes(&[1, 2, 3]);
        let result = decode_pcm16(&data, 24000, 2);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_empty_payload() {
        let buffer = decode_pcm16(&[], 24000, 1).unwrap();
        assert_eq!(buffer.frame_count(), 0);
    }

    #[test]
    fn test_round_trip_within_one_quantization_step() {
        // Quantize floats the way the encoder does, decode back, and check
        // each sample lands within 1/32768 of the original.
        let originals: Vec<f32> = (0..1000).map(|i| ((i as f32) * 0.123).sin()).collect();
        let quantized: Vec<i16> = originals
            .iter()
            .map(|&s| {
                let s = s.clamp(-1.0, 1.0);
                if s < 0.0 {
                    (s * 32768.0) as i16
                } else {
                    (s * 32767.0) as i16
                }
            })
            .collect();

        let buffer = decode_pcm16(&pcm_bytes(&quantized), 24000, 1).unwrap();
        for (original, decoded) in originals.iter().zip(buffer.channel(0)) {
            assert!(
                (original - decoded).abs() <= 1.0 / 32768.0,
                "sample {} decoded as {}",
                original,
                decoded
            );
        }
    }

    #[test]
    fn test_base64_round_trip() {
        let data = pcm_bytes(&[1234, -1234]);
        let encoded = general_purpose::STANDARD.encode(&data);
        assert_eq!(decode_base64(&encoded).unwrap(), data);
    }

    #[test]
    fn test_base64_rejects_garbage() {
        assert!(matches!(decode_base64("not!base64?"), Err(Error::Decode(_))));
    }
}
