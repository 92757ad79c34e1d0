//! Timeline assembly
//!
//! Concatenates an ordered list of buffers into the single timeline that
//! feeds the encoder.

use crate::audio::types::AudioBuffer;
use crate::config::AudioConfig;
use tracing::debug;

/// Concatenate buffers in list order into one contiguous buffer.
///
/// The output takes its channel count and sample rate from the first buffer;
/// the assembler does not mix sample rates or expand mono to stereo. For each
/// input, channels up to `min(input channels, output channels)` are copied
/// verbatim at the running offset. Output channels beyond an input's own
/// count keep their zero default for that span, so a mono gap inside a wider
/// timeline only fills channel 0. The offset advances by each input's frame
/// count regardless of channel mismatches.
///
/// An empty input list returns a single-frame mono placeholder at the
/// config's sample rate rather than failing.
pub fn concatenate(buffers: &[AudioBuffer], config: &AudioConfig) -> AudioBuffer {
    if buffers.is_empty() {
        return AudioBuffer::silent(1, 1, config.sample_rate);
    }

    let total_frames: usize = buffers.iter().map(|b| b.frame_count()).sum();
    let first = &buffers[0];
    let mut output = AudioBuffer::silent(first.channel_count(), total_frames, first.sample_rate());

    let mut offset = 0;
    for buffer in buffers {
        let frame_count = buffer.frame_count();
        let copied_channels = buffer.channel_count().min(output.channel_count());
        for ch in 0..copied_channels {
            output.channel_mut(ch)[offset..offset + frame_count].copy_from_slice(buffer.channel(ch));
        }
        offset += frame_count;
    }

    debug!(
        segments = buffers.len(),
        frames = total_frames,
        sample_rate = output.sample_rate(),
        "Assembled timeline"
    );

    output
}
