//! Silence generation
//!
//! Produces the mono gap buffers placed between voice tracks.

use crate::audio::types::AudioBuffer;

/// Create a mono buffer of zero-valued frames for the given duration.
///
/// The frame count is `duration_seconds * sample_rate` truncated toward zero,
/// so identical inputs always yield identical frame counts. A zero or
/// negative duration yields a valid zero-frame buffer; downstream
/// concatenation tolerates zero-length inputs.
pub fn silence(duration_seconds: f64, sample_rate: u32) -> AudioBuffer {
    let frame_count = if duration_seconds > 0.0 {
        (duration_seconds * sample_rate as f64) as usize
    } else {
        0
    };

    AudioBuffer::silent(1, frame_count, sample_rate)
}
