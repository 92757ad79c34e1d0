//! Audio assembly components
//!
//! Pure buffer transformations: PCM decoding, silence generation, timeline
//! concatenation, and MP3 encoding.

pub mod mp3;
pub mod pcm;
pub mod silence;
pub mod timeline;
pub mod types;

// Re-exports for external use (tests, other modules)
pub use types::{AudioBuffer, EncodedAudioBlob};
