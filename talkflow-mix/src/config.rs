//! Audio pipeline configuration
//!
//! The original design reused one shared audio context across all components;
//! here the equivalent parameters travel in an explicit [`AudioConfig`] value
//! passed into each component call.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Sample rate of the synthesis API's PCM payloads (reference deployment)
pub const SYNTHESIS_SAMPLE_RATE: u32 = 24_000;

/// Fixed output bitrate for the master file
pub const MP3_BITRATE_KBPS: u32 = 128;

/// Silence durations offered by the sequencer UI, in seconds.
/// The generator itself accepts arbitrary positive durations.
pub const SILENCE_PRESETS: [f64; 3] = [0.5, 1.0, 2.0];

/// Default file name for the downloadable master audio
pub const DEFAULT_OUTPUT_NAME: &str = "TalkFlow_Master_Audio.mp3";

/// Audio pipeline configuration
///
/// One value is shared (read-only) across Decode/Generate/Assemble/Encode
/// calls within a pipeline invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample rate declared by the synthesis collaborator (Hz)
    pub sample_rate: u32,

    /// MP3 output bitrate (kbps)
    pub bitrate_kbps: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: SYNTHESIS_SAMPLE_RATE,
            bitrate_kbps: MP3_BITRATE_KBPS,
        }
    }
}

impl AudioConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing keys fall back to the reference deployment defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: AudioConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::Config("sample_rate must be greater than zero".to_string()));
        }
        if self.bitrate_kbps == 0 {
            return Err(Error::Config("bitrate_kbps must be greater than zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AudioConfig::default();
        assert_eq!(config.sample_rate, 24_000);
        assert_eq!(config.bitrate_kbps, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AudioConfig = toml::from_str("sample_rate = 44100").unwrap();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.bitrate_kbps, 128);
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let config = AudioConfig {
            sample_rate: 0,
            bitrate_kbps: 128,
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
