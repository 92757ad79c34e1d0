//! Error types for talkflow-mix
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation.

use thiserror::Error;

/// Main error type for talkflow-mix
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or mismatched PCM payload
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Underlying MP3 encoder unavailable or failed
    #[error("MP3 encode error: {0}")]
    Encode(String),

    /// No resolvable buffers remained after skipping missing tracks
    #[error("Empty timeline: no resolvable audio in the sequence")]
    EmptyTimeline,

    /// Configuration file loading or validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session file loading errors
    #[error("Session error: {0}")]
    Session(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using talkflow-mix Error
pub type Result<T> = std::result::Result<T, Error>;
