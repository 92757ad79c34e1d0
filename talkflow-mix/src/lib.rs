//! # TalkFlow Mixdown Library (talkflow-mix)
//!
//! Audio assembly pipeline for multi-track voice sessions.
//!
//! **Purpose:** Decode raw PCM payloads produced by a text-to-speech
//! collaborator, synthesize silence gaps, concatenate the pieces into one
//! timeline in user order, and encode the result to a downloadable MP3.
//!
//! **Architecture:** Pure buffer transformations (`audio` module) driven by a
//! single orchestrator (`pipeline` module). Per-item resolution fans out
//! concurrently; assembly and encoding are strictly sequential.

pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod session;

pub use error::{Error, Result};
