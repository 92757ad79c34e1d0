//! Voice session model
//!
//! A session is one in-memory authoring state: the parallel voice tracks
//! (with their synthesized base64 payloads) and the user-ordered sequence
//! describing the final output. Sessions round-trip through JSON so the CLI
//! can load what the editing collaborator saved.

use crate::audio::pcm;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;
use uuid::Uuid;

/// Synthesis lifecycle state of one track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    /// No synthesis attempted yet
    Idle,
    /// Synthesis request in flight
    Processing,
    /// Synthesis succeeded; `audio_data` holds the payload
    Completed,
    /// Synthesis failed
    Error,
}

/// One voice track authored by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Stable track identifier
    pub id: Uuid,

    /// Text to synthesize
    pub text: String,

    /// Voice preset name used by the synthesis collaborator
    pub voice: String,

    /// Synthesis state
    pub status: TrackStatus,

    /// Base64-encoded raw 16-bit PCM payload, present once synthesized
    #[serde(default)]
    pub audio_data: Option<String>,

    /// Whether the user selected this track for the master file
    #[serde(default)]
    pub include_in_master: bool,
}

/// One entry in the user-ordered output sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SequenceItem {
    /// Play an already-synthesized track
    Track {
        /// Id of the referenced track
        track_id: Uuid,
    },

    /// Play silence for a duration in seconds
    Silence {
        /// Gap length in seconds
        duration: f64,
    },
}

/// Session state: tracks plus the ordered output sequence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// All authored tracks, synthesized or not
    pub tracks: Vec<Track>,

    /// The sole description of what the final audio should be
    pub sequence: Vec<SequenceItem>,
}

impl Session {
    /// Load a session from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Session(format!("invalid session file: {}", e)))
    }

    /// Find a track by id
    pub fn track(&self, id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }
}

/// Lookup from track reference to its raw PCM payload.
///
/// `None` means the track has no usable audio (never synthesized, synthesis
/// failed, or excluded); the orchestrator skips such items rather than
/// failing the pipeline.
pub trait PayloadSource: Send + Sync {
    /// Raw PCM bytes for a track, if it resolved to usable audio
    fn payload(&self, track_id: Uuid) -> Option<Vec<u8>>;
}

impl PayloadSource for Session {
    fn payload(&self, track_id: Uuid) -> Option<Vec<u8>> {
        let track = self.track(track_id)?;
        if track.status != TrackStatus::Completed || !track.include_in_master {
            return None;
        }
        let data = track.audio_data.as_deref()?;

        match pcm::decode_base64(data) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(track_id = %track_id, error = %e, "Discarding track with malformed audio payload");
                None
            }
        }
    }
}

impl PayloadSource for HashMap<Uuid, Vec<u8>> {
    fn payload(&self, track_id: Uuid) -> Option<Vec<u8>> {
        self.get(&track_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose, Engine as _};

    fn completed_track(id: Uuid, payload: &[u8]) -> Track {
        Track {
            id,
            text: "Hello".to_string(),
            voice: "Kore".to_string(),
            status: TrackStatus::Completed,
            audio_data: Some(general_purpose::STANDARD.encode(payload)),
            include_in_master: true,
        }
    }

    #[test]
    fn test_session_json_round_trip() {
        let id = Uuid::new_v4();
        let session = Session {
            tracks: vec![completed_track(id, &[1, 0, 2, 0])],
            sequence: vec![
                SequenceItem::Track { track_id: id },
                SequenceItem::Silence { duration: 0.5 },
            ],
        };

        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.tracks.len(), 1);
        assert_eq!(parsed.tracks[0].status, TrackStatus::Completed);
        assert!(matches!(parsed.sequence[0], SequenceItem::Track { track_id } if track_id == id));
        assert!(matches!(parsed.sequence[1], SequenceItem::Silence { duration } if duration == 0.5));
    }

    #[test]
    fn test_sequence_item_wire_format() {
        let json = r#"{"type":"silence","duration":2.0}"#;
        let item: SequenceItem = serde_json::from_str(json).unwrap();
        assert!(matches!(item, SequenceItem::Silence { duration } if duration == 2.0));
    }

    #[test]
    fn test_payload_for_completed_track() {
        let id = Uuid::new_v4();
        let session = Session {
            tracks: vec![completed_track(id, &[1, 0, 2, 0])],
            sequence: vec![],
        };

        assert_eq!(session.payload(id), Some(vec![1, 0, 2, 0]));
    }

    #[test]
    fn test_payload_missing_for_unsynthesized_track() {
        let id = Uuid::new_v4();
        let mut track = completed_track(id, &[]);
        track.status = TrackStatus::Idle;
        track.audio_data = None;
        let session = Session {
            tracks: vec![track],
            sequence: vec![],
        };

        assert_eq!(session.payload(id), None);
    }

    #[test]
    fn test_payload_missing_for_excluded_track() {
        let id = Uuid::new_v4();
        let mut track = completed_track(id, &[1, 0]);
        track.include_in_master = false;
        let session = Session {
            tracks: vec![track],
            sequence: vec![],
        };

        assert_eq!(session.payload(id), None);
    }

    #[test]
    fn test_payload_missing_for_unknown_track() {
        let session = Session::default();
        assert_eq!(session.payload(Uuid::new_v4()), None);
    }

    #[test]
    fn test_malformed_base64_resolves_to_none() {
        let id = Uuid::new_v4();
        let mut track = completed_track(id, &[]);
        track.audio_data = Some("!!not base64!!".to_string());
        let session = Session {
            tracks: vec![track],
            sequence: vec![],
        };

        assert_eq!(session.payload(id), None);
    }
}
