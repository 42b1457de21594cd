//! Playback data type definitions
//!
//! This module defines the types used for timed playback and visual note
//! highlighting.

use serde::Serialize;

use crate::tuning::TunedNote;

/// Default sounding length of one struck note, in seconds.
pub const DEFAULT_NOTE_DURATION: f64 = 0.5;

/// Playback data for a single mapped note
///
/// Contains ALL information needed for both audio playback and visual
/// highlighting: the resolved tuning pitch plus the onset time carried over
/// from the transcription.
///
/// # Fields
/// - `note`: Resolved pitch name, always one of the tuning's own notes
/// - `frequency`: Exact frequency of that tuning note in Hz
/// - `position`: Layout angle on the radial diagram, for highlighting
/// - `time`: Onset in seconds from the start of the run
///
/// Every field is always present; there are no optional per-note fields.
/// The sounding duration is a run-level setting ([`PlaybackConfig`]), not a
/// per-note one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedNote {
    pub note: String,
    pub frequency: f64,
    pub position: f64,
    pub time: f64,
}

impl MappedNote {
    /// Pair a tuning note with an onset time.
    pub fn from_tuned(tuned: &TunedNote, time: f64) -> Self {
        Self {
            note: tuned.note.clone(),
            frequency: tuned.frequency,
            position: tuned.position,
            time,
        }
    }
}

/// Run-level playback settings.
///
/// `note_duration` is the sounding length applied to every note of a run,
/// in seconds. It must be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub note_duration: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            note_duration: DEFAULT_NOTE_DURATION,
        }
    }
}
