//! # Playback Module
//!
//! Maps transcribed note sequences onto a tuning and plays them back in
//! timed sequence.
//!
//! ## Purpose
//! This module is the engine behind the app's Auto-Play flow:
//! 1. **Mapping** - rewrite an arbitrary note sequence onto the pitches a
//!    tuning actually has ([`map_to_tuning`])
//! 2. **Scheduling** - fire sound-start/sound-stop events at each note's
//!    onset, with overlap support and clean cancellation
//!    ([`PlaybackScheduler`])
//! 3. **Rendering** - delegate the actual sound to an external
//!    [`SoundRenderer`]
//!
//! ## Sub-modules
//! - `types` - MappedNote and PlaybackConfig definitions
//! - `mapper` - exact-match / closest-frequency mapping logic
//! - `scheduler` - worker-thread run scheduling and cancellation
//! - `renderer` - the consumed sound-renderer contract
//!
//! ## Highlight protocol
//! The scheduler owns no visual state. The presentation layer keeps its own
//! set of currently-sounding notes and updates it from the `on_note_start` /
//! `on_note_end` callbacks; overlapping notes of the same pitch mean that
//! set must support multiplicity (or accept last-writer-wins removal).

mod mapper;
mod renderer;
mod scheduler;
mod types;


pub use mapper::map_to_tuning;
pub use renderer::{strike, LogRenderer, NullRenderer, SoundRenderer, DEFAULT_STRIKE_DURATION};
pub use scheduler::{PlaybackScheduler, RunCallbacks, RunHandle};
pub use types::{MappedNote, PlaybackConfig, DEFAULT_NOTE_DURATION};
