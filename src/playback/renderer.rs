//! Sound renderer contract
//!
//! The engine never synthesizes audio itself; it drives an external renderer
//! through this trait. A renderer is expected to produce audible output for
//! approximately the requested duration and release its own resources
//! afterwards without caller intervention.

use crate::tuning::TunedNote;

/// Sounding length used for a single interactive strike, in seconds.
/// Slightly longer than the sequenced default so a lone note can ring out.
pub const DEFAULT_STRIKE_DURATION: f64 = 0.8;

/// Contract consumed by the playback scheduler.
///
/// `trigger` is fire-and-forget: the scheduler never waits on it, and
/// overlapping notes mean it can be called concurrently for different (or
/// the same) pitches. Implementations must tolerate that.
pub trait SoundRenderer: Send + Sync {
    /// Bring the audio backend from `Uninitialized` to `Ready`.
    ///
    /// Idempotent; the scheduler calls this once before the first trigger of
    /// every run, and interactive paths call it before a lone strike.
    fn ensure_ready(&self) {}

    /// Start sounding `frequency` Hz for roughly `duration` seconds.
    fn trigger(&self, frequency: f64, duration: f64);
}

/// Renderer that produces no sound. Used in tests and headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl SoundRenderer for NullRenderer {
    fn trigger(&self, _frequency: f64, _duration: f64) {}
}

/// Renderer that logs each trigger instead of sounding it.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl SoundRenderer for LogRenderer {
    fn trigger(&self, frequency: f64, duration: f64) {
        log::info!("trigger {:.2} Hz for {:.2}s", frequency, duration);
    }
}

/// Sound a single tuning note, the click-to-play path.
pub fn strike(renderer: &dyn SoundRenderer, note: &TunedNote, duration: f64) {
    renderer.ensure_ready();
    renderer.trigger(note.frequency, duration);
}
