//! Playback scheduler
//!
//! Drives time-based sound-start and sound-stop signaling for a mapped note
//! sequence, with overlap support and clean cancellation.
//!
//! ## Model
//! `start_run` validates, expands the sequence into start/end events sorted
//! by absolute offset, hands them to a dedicated worker thread, and returns
//! immediately. The worker sleeps until each deadline on a cancellation
//! channel, so a cancel interrupts the wait instead of racing it. The
//! pending-event collection lives entirely on the worker thread; the only
//! cross-thread state is the run-active flag and the channel.
//!
//! ## Guarantees
//! - Events for one note fire start-then-end; across notes strictly by
//!   scheduled offset, ties in input order.
//! - One matched start/end pair per input note; an end event never cancels
//!   another note's pending events, even for the same pitch name.
//! - Only one run may be active per scheduler; a second `start_run` is
//!   rejected until the first completes or is cancelled.
//! - Cancellation prevents every not-yet-fired event, marks the run
//!   inactive immediately, and is idempotent (safe after completion).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::error::PantamError;

use super::renderer::SoundRenderer;
use super::types::{MappedNote, PlaybackConfig};

/// Callbacks observed by the presentation layer during a run.
///
/// `on_note_start` / `on_note_end` bracket each note's sounding window; the
/// caller typically adds/removes the note in its highlight set and
/// re-renders. `on_run_complete` fires once, after the last end event of a
/// run that was not cancelled.
pub struct RunCallbacks {
    on_note_start: Box<dyn FnMut(&MappedNote) + Send>,
    on_note_end: Box<dyn FnMut(&MappedNote) + Send>,
    on_run_complete: Option<Box<dyn FnOnce() + Send>>,
}

impl RunCallbacks {
    pub fn new(
        on_note_start: impl FnMut(&MappedNote) + Send + 'static,
        on_note_end: impl FnMut(&MappedNote) + Send + 'static,
    ) -> Self {
        Self {
            on_note_start: Box::new(on_note_start),
            on_note_end: Box::new(on_note_end),
            on_run_complete: None,
        }
    }

    pub fn with_completion(mut self, on_run_complete: impl FnOnce() + Send + 'static) -> Self {
        self.on_run_complete = Some(Box::new(on_run_complete));
        self
    }
}

enum EventKind {
    Start,
    End,
}

struct ScheduledEvent {
    at: Duration,
    index: usize,
    kind: EventKind,
}

/// Handle to an in-flight playback run.
///
/// Dropping the handle detaches the run (it plays to completion);
/// stopping it is always an explicit [`RunHandle::cancel`].
pub struct RunHandle {
    cancel_tx: Sender<()>,
    cancelled: Arc<AtomicBool>,
    active: Arc<AtomicBool>,
    worker: thread::JoinHandle<()>,
}

impl RunHandle {
    /// Stop the run: no not-yet-fired start/end event will fire, and the
    /// scheduler is free to start a new run immediately.
    ///
    /// Idempotent; calling it twice, or after the run already completed,
    /// does nothing.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.active.store(false, Ordering::Release);
        // Wake the worker if it is sleeping. A full or disconnected channel
        // means it was already signalled or already finished.
        let _ = self.cancel_tx.try_send(());
    }

    /// Whether the worker has finished (completed or cancelled and drained).
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Block until the worker finishes.
    pub fn wait(self) {
        if self.worker.join().is_err() {
            log::warn!("playback worker panicked");
        }
    }
}

/// Schedules timed playback runs. At most one run is active at a time.
pub struct PlaybackScheduler {
    config: PlaybackConfig,
    active: Arc<AtomicBool>,
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self::with_config(PlaybackConfig::default())
    }

    pub fn with_config(config: PlaybackConfig) -> Self {
        Self {
            config,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a run is currently active.
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Start a playback run over `sequence`.
    ///
    /// Returns immediately after scheduling; all triggering happens on a
    /// worker thread. For each note, `on_note_start` and
    /// `renderer.trigger(frequency, note_duration)` fire at the note's
    /// onset, and `on_note_end` fires `note_duration` later. The sequence
    /// does not need to be sorted by onset; events fire by absolute time.
    ///
    /// # Errors
    /// - [`PantamError::EmptyRun`] if `sequence` is empty.
    /// - [`PantamError::AlreadyRunning`] if a run is active; cancel it
    ///   first.
    pub fn start_run(
        &self,
        sequence: Vec<MappedNote>,
        renderer: Arc<dyn SoundRenderer>,
        callbacks: RunCallbacks,
    ) -> Result<RunHandle, PantamError> {
        if sequence.is_empty() {
            return Err(PantamError::EmptyRun);
        }
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PantamError::AlreadyRunning);
        }

        let note_duration = offset(self.config.note_duration);
        let mut events = Vec::with_capacity(sequence.len() * 2);
        for (index, note) in sequence.iter().enumerate() {
            let onset = offset(note.time);
            events.push(ScheduledEvent {
                at: onset,
                index,
                kind: EventKind::Start,
            });
            events.push(ScheduledEvent {
                at: onset + note_duration,
                index,
                kind: EventKind::End,
            });
        }
        // Stable by offset: a note's start was pushed before its end, and
        // same-offset events across notes keep input order.
        events.sort_by_key(|e| e.at);

        let total = events.last().map(|e| e.at).unwrap_or(Duration::ZERO);
        log::debug!(
            "starting playback run: {} notes over {:.2}s",
            sequence.len(),
            total.as_secs_f64()
        );

        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let signals = RunSignals {
            cancel_rx,
            cancelled: Arc::clone(&cancelled),
            active: Arc::clone(&self.active),
        };
        let worker = thread::spawn(move || {
            run_worker(sequence, events, renderer, callbacks, signals, note_duration);
        });

        Ok(RunHandle {
            cancel_tx,
            cancelled,
            active: Arc::clone(&self.active),
            worker,
        })
    }
}

/// Cross-thread state shared between a run's worker and its handle.
struct RunSignals {
    cancel_rx: Receiver<()>,
    cancelled: Arc<AtomicBool>,
    active: Arc<AtomicBool>,
}

fn run_worker(
    sequence: Vec<MappedNote>,
    events: Vec<ScheduledEvent>,
    renderer: Arc<dyn SoundRenderer>,
    mut callbacks: RunCallbacks,
    signals: RunSignals,
    note_duration: Duration,
) {
    let RunSignals {
        cancel_rx,
        cancelled,
        active,
    } = signals;
    renderer.ensure_ready();
    let started = Instant::now();
    let mut handle_gone = false;

    for event in events {
        // Checked before every event, including ones already due, so a
        // cancel stops a burst of simultaneous events mid-burst.
        if cancelled.load(Ordering::Acquire) {
            break;
        }

        loop {
            let elapsed = started.elapsed();
            if elapsed >= event.at {
                break;
            }
            let remaining = event.at - elapsed;
            if handle_gone {
                thread::sleep(remaining);
                break;
            }
            match cancel_rx.recv_timeout(remaining) {
                Ok(()) => {
                    cancelled.store(true, Ordering::Release);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    // Handle dropped: the run is detached and can no longer
                    // be cancelled, so plain sleeps suffice from here on.
                    handle_gone = true;
                }
            }
        }
        if cancelled.load(Ordering::Acquire) {
            break;
        }

        let note = &sequence[event.index];
        match event.kind {
            EventKind::Start => {
                (callbacks.on_note_start)(note);
                renderer.trigger(note.frequency, note_duration.as_secs_f64());
            }
            EventKind::End => (callbacks.on_note_end)(note),
        }
    }

    if cancelled.load(Ordering::Acquire) {
        // cancel() already marked the run inactive; a new run may even have
        // started, so the flag must not be touched here.
        log::debug!("playback run cancelled");
    } else {
        active.store(false, Ordering::Release);
        if let Some(on_run_complete) = callbacks.on_run_complete.take() {
            on_run_complete();
        }
        log::debug!("playback run complete");
    }
}

/// Seconds to a timer offset; garbage (negative, NaN) clamps to zero.
fn offset(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::from_secs_f64(seconds)
    } else {
        Duration::ZERO
    }
}
