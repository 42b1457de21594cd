//! Note mapping engine
//!
//! Rewrites a transcribed note sequence onto the fixed pitch set of a chosen
//! tuning: exact name matches pass through, everything else snaps to the
//! tuning note with the closest frequency.

use std::collections::HashMap;

use crate::error::PantamError;
use crate::pitch::note_frequency_lenient;
use crate::transcribe::TranscribedNote;
use crate::tuning::{TunedNote, Tuning};

use super::types::MappedNote;

/// Map a transcribed note sequence onto a tuning's pitch set.
///
/// One [`MappedNote`] is produced per input note, in input order. For each
/// note:
/// 1. If the pitch name exists in the tuning, that tuning note is emitted
///    unchanged (exact-match short circuit).
/// 2. Otherwise the input's frequency is derived and the tuning note with
///    the smallest absolute frequency difference wins; ties go to the
///    earlier note in the tuning's iteration order (ding first, then
///    perimeter in definition order).
///
/// The onset time is copied from the input either way. The function is pure
/// and deterministic for a given tuning and input.
///
/// Distance is measured in raw Hz, not cents, matching the observed behavior
/// of the instrument this engine models.
///
/// # Example
/// ```
/// use pantam::{map_to_tuning, TranscribedNote, TuningCatalog};
///
/// let catalog = TuningCatalog::builtin();
/// let tuning = catalog.get("d-kurd-19").unwrap();
/// let notes = vec![TranscribedNote { note: "G4".to_string(), time: 0.5 }];
///
/// // G4 (392 Hz) is not in D Kurd; A4 (440 Hz) is the nearest pitch.
/// let mapped = map_to_tuning(&notes, tuning).unwrap();
/// assert_eq!(mapped[0].note, "A4");
/// assert_eq!(mapped[0].time, 0.5);
/// ```
///
/// # Errors
/// Returns [`PantamError::EmptyTuning`] if the tuning has no notes.
pub fn map_to_tuning(
    notes: &[TranscribedNote],
    tuning: &Tuning,
) -> Result<Vec<MappedNote>, PantamError> {
    if tuning.is_empty() {
        return Err(PantamError::EmptyTuning {
            id: tuning.id.clone(),
        });
    }

    // Built once per call, not per note.
    let by_name: HashMap<&str, &TunedNote> =
        tuning.notes().map(|n| (n.note.as_str(), n)).collect();

    notes
        .iter()
        .map(|input| {
            if let Some(exact) = by_name.get(input.note.as_str()) {
                return Ok(MappedNote::from_tuned(exact, input.time));
            }
            let closest = closest_by_frequency(tuning, note_frequency_lenient(&input.note))
                .ok_or_else(|| PantamError::EmptyTuning {
                    id: tuning.id.clone(),
                })?;
            Ok(MappedNote::from_tuned(closest, input.time))
        })
        .collect()
}

/// The tuning note with the smallest |frequency - target|; first occurrence
/// wins on a tie.
fn closest_by_frequency(tuning: &Tuning, target: f64) -> Option<&TunedNote> {
    let mut best: Option<(&TunedNote, f64)> = None;
    for note in tuning.notes() {
        let diff = (note.frequency - target).abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((note, diff)),
        }
    }
    best.map(|(note, _)| note)
}
