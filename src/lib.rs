pub mod error;
pub mod pitch;
pub mod playback;
pub mod transcribe;
pub mod tuning;

pub use error::*;
pub use playback::*;
pub use transcribe::*;
pub use tuning::*;

pub use pitch::{note_frequency, note_frequency_lenient};

/// Map a transcription onto a catalog tuning.
/// This is the main entry point for the library.
///
/// # Example
/// ```rust
/// use pantam::{map_transcription, Transcription, TuningCatalog, DEFAULT_TUNING};
///
/// let body = r#"{ "notes": [ { "note": "D4", "time": 0.0 },
///                            { "note": "G4", "time": 0.5 } ] }"#;
/// let transcription = Transcription::from_json(body)?;
/// let catalog = TuningCatalog::builtin();
///
/// let mapped = map_transcription(&transcription, &catalog, DEFAULT_TUNING)?;
/// assert_eq!(mapped.len(), 2);
/// assert_eq!(mapped[0].note, "D4"); // exact match
/// assert_eq!(mapped[1].note, "A4"); // closest frequency to G4
/// # Ok::<(), pantam::PantamError>(())
/// ```
///
/// # Errors
/// Returns [`PantamError::UnknownTuning`] for an id not in the catalog and
/// [`PantamError::EmptyTuning`] if the tuning has no notes.
pub fn map_transcription(
    transcription: &Transcription,
    catalog: &TuningCatalog,
    tuning_id: &str,
) -> Result<Vec<MappedNote>, PantamError> {
    let tuning = catalog.get(tuning_id)?;
    map_to_tuning(&transcription.notes, tuning)
}

/// Fetch a transcription from `provider` for `url` and map it onto a
/// catalog tuning in one step.
pub fn transcribe_and_map<P: TranscriptionProvider + ?Sized>(
    provider: &P,
    url: &str,
    catalog: &TuningCatalog,
    tuning_id: &str,
) -> Result<Vec<MappedNote>, PantamError> {
    let transcription = fetch_transcription(provider, url)?;
    map_transcription(&transcription, catalog, tuning_id)
}
