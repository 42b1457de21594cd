//! # Error Types
//!
//! This module defines all error types for the pantam engine.
//!
//! ## Error Types
//! - `UnknownTuning` - A tuning id that is not in the catalog
//! - `InvalidPitchName` - A pitch token that does not parse (recovered locally
//!   with a documented fallback, see `pitch::note_frequency_lenient`)
//! - `InvalidTuning` - A custom tuning definition that fails validation
//! - `EmptyTuning` - Mapping against a tuning with no notes
//! - `EmptyRun` / `AlreadyRunning` - Playback preconditions
//! - `InvalidSource` / `Provider` / `InvalidResponse` - Transcription-provider
//!   boundary failures, always surfaced to the caller
//!
//! ## Usage
//! ```rust
//! use pantam::{PantamError, TuningCatalog};
//!
//! let catalog = TuningCatalog::builtin();
//! match catalog.get("c-bebop-9") {
//!     Ok(tuning) => println!("{}", tuning.name),
//!     Err(PantamError::UnknownTuning { id }) => {
//!         eprintln!("No such tuning: {}", id);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PantamError {
    /// Unknown tuning id requested from the catalog.
    ///
    /// # Example
    /// ```
    /// # use pantam::PantamError;
    /// let err = PantamError::UnknownTuning { id: "c-bebop-9".to_string() };
    /// assert_eq!(err.to_string(), "Unknown tuning: c-bebop-9");
    /// ```
    #[error("Unknown tuning: {id}")]
    UnknownTuning { id: String },

    /// A pitch name that does not match `<letter A-G>[#|b]<octave>`.
    ///
    /// Callers that can tolerate bad input should prefer
    /// `pitch::note_frequency_lenient`, which substitutes A4 = 440 Hz
    /// instead of propagating this error.
    #[error("Invalid pitch name: {0}")]
    InvalidPitchName(String),

    /// A custom tuning definition that is syntactically or semantically
    /// invalid (bad YAML, missing id, non-positive frequency, angle out of
    /// range, duplicate id).
    #[error("Invalid tuning definition: {0}")]
    InvalidTuning(String),

    /// Mapping was attempted against a tuning with an empty pitch set.
    ///
    /// # Example
    /// ```
    /// # use pantam::PantamError;
    /// let err = PantamError::EmptyTuning { id: "custom".to_string() };
    /// assert_eq!(err.to_string(), "Tuning 'custom' has no notes to map onto");
    /// ```
    #[error("Tuning '{id}' has no notes to map onto")]
    EmptyTuning { id: String },

    /// Playback was started with zero notes. Callers are expected to check
    /// and report to the user rather than start.
    #[error("Cannot start playback of an empty note sequence")]
    EmptyRun,

    /// A playback run is already active. Only one run may be active at a
    /// time; cancel the current run before starting another.
    #[error("A playback run is already active; cancel it before starting a new one")]
    AlreadyRunning,

    /// The source locator handed to the transcription provider is malformed.
    #[error("Invalid source URL: {0}")]
    InvalidSource(String),

    /// The transcription provider was unreachable or reported a failure.
    #[error("Transcription provider failed: {0}")]
    Provider(String),

    /// The transcription provider answered with a malformed response
    /// (missing `notes`, or `notes` not a sequence).
    #[error("Invalid transcription response: {0}")]
    InvalidResponse(String),
}
