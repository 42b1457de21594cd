//! # Tuning Catalog
//!
//! This module defines the instrument tunings the engine can map onto and
//! play: each tuning is a fixed, ordered set of named pitches with exact
//! frequencies and circular layout angles.
//!
//! ## Key Concepts
//!
//! ### Ding and perimeter
//! A handpan has one central "ding" (the anchor, usually the lowest tone)
//! surrounded by perimeter tone fields. The full playable pitch set of a
//! tuning is the ding (if present) followed by the perimeter notes in
//! definition order; that order is also the tie-break order for
//! nearest-frequency mapping.
//!
//! ### Catalog
//! The built-in catalog is defined statically and never mutated after
//! construction. Custom tunings can be added from YAML before the catalog is
//! handed to the rest of the application.
//!
//! ## Entry Points
//! - [`TuningCatalog::builtin()`] - the five stock handpan scales
//! - [`TuningCatalog::get()`] / [`TuningCatalog::get_or_empty()`]
//! - [`TuningCatalog::list()`] - stable definition-order listing
//! - [`Tuning::from_yaml()`] / [`TuningCatalog::extend_from_yaml()`]

use serde::{Deserialize, Serialize};

use crate::error::PantamError;

/// Id of the tuning selected when the user has not chosen one.
pub const DEFAULT_TUNING: &str = "d-kurd-19";

/// A single playable pitch of a tuning.
///
/// `position` is the layout angle in degrees on the radial instrument
/// diagram, in `[0, 360)`. The ding sits at angle 0 by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunedNote {
    pub note: String,
    pub frequency: f64,
    pub position: f64,
}

/// A named instrument tuning: the ding plus the perimeter notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tuning {
    pub id: String,
    pub name: String,
    pub ding: Option<TunedNote>,
    pub perimeter: Vec<TunedNote>,
}

impl Tuning {
    /// A degenerate tuning with no playable notes, used as the tolerant
    /// fallback when an unknown id is requested via
    /// [`TuningCatalog::get_or_empty`].
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            ding: None,
            perimeter: Vec::new(),
        }
    }

    /// Iterate the full pitch set: ding first, then perimeter notes in
    /// definition order.
    pub fn notes(&self) -> impl Iterator<Item = &TunedNote> {
        self.ding.iter().chain(self.perimeter.iter())
    }

    /// Number of playable notes.
    pub fn len(&self) -> usize {
        self.ding.iter().len() + self.perimeter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ding.is_none() && self.perimeter.is_empty()
    }

    /// Parse a single custom tuning from YAML.
    ///
    /// # Example
    /// ```
    /// use pantam::Tuning;
    ///
    /// let src = r#"
    /// id: d-sabye-9
    /// name: D SaBye 9
    /// ding: { note: D4, frequency: 293.66, position: 0 }
    /// perimeter:
    ///   - { note: G4, frequency: 392.00, position: 45 }
    ///   - { note: A4, frequency: 440.00, position: 90 }
    /// "#;
    ///
    /// let tuning = Tuning::from_yaml(src).unwrap();
    /// assert_eq!(tuning.id, "d-sabye-9");
    /// assert_eq!(tuning.len(), 3);
    /// ```
    ///
    /// # Errors
    /// Returns [`PantamError::InvalidTuning`] on malformed YAML, a missing
    /// id or name, an empty note set, a non-positive frequency, or a layout
    /// angle outside `[0, 360)`.
    pub fn from_yaml(source: &str) -> Result<Self, PantamError> {
        let raw: RawTuning =
            serde_yaml::from_str(source).map_err(|e| PantamError::InvalidTuning(e.to_string()))?;
        raw.validate()
    }
}

/// Raw deserialized form of a custom tuning, before validation.
#[derive(Debug, Deserialize)]
struct RawTuning {
    id: String,
    name: String,
    #[serde(default)]
    ding: Option<TunedNote>,
    #[serde(default)]
    perimeter: Vec<TunedNote>,
}

impl RawTuning {
    fn validate(self) -> Result<Tuning, PantamError> {
        if self.id.trim().is_empty() {
            return Err(PantamError::InvalidTuning("tuning id is empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(PantamError::InvalidTuning(format!(
                "tuning '{}' has no display name",
                self.id
            )));
        }
        if self.ding.is_none() && self.perimeter.is_empty() {
            return Err(PantamError::InvalidTuning(format!(
                "tuning '{}' has no notes",
                self.id
            )));
        }
        for note in self.ding.iter().chain(self.perimeter.iter()) {
            if note.note.trim().is_empty() {
                return Err(PantamError::InvalidTuning(format!(
                    "tuning '{}' contains a note with no name",
                    self.id
                )));
            }
            if !note.frequency.is_finite() || note.frequency <= 0.0 {
                return Err(PantamError::InvalidTuning(format!(
                    "note '{}' in tuning '{}' has invalid frequency {}",
                    note.note, self.id, note.frequency
                )));
            }
            if !(0.0..360.0).contains(&note.position) {
                return Err(PantamError::InvalidTuning(format!(
                    "note '{}' in tuning '{}' has layout angle {} outside [0, 360)",
                    note.note, self.id, note.position
                )));
            }
        }
        Ok(Tuning {
            id: self.id,
            name: self.name,
            ding: self.ding,
            perimeter: self.perimeter,
        })
    }
}

/// The set of available tunings, in definition order.
#[derive(Debug, Clone)]
pub struct TuningCatalog {
    tunings: Vec<Tuning>,
}

impl TuningCatalog {
    /// The five stock handpan scales.
    pub fn builtin() -> Self {
        let tunings = vec![
            Tuning {
                id: "d-kurd-19".to_string(),
                name: "D Kurd 19".to_string(),
                ding: Some(tn("D4", 293.66, 0.0)),
                perimeter: vec![
                    tn("A4", 440.00, 40.0),
                    tn("Bb4", 466.16, 80.0),
                    tn("C5", 523.25, 120.0),
                    tn("D5", 587.33, 160.0),
                    tn("E5", 659.25, 200.0),
                    tn("F5", 698.46, 240.0),
                    tn("A5", 880.00, 280.0),
                    tn("Bb5", 932.33, 320.0),
                ],
            },
            Tuning {
                id: "d-kurd-17".to_string(),
                name: "D Kurd 17".to_string(),
                ding: Some(tn("D4", 293.66, 0.0)),
                perimeter: vec![
                    tn("A4", 440.00, 45.0),
                    tn("Bb4", 466.16, 90.0),
                    tn("C5", 523.25, 135.0),
                    tn("D5", 587.33, 180.0),
                    tn("E5", 659.25, 225.0),
                    tn("F5", 698.46, 270.0),
                    tn("A5", 880.00, 315.0),
                ],
            },
            Tuning {
                id: "d-minor-19".to_string(),
                name: "D Minor 19".to_string(),
                ding: Some(tn("D4", 293.66, 0.0)),
                perimeter: vec![
                    tn("E4", 329.63, 40.0),
                    tn("F4", 349.23, 80.0),
                    tn("A4", 440.00, 120.0),
                    tn("Bb4", 466.16, 160.0),
                    tn("C5", 523.25, 200.0),
                    tn("D5", 587.33, 240.0),
                    tn("E5", 659.25, 280.0),
                    tn("F5", 698.46, 320.0),
                ],
            },
            Tuning {
                id: "c-major-19".to_string(),
                name: "C Major 19".to_string(),
                ding: Some(tn("C4", 261.63, 0.0)),
                perimeter: vec![
                    tn("D4", 293.66, 40.0),
                    tn("E4", 329.63, 80.0),
                    tn("F4", 349.23, 120.0),
                    tn("G4", 392.00, 160.0),
                    tn("A4", 440.00, 200.0),
                    tn("B4", 493.88, 240.0),
                    tn("C5", 523.25, 280.0),
                    tn("D5", 587.33, 320.0),
                ],
            },
            Tuning {
                id: "e-minor-19".to_string(),
                name: "E Minor 19".to_string(),
                ding: Some(tn("E4", 329.63, 0.0)),
                perimeter: vec![
                    tn("F#4", 369.99, 40.0),
                    tn("G4", 392.00, 80.0),
                    tn("B4", 493.88, 120.0),
                    tn("C5", 523.25, 160.0),
                    tn("D5", 587.33, 200.0),
                    tn("E5", 659.25, 240.0),
                    tn("F#5", 739.99, 280.0),
                    tn("G5", 783.99, 320.0),
                ],
            },
        ];
        Self { tunings }
    }

    /// Look up a tuning by id.
    ///
    /// # Errors
    /// Returns [`PantamError::UnknownTuning`] if the id is not in the
    /// catalog.
    pub fn get(&self, id: &str) -> Result<&Tuning, PantamError> {
        self.tunings
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| PantamError::UnknownTuning { id: id.to_string() })
    }

    /// Look up a tuning by id, falling back to a degenerate empty tuning.
    ///
    /// This preserves the tolerant UI behavior: an unknown id renders an
    /// instrument with no notes rather than failing.
    pub fn get_or_empty(&self, id: &str) -> Tuning {
        self.tunings
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .unwrap_or_else(|| Tuning::empty(id))
    }

    /// List `(id, display name)` pairs in catalog-definition order.
    ///
    /// # Example
    /// ```
    /// use pantam::TuningCatalog;
    ///
    /// let catalog = TuningCatalog::builtin();
    /// let ids: Vec<&str> = catalog.list().iter().map(|(id, _)| *id).collect();
    /// assert_eq!(ids[0], "d-kurd-19");
    /// ```
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.tunings
            .iter()
            .map(|t| (t.id.as_str(), t.name.as_str()))
            .collect()
    }

    /// Add a tuning to the catalog.
    ///
    /// # Errors
    /// Returns [`PantamError::InvalidTuning`] if the id is already taken.
    pub fn push(&mut self, tuning: Tuning) -> Result<(), PantamError> {
        if self.tunings.iter().any(|t| t.id == tuning.id) {
            return Err(PantamError::InvalidTuning(format!(
                "duplicate tuning id '{}'",
                tuning.id
            )));
        }
        self.tunings.push(tuning);
        Ok(())
    }

    /// Parse a YAML sequence of tunings and append them to the catalog.
    pub fn extend_from_yaml(&mut self, source: &str) -> Result<(), PantamError> {
        let raw: Vec<RawTuning> =
            serde_yaml::from_str(source).map_err(|e| PantamError::InvalidTuning(e.to_string()))?;
        for tuning in raw {
            self.push(tuning.validate()?)?;
        }
        Ok(())
    }
}

fn tn(note: &str, frequency: f64, position: f64) -> TunedNote {
    TunedNote {
        note: note.to_string(),
        frequency,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = TuningCatalog::builtin();
        let ids: Vec<&str> = catalog.list().iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec![
                "d-kurd-19",
                "d-kurd-17",
                "d-minor-19",
                "c-major-19",
                "e-minor-19"
            ]
        );
    }

    #[test]
    fn test_get_known_tuning() {
        let catalog = TuningCatalog::builtin();
        let tuning = catalog.get(DEFAULT_TUNING).unwrap();
        assert_eq!(tuning.name, "D Kurd 19");
        assert_eq!(tuning.len(), 9);
        // Ding comes first in iteration order
        assert_eq!(tuning.notes().next().unwrap().note, "D4");
    }

    #[test]
    fn test_get_unknown_tuning() {
        let catalog = TuningCatalog::builtin();
        match catalog.get("g-mixolydian-12") {
            Err(PantamError::UnknownTuning { id }) => assert_eq!(id, "g-mixolydian-12"),
            other => panic!("expected UnknownTuning, got {:?}", other),
        }
    }

    #[test]
    fn test_get_or_empty_falls_back() {
        let catalog = TuningCatalog::builtin();
        let tuning = catalog.get_or_empty("g-mixolydian-12");
        assert!(tuning.is_empty());
        assert_eq!(tuning.id, "g-mixolydian-12");
    }

    #[test]
    fn test_yaml_tuning_roundtrip() {
        let src = r#"
id: d-amara-9
name: D Amara 9
ding: { note: D4, frequency: 293.66, position: 0 }
perimeter:
  - { note: A4, frequency: 440.00, position: 40 }
  - { note: C5, frequency: 523.25, position: 80 }
"#;
        let tuning = Tuning::from_yaml(src).unwrap();
        assert_eq!(tuning.id, "d-amara-9");
        assert_eq!(tuning.len(), 3);
        assert_eq!(tuning.ding.as_ref().unwrap().frequency, 293.66);
    }

    #[test]
    fn test_yaml_tuning_validation() {
        // No notes at all
        let empty = "id: x\nname: X\n";
        assert!(matches!(
            Tuning::from_yaml(empty),
            Err(PantamError::InvalidTuning(_))
        ));

        // Negative frequency
        let bad_freq = r#"
id: x
name: X
perimeter:
  - { note: A4, frequency: -440.0, position: 0 }
"#;
        assert!(matches!(
            Tuning::from_yaml(bad_freq),
            Err(PantamError::InvalidTuning(_))
        ));

        // Angle out of range
        let bad_angle = r#"
id: x
name: X
perimeter:
  - { note: A4, frequency: 440.0, position: 360 }
"#;
        assert!(matches!(
            Tuning::from_yaml(bad_angle),
            Err(PantamError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = TuningCatalog::builtin();
        let dup = catalog.get("d-kurd-19").unwrap().clone();
        assert!(matches!(
            catalog.push(dup),
            Err(PantamError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_extend_from_yaml() {
        let mut catalog = TuningCatalog::builtin();
        let src = r#"
- id: d-amara-9
  name: D Amara 9
  ding: { note: D4, frequency: 293.66, position: 0 }
  perimeter:
    - { note: A4, frequency: 440.00, position: 40 }
"#;
        catalog.extend_from_yaml(src).unwrap();
        assert!(catalog.get("d-amara-9").is_ok());
        // Appended after the built-ins, keeping definition order
        assert_eq!(catalog.list().last().unwrap().0, "d-amara-9");
    }
}
