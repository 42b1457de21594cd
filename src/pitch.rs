use crate::error::PantamError;

/// Frequency substituted when a pitch name cannot be resolved (A4).
pub const FALLBACK_FREQUENCY: f64 = 440.0;

/// Parsed form of a pitch token like "Bb4": letter, accidental offset, octave.
struct ParsedPitch {
    letter: char,
    accidental: i8,
    octave: i32,
}

/// Split a pitch token into letter, accidental and octave.
/// Accepts `<A-G>[#|b]<digits>`; the octave may have several digits.
fn parse_pitch(name: &str) -> Option<ParsedPitch> {
    let mut chars = name.chars();
    let letter = chars.next()?;
    if !('A'..='G').contains(&letter) {
        return None;
    }
    let rest = chars.as_str();
    let (accidental, digits) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let octave: i32 = digits.parse().ok()?;
    Some(ParsedPitch {
        letter,
        accidental,
        octave,
    })
}

/// Base frequency in Hz for a pitch class at octave 4, 12-tone equal
/// temperament around A4 = 440. Sharp of one letter and flat of the next
/// resolve to the same value (C# and Db are the same key).
fn base_frequency(letter: char, accidental: i8) -> Option<f64> {
    let freq = match (letter, accidental) {
        ('C', 0) => 261.63,
        ('C', 1) | ('D', -1) => 277.18,
        ('D', 0) => 293.66,
        ('D', 1) | ('E', -1) => 311.13,
        ('E', 0) => 329.63,
        ('F', 0) => 349.23,
        ('F', 1) | ('G', -1) => 369.99,
        ('G', 0) => 392.00,
        ('G', 1) | ('A', -1) => 415.30,
        ('A', 0) => 440.00,
        ('A', 1) | ('B', -1) => 466.16,
        ('B', 0) => 493.88,
        // E#, Fb, B#, Cb are not in the table
        _ => return None,
    };
    Some(freq)
}

/// Convert a pitch name to its frequency in Hz.
///
/// Uses a fixed octave-4 base table and a power-of-two octave multiplier:
/// `base(letter + accidental) * 2^(octave - 4)`.
///
/// # Examples
/// ```
/// use pantam::pitch::note_frequency;
///
/// assert_eq!(note_frequency("A4").unwrap(), 440.0);
/// assert_eq!(note_frequency("A5").unwrap(), 880.0);
/// assert_eq!(note_frequency("C#4").unwrap(), note_frequency("Db4").unwrap());
/// ```
///
/// # Errors
/// Returns [`PantamError::InvalidPitchName`] when the token does not parse or
/// names a pitch class outside the table (e.g. `E#`).
pub fn note_frequency(name: &str) -> Result<f64, PantamError> {
    let parsed =
        parse_pitch(name).ok_or_else(|| PantamError::InvalidPitchName(name.to_string()))?;
    let base = base_frequency(parsed.letter, parsed.accidental)
        .ok_or_else(|| PantamError::InvalidPitchName(name.to_string()))?;
    Ok(base * 2f64.powi(parsed.octave - 4))
}

/// Convert a pitch name to a frequency, substituting A4 = 440 Hz when the
/// token does not parse. An unknown pitch class with a valid octave still
/// gets the octave multiplier applied.
///
/// This lenient behavior is what the mapper relies on: a garbled pitch from
/// the transcription provider degrades to a nearest-match against 440 Hz
/// instead of failing the whole sequence.
pub fn note_frequency_lenient(name: &str) -> f64 {
    match parse_pitch(name) {
        Some(parsed) => {
            let base =
                base_frequency(parsed.letter, parsed.accidental).unwrap_or(FALLBACK_FREQUENCY);
            base * 2f64.powi(parsed.octave - 4)
        }
        None => FALLBACK_FREQUENCY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_pitches() {
        assert_eq!(note_frequency("A4").unwrap(), 440.0);
        assert_eq!(note_frequency("A5").unwrap(), 880.0);
        assert_eq!(note_frequency("A3").unwrap(), 220.0);
        assert_eq!(note_frequency("D4").unwrap(), 293.66);
        assert_eq!(note_frequency("G4").unwrap(), 392.00);
    }

    #[test]
    fn test_accidental_aliasing() {
        assert_eq!(
            note_frequency("C#4").unwrap(),
            note_frequency("Db4").unwrap()
        );
        assert_eq!(
            note_frequency("F#5").unwrap(),
            note_frequency("Gb5").unwrap()
        );
        assert_eq!(
            note_frequency("A#4").unwrap(),
            note_frequency("Bb4").unwrap()
        );
    }

    #[test]
    fn test_octave_multiplier() {
        // Bb5 is one octave above Bb4
        assert_eq!(
            note_frequency("Bb5").unwrap(),
            note_frequency("Bb4").unwrap() * 2.0
        );
        // Multi-digit octaves are accepted
        assert_eq!(
            note_frequency("A10").unwrap(),
            440.0 * 2f64.powi(6)
        );
    }

    #[test]
    fn test_invalid_names() {
        assert!(note_frequency("").is_err());
        assert!(note_frequency("H4").is_err());
        assert!(note_frequency("A").is_err());
        assert!(note_frequency("A#").is_err());
        assert!(note_frequency("Ax4").is_err());
        assert!(note_frequency("A-4").is_err());
        assert!(note_frequency("E#4").is_err());
        assert!(note_frequency("a4").is_err());
    }

    #[test]
    fn test_lenient_fallback() {
        assert_eq!(note_frequency_lenient("not-a-pitch"), 440.0);
        assert_eq!(note_frequency_lenient(""), 440.0);
        // Parseable token with an unknown pitch class keeps its octave
        assert_eq!(note_frequency_lenient("E#5"), 880.0);
        // Valid names go through the table unchanged
        assert_eq!(note_frequency_lenient("D4"), 293.66);
    }
}
