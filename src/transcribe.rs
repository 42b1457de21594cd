//! # Transcription Provider Boundary
//!
//! The engine does not transcribe audio itself; an external provider turns a
//! source locator (a YouTube URL) into an ordered note sequence. This module
//! defines that contract: locator validation, the response shape, and the
//! [`TranscriptionProvider`] trait the application plugs a backend into.
//!
//! Failure modes are kept distinct so the user-facing layer can tell them
//! apart: a malformed locator ([`PantamError::InvalidSource`]), an
//! unreachable or failing provider ([`PantamError::Provider`]), and a
//! response that does not have the expected shape
//! ([`PantamError::InvalidResponse`]).

use serde::{Deserialize, Serialize};

use crate::error::PantamError;

/// One note reported by the transcription provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscribedNote {
    /// Pitch name, e.g. `"Bb4"`. Not guaranteed to exist in any tuning.
    pub note: String,
    /// Onset in seconds. The provider does not guarantee ascending order.
    pub time: f64,
}

/// A complete provider response: the note sequence and its overall length.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub notes: Vec<TranscribedNote>,
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
struct RawTranscription {
    notes: Vec<TranscribedNote>,
    duration: Option<f64>,
}

impl Transcription {
    /// Parse a provider response body.
    ///
    /// A missing `duration` falls back to the last note's onset, so older
    /// providers that omit it keep working.
    ///
    /// # Example
    /// ```
    /// use pantam::Transcription;
    ///
    /// let body = r#"{ "notes": [ { "note": "D4", "time": 0.0 },
    ///                            { "note": "A4", "time": 0.5 } ] }"#;
    /// let transcription = Transcription::from_json(body).unwrap();
    /// assert_eq!(transcription.notes.len(), 2);
    /// assert_eq!(transcription.duration, 0.5);
    /// ```
    ///
    /// # Errors
    /// Returns [`PantamError::InvalidResponse`] when the body is not JSON or
    /// `notes` is missing or not a sequence of `{note, time}` objects.
    pub fn from_json(body: &str) -> Result<Self, PantamError> {
        let raw: RawTranscription =
            serde_json::from_str(body).map_err(|e| PantamError::InvalidResponse(e.to_string()))?;
        let duration = raw
            .duration
            .or_else(|| raw.notes.last().map(|n| n.time))
            .unwrap_or(0.0);
        Ok(Self {
            notes: raw.notes,
            duration,
        })
    }
}

/// Backend that turns a validated source URL into a [`Transcription`].
///
/// Implementations live outside the engine (an HTTP client against a
/// transcription service, a fixture reader in tests). Connectivity failures
/// and non-2xx responses surface as [`PantamError::Provider`].
pub trait TranscriptionProvider {
    fn transcribe(&self, url: &str) -> Result<Transcription, PantamError>;
}

/// Validate the locator, then fetch the transcription from `provider`.
///
/// Provider and response errors pass through unchanged; nothing is
/// swallowed on this path.
pub fn fetch_transcription<P: TranscriptionProvider + ?Sized>(
    provider: &P,
    url: &str,
) -> Result<Transcription, PantamError> {
    validate_source_url(url)?;
    provider.transcribe(url)
}

/// Check that `url` is a YouTube locator with a well-formed video id.
pub fn validate_source_url(url: &str) -> Result<(), PantamError> {
    extract_video_id(url)
        .map(|_| ())
        .ok_or_else(|| PantamError::InvalidSource(url.to_string()))
}

/// Extract the 11-character video id from a YouTube URL.
///
/// Accepts the usual locator forms:
/// `youtube.com/watch?v=<id>`, `youtu.be/<id>`, `youtube.com/embed/<id>`
/// and `youtube.com/v/<id>`.
///
/// # Example
/// ```
/// use pantam::extract_video_id;
///
/// assert_eq!(
///     extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(extract_video_id("https://example.com/watch?v=x"), None);
/// ```
pub fn extract_video_id(url: &str) -> Option<&str> {
    let rest = if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest
    } else if let Some((_, path)) = url.split_once("youtube.com/") {
        if let Some(embedded) = path.strip_prefix("embed/") {
            embedded
        } else if let Some(plain) = path.strip_prefix("v/") {
            plain
        } else {
            // "v" must be a query parameter, not the tail of another name
            let mut value = None;
            for (at, _) in path.match_indices("v=") {
                let before = &path[..at];
                if before.ends_with('?') || before.ends_with('&') {
                    value = Some(&path[at + 2..]);
                    break;
                }
            }
            value?
        }
    } else {
        return None;
    };

    let end = rest
        .find(|c: char| c.is_whitespace() || matches!(c, '"' | '&' | '?' | '/'))
        .unwrap_or(rest.len());
    // Ids are exactly 11 URL-safe characters; longer tokens keep their
    // first 11, shorter ones are rejected.
    rest[..end].get(..11)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_forms() {
        let id = Some("dQw4w9WgXcQ");
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            id
        );
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), id);
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            id
        );
        assert_eq!(extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ"), id);
        assert_eq!(
            extract_video_id("youtube.com/watch?list=x&v=dQw4w9WgXcQ&t=4"),
            id
        );
    }

    #[test]
    fn test_extract_video_id_rejects() {
        assert_eq!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
        assert_eq!(extract_video_id("not a url"), None);
        // "v=" embedded in another parameter name is not a video id
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?xv=dQw4w9WgXcQ"),
            None
        );
    }

    #[test]
    fn test_validate_source_url() {
        assert!(validate_source_url("https://youtu.be/dQw4w9WgXcQ").is_ok());
        match validate_source_url("https://example.com/nope") {
            Err(PantamError::InvalidSource(url)) => {
                assert_eq!(url, "https://example.com/nope")
            }
            other => panic!("expected InvalidSource, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_backfills_duration() {
        let body = r#"{ "notes": [ { "note": "D4", "time": 0.0 },
                                   { "note": "A4", "time": 1.5 } ] }"#;
        let t = Transcription::from_json(body).unwrap();
        assert_eq!(t.duration, 1.5);

        let explicit = r#"{ "notes": [ { "note": "D4", "time": 0.0 } ],
                            "duration": 4.0 }"#;
        assert_eq!(Transcription::from_json(explicit).unwrap().duration, 4.0);

        let empty = r#"{ "notes": [] }"#;
        assert_eq!(Transcription::from_json(empty).unwrap().duration, 0.0);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        // Not JSON at all
        assert!(matches!(
            Transcription::from_json("<html>"),
            Err(PantamError::InvalidResponse(_))
        ));
        // notes missing
        assert!(matches!(
            Transcription::from_json(r#"{ "duration": 4.0 }"#),
            Err(PantamError::InvalidResponse(_))
        ));
        // notes not a sequence
        assert!(matches!(
            Transcription::from_json(r#"{ "notes": "D4 A4" }"#),
            Err(PantamError::InvalidResponse(_))
        ));
        // note entries missing fields
        assert!(matches!(
            Transcription::from_json(r#"{ "notes": [ { "note": "D4" } ] }"#),
            Err(PantamError::InvalidResponse(_))
        ));
    }
}
