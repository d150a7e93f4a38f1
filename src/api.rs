//! # Public API
//!
//! One-shot entry points for callers that do not need to keep a [`SongView`]
//! around.
//!
//! - [`transpose_song()`] - Move every chord by a number of semitones
//! - [`transpose_song_to()`] - Move a song from its declared key to a named target
//! - [`target_keys()`] - The key list for a declared key
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordshift::transpose_song_to;
//!
//! let sheet = "Am   F   C   G\nI walked alone";
//! let moved = transpose_song_to(sheet, Some("Am"), "Bm")?;
//! assert_eq!(moved, "Bm   G   D   A\nI walked alone");
//! # Ok::<(), chordshift::ChordError>(())
//! ```

use crate::{
    enumerate_targets, transpose_text, ChordError, SongView, Tonality, TonalityOption,
    TranspositionRequest,
};

/// Transpose every chord in `text` by `delta` semitones.
///
/// # Example
/// ```rust
/// use chordshift::transpose_song;
///
/// assert_eq!(transpose_song("C  Am\nhello", -3, false), "A  F#m\nhello");
/// ```
pub fn transpose_song(text: &str, delta: i32, prefer_flats: bool) -> String {
    transpose_text(text, TranspositionRequest::new(delta, prefer_flats))
}

/// Transpose `text` from `original_key` (C when absent) to the option labelled
/// `target`, using that option's spelling preference.
///
/// # Errors
/// [`ChordError::InvalidKey`] when `original_key` cannot be read and
/// [`ChordError::UnknownTarget`] when `target` is not one of the offered labels.
pub fn transpose_song_to(
    text: &str,
    original_key: Option<&str>,
    target: &str,
) -> Result<String, ChordError> {
    let mut view = SongView::open(text, original_key);
    let original = match view.tonality() {
        Some(tonality) => tonality.to_string(),
        None => {
            return Err(ChordError::InvalidKey(
                original_key.unwrap_or_default().to_string(),
            ))
        }
    };
    view.select_by_label(target)
        .ok_or_else(|| ChordError::UnknownTarget {
            target: target.to_string(),
            original,
        })
}

/// Key options for a song declared in `original_key`.
pub fn target_keys(original_key: &str) -> Result<Vec<TonalityOption>, ChordError> {
    let tonality: Tonality = original_key.parse()?;
    Ok(enumerate_targets(&tonality))
}
