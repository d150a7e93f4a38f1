//! # Transposition
//!
//! Moves chord roots by a signed number of semitones and respells them.
//!
//! ## Rules
//! - Slash chords are split on every `/` and each side is moved by the same
//!   interval with the same spelling preference. The bass follows the flats
//!   choice too, so `F/C` up one with flats is `Gb/Db`, never a mixed `Gb/C#`
//! - The root is `[A-H][#b]?`; everything after it is reattached unchanged
//! - Output uses sharp names unless flats are preferred and a flat name exists
//! - `H` is read as `B` and written as `B`
//! - A side whose root does not normalize is returned as written, so one bad
//!   side of a slash chord never spoils the other
//! - A delta that is a multiple of 12 returns the input unchanged, byte for byte
//!
//! ## Example
//! ```rust
//! use chordshift::transpose::transpose;
//!
//! assert_eq!(transpose("Am7", 3, false), "Cm7");
//! assert_eq!(transpose("G/B", -2, true), "F/A");
//! assert_eq!(transpose("D/F#", 2, false), "E/G#");
//! ```

use crate::chord::ChordSymbol;
use crate::lexer::{scan, ChordOccurrence};
use serde::{Deserialize, Serialize};

/// One request to re-render a text in another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranspositionRequest {
    /// Signed semitones relative to the original text.
    pub delta: i32,
    pub prefer_flats: bool,
}

impl TranspositionRequest {
    pub fn new(delta: i32, prefer_flats: bool) -> Self {
        Self {
            delta,
            prefer_flats,
        }
    }

    /// True when the request would not move any pitch.
    pub fn is_identity(&self) -> bool {
        self.delta.rem_euclid(12) == 0
    }
}

/// Transpose one chord symbol.
pub fn transpose(symbol: &str, delta: i32, prefer_flats: bool) -> String {
    if delta.rem_euclid(12) == 0 {
        return symbol.to_string();
    }
    symbol
        .split('/')
        .map(|side| transpose_side(side, delta, prefer_flats))
        .collect::<Vec<_>>()
        .join("/")
}

fn transpose_side(side: &str, delta: i32, prefer_flats: bool) -> String {
    match ChordSymbol::parse(side) {
        Some(chord) => chord.transpose(delta, prefer_flats).to_string(),
        None => side.to_string(),
    }
}

/// Transpose every chord found in `text`, copying everything else verbatim.
pub fn transpose_text(text: &str, request: TranspositionRequest) -> String {
    if request.is_identity() {
        return text.to_string();
    }
    let occurrences: Vec<ChordOccurrence> = scan(text).collect();
    splice(text, &occurrences, request)
}

/// Rebuild `text` with each occurrence replaced by its transposition.
/// `occurrences` must come from scanning `text`.
pub(crate) fn splice(
    text: &str,
    occurrences: &[ChordOccurrence],
    request: TranspositionRequest,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    for occurrence in occurrences {
        output.push_str(&text[copied..occurrence.start]);
        output.push_str(&transpose(
            &occurrence.text,
            request.delta,
            request.prefer_flats,
        ));
        copied = occurrence.end();
    }
    output.push_str(&text[copied..]);
    output
}
