//! # Pitch Classes
//!
//! The twelve equal-tempered pitch classes and the spellings we accept for them.
//!
//! Internally everything is sharp-leaning ASCII (`C C# D D# E F F# G G# A A# B`).
//! How a pitch class is *displayed* is decided by the caller through a
//! `prefer_flats` flag; the flat alternatives are `Db Eb Gb Ab Bb`.
//!
//! ## Accepted spellings
//! - Letters `A` through `H`, where `H` is the central European name for `B`
//! - At most one accidental, `#` or `b`
//! - Theoretical spellings such as `E#`, `B#`, `Cb`, `Fb` resolve like any other
//!
//! `H` is accepted on input but never produced: output always says `B`.
//!
//! ## Example
//! ```rust
//! use chordshift::pitch::{normalize, PitchClass};
//!
//! assert_eq!(normalize("Cb"), normalize("B"));
//! assert_eq!(normalize("H"), Some(PitchClass::new(11)));
//! assert_eq!(normalize("X"), None);
//! ```

use serde::Serialize;
use std::fmt;

/// Canonical sharp-leaning names, indexed by pitch class.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat display names, indexed by pitch class. Naturals are unchanged.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// A pitch class, 0 = C through 11 = B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Build a pitch class from any semitone count, wrapping into 0..12.
    pub fn new(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Move by a signed number of semitones. Negative deltas wrap upward.
    pub fn transpose(self, delta: i32) -> Self {
        PitchClass::new(self.0 as i32 + delta)
    }

    /// Signed distance from `other` to `self`, in `-11..=11`.
    pub fn semitones_from(self, other: PitchClass) -> i32 {
        self.0 as i32 - other.0 as i32
    }

    /// Display spelling. Only black keys have a flat alternative.
    pub fn spelling(self, prefer_flats: bool) -> &'static str {
        if prefer_flats {
            FLAT_NAMES[self.0 as usize]
        } else {
            SHARP_NAMES[self.0 as usize]
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling(false))
    }
}

/// Semitone offset of a natural root letter from C.
fn letter_semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' | 'H' => Some(11),
        _ => None,
    }
}

/// Resolve a root spelling to its pitch class.
///
/// Returns `None` for anything that is not a single root letter with at most
/// one accidental. A `None` here is the "not a chord" outcome; callers pass the
/// original text through instead of failing.
pub fn normalize(spelling: &str) -> Option<PitchClass> {
    let mut chars = spelling.chars();
    let base = letter_semitone(chars.next()?)?;
    let accidental = match chars.next() {
        None => 0,
        Some('#') => 1,
        Some('b') => -1,
        Some(_) => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some(PitchClass::new(base + accidental))
}

/// Byte length of the root prefix of `text` (`[A-H][#b]?`), or 0 if none.
pub(crate) fn root_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    match bytes.first().copied() {
        Some(b'A'..=b'H') => {}
        _ => return 0,
    }
    match bytes.get(1).copied() {
        Some(b'#') | Some(b'b') => 2,
        _ => 1,
    }
}
