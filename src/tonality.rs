//! # Tonality Selector
//!
//! Turns a song's declared key into the list of keys it can be moved to.
//!
//! ## Display order
//! Options follow a fixed order, not semitone distance:
//! `C C# Db D D# Eb E F F# Gb G G# Ab A A# Bb B`.
//! Both spellings of each black key are offered since they render the song
//! differently (sharps vs flats). `H` is never offered.
//!
//! ## Offsets
//! Each option carries the signed semitone offset from the original key,
//! wrapped into `-6..=6` so the song moves the short way round. At the
//! tritone both directions are equally short; we always go up (`+6`).
//!
//! ## The original option
//! Exactly one option has offset 0 and it is flagged `is_original`. It is the
//! option spelled like the declared key; the enharmonic twin of the declared key
//! (e.g. `Db` for a song in `C#`) is left out. Keys spelled in a way the list
//! does not use (`H`, `Cb`, `E#`, ...) are represented by the first matching
//! display name.
//!
//! ## Flats
//! Whether an option renders with flats depends only on its name: flat names,
//! plus `F`, which is conventionally written with flats.
//!
//! ## Example
//! ```rust
//! use chordshift::tonality::{enumerate_targets, Tonality};
//!
//! let key = Tonality::parse("G").unwrap();
//! let options = enumerate_targets(&key);
//! let original = options.iter().find(|o| o.is_original).unwrap();
//! assert_eq!(original.label, "G");
//! assert_eq!(original.delta, 0);
//! ```

use crate::error::ChordError;
use crate::pitch::{normalize, root_len, PitchClass};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Fixed order in which target keys are offered.
pub const DISPLAY_ORDER: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];

/// Names that are always rendered with flats, besides the ones spelled with `b`.
const FLAT_NATURALS: [&str; 5] = ["F", "Bb", "Eb", "Ab", "Db"];

/// A declared key: root plus whatever follows it (`m` in `Am`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tonality {
    pub root: PitchClass,
    pub root_spelling: String,
    pub suffix: String,
}

impl Tonality {
    /// Read a key such as `G`, `Am`, `F#m` or `Hm`.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        let split = root_len(key);
        let root = normalize(&key[..split])?;
        Some(Tonality {
            root,
            root_spelling: key[..split].to_string(),
            suffix: key[split..].to_string(),
        })
    }
}

impl FromStr for Tonality {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tonality::parse(s).ok_or_else(|| ChordError::InvalidKey(s.to_string()))
    }
}

impl fmt::Display for Tonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root_spelling, self.suffix)
    }
}

/// One entry of the key selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TonalityOption {
    /// Root display name from [`DISPLAY_ORDER`].
    pub name: &'static str,
    /// Name plus the key suffix, e.g. `C#m`. Used as the shareable value.
    pub label: String,
    /// Semitones from the original key, in `-6..=6`.
    pub delta: i32,
    pub prefer_flats: bool,
    pub is_original: bool,
}

impl TonalityOption {
    /// Text for a choice control, marking the original key.
    pub fn display(&self) -> String {
        if self.is_original {
            format!("{} (Original)", self.label)
        } else {
            self.label.clone()
        }
    }
}

/// Whether a display name renders its transpositions with flats.
pub fn prefers_flats(name: &str) -> bool {
    name.contains('b') || FLAT_NATURALS.contains(&name)
}

/// Wrap a raw difference in `-11..=11` into `-5..=6`.
fn shortest_steps(raw: i32) -> i32 {
    let steps = raw.rem_euclid(12);
    if steps > 6 {
        steps - 12
    } else {
        steps
    }
}

/// List every target key for a song in `original`, in display order.
pub fn enumerate_targets(original: &Tonality) -> Vec<TonalityOption> {
    let own_spelling = DISPLAY_ORDER
        .iter()
        .copied()
        .find(|name| *name == original.root_spelling)
        .or_else(|| {
            DISPLAY_ORDER
                .iter()
                .copied()
                .find(|name| normalize(name) == Some(original.root))
        });

    DISPLAY_ORDER
        .iter()
        .copied()
        .filter_map(|name| {
            let pitch = normalize(name)?;
            let delta = shortest_steps(pitch.semitones_from(original.root));
            let is_original = Some(name) == own_spelling;
            if delta == 0 && !is_original {
                return None;
            }
            Some(TonalityOption {
                name,
                label: format!("{}{}", name, original.suffix),
                delta,
                prefer_flats: prefers_flats(name),
                is_original,
            })
        })
        .collect()
}
