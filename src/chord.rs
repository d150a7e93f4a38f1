//! Structured chord symbols: a root, an opaque quality suffix, and an optional
//! bass chord after a `/`.

use crate::pitch::{normalize, root_len, PitchClass};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordSymbol {
    pub root: PitchClass,
    /// Root as written (`Bb`, `A#`, `H`, ...).
    pub root_spelling: String,
    /// Everything after the root, kept byte-for-byte.
    pub suffix: String,
    pub bass: Option<Box<ChordSymbol>>,
}

impl ChordSymbol {
    /// Parse `Am7`, `D/F#`, `C/E/G`. Every `/`-separated side needs a root that
    /// normalizes; the suffix is not inspected.
    pub fn parse(text: &str) -> Option<Self> {
        let (head, bass) = match text.split_once('/') {
            Some((head, rest)) => (head, Some(Box::new(ChordSymbol::parse(rest)?))),
            None => (text, None),
        };
        let split = root_len(head);
        let root = normalize(&head[..split])?;
        Some(ChordSymbol {
            root,
            root_spelling: head[..split].to_string(),
            suffix: head[split..].to_string(),
            bass,
        })
    }

    pub fn is_slash(&self) -> bool {
        self.bass.is_some()
    }

    /// The same chord moved by `delta` semitones. Roots are respelled (sharp
    /// by default, flat when asked and available); suffixes are untouched.
    pub fn transpose(&self, delta: i32, prefer_flats: bool) -> ChordSymbol {
        let root = self.root.transpose(delta);
        ChordSymbol {
            root,
            root_spelling: root.spelling(prefer_flats).to_string(),
            suffix: self.suffix.clone(),
            bass: self
                .bass
                .as_ref()
                .map(|bass| Box::new(bass.transpose(delta, prefer_flats))),
        }
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root_spelling, self.suffix)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let chord = ChordSymbol::parse("Bbm7").unwrap();
        assert_eq!(chord.root, PitchClass::new(10));
        assert_eq!(chord.root_spelling, "Bb");
        assert_eq!(chord.suffix, "m7");
        assert!(!chord.is_slash());
        assert_eq!(chord.to_string(), "Bbm7");
    }

    #[test]
    fn test_parse_slash_chain() {
        let chord = ChordSymbol::parse("C/E/G").unwrap();
        let e = chord.bass.as_ref().unwrap();
        let g = e.bass.as_ref().unwrap();
        assert_eq!(e.root, PitchClass::new(4));
        assert_eq!(g.root, PitchClass::new(7));
        assert!(g.bass.is_none());
        assert_eq!(chord.to_string(), "C/E/G");
    }

    #[test]
    fn test_parse_rejects_bad_roots() {
        assert!(ChordSymbol::parse("").is_none());
        assert!(ChordSymbol::parse("xyz").is_none());
        assert!(ChordSymbol::parse("D/").is_none());
        assert!(ChordSymbol::parse("D/q").is_none());
    }

    #[test]
    fn test_suffix_is_opaque() {
        let chord = ChordSymbol::parse("Gwhatever(9)").unwrap();
        assert_eq!(chord.suffix, "whatever(9)");
        assert_eq!(chord.transpose(2, false).to_string(), "Awhatever(9)");
    }

    #[test]
    fn test_transpose_slash_sides_independently() {
        let chord = ChordSymbol::parse("D/F#").unwrap();
        assert_eq!(chord.transpose(2, false).to_string(), "E/G#");
        assert_eq!(chord.transpose(1, true).to_string(), "Eb/G");
    }

    #[test]
    fn test_h_is_respelled_as_b() {
        let chord = ChordSymbol::parse("Hm").unwrap();
        assert_eq!(chord.transpose(12, false).to_string(), "Bm");
    }
}
