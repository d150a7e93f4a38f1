//! # Chord Scanner
//!
//! Finds chord symbols in free-form lyric text without any markup.
//!
//! The text is split into whitespace-delimited words; a word is a chord only if
//! the *whole* word matches the chord grammar:
//!
//! ```text
//! chord   := side ( "/" side )*
//! side    := root quality*
//! root    := [A-H] [#b]?
//! quality := m | maj | dim | aug | sus[0-9]? | 2 | 4 | 5 | 6 | 7 | 8 | 9 | 11 | 13
//! ```
//!
//! So `Alone`, `Am,` and `Gm7)` are lyrics, and so is `F#m7b5` (`b5` is outside
//! the vocabulary). A lone capital `A` used as an article is indistinguishable
//! from an A major chord and is reported as one.
//!
//! The scanner never copies or rewrites the input; it only reports where the
//! chords are. Everything between occurrences belongs to the caller verbatim.
//!
//! ## Example
//! ```rust
//! use chordshift::lexer::scan;
//!
//! let found: Vec<_> = scan("G  D  Em C\nAmazing grace").map(|o| o.text).collect();
//! assert_eq!(found, vec!["G", "D", "Em", "C"]);
//! ```

use crate::pitch::root_len;
use serde::Serialize;

/// Quality markers that may follow a root, in any order and any number.
/// `sus` is handled separately because it takes an optional digit.
const QUALITY_MARKERS: [&str; 13] = [
    "maj", "dim", "aug", "m", "11", "13", "2", "4", "5", "6", "7", "8", "9",
];

/// A chord found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordOccurrence {
    /// Byte offset of the first character of the chord.
    pub start: usize,
    /// Byte length of the chord.
    pub len: usize,
    /// The chord exactly as written.
    pub text: String,
}

impl ChordOccurrence {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Lazy iterator over the chords of a text, left to right.
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Next whitespace-delimited word at or after the current position.
    fn next_word(&mut self) -> Option<(usize, &'a str)> {
        let rest = &self.input[self.position..];
        let skipped = rest.find(|c: char| !c.is_whitespace())?;
        let start = self.position + skipped;
        let word_len = self.input[start..]
            .find(char::is_whitespace)
            .unwrap_or(self.input.len() - start);
        self.position = start + word_len;
        Some((start, &self.input[start..start + word_len]))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ChordOccurrence;

    fn next(&mut self) -> Option<ChordOccurrence> {
        while let Some((start, word)) = self.next_word() {
            if is_chord(word) {
                log::trace!("chord '{}' at byte {}", word, start);
                return Some(ChordOccurrence {
                    start,
                    len: word.len(),
                    text: word.to_string(),
                });
            }
        }
        None
    }
}

/// Scan `text` for chord symbols.
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner::new(text)
}

/// Whether a single word, in its entirety, is a chord symbol.
pub fn is_chord(word: &str) -> bool {
    !word.is_empty() && word.split('/').all(is_chord_side)
}

fn is_chord_side(side: &str) -> bool {
    let root = root_len(side);
    root > 0 && is_quality_run(&side[root..])
}

/// Whether `s` can be segmented entirely into quality markers.
///
/// Walks byte offsets once, marking every offset some segmentation can reach,
/// so ambiguous runs like `sus4sus4...` stay linear.
fn is_quality_run(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut reachable = vec![false; bytes.len() + 1];
    reachable[0] = true;
    for at in 0..bytes.len() {
        if !reachable[at] {
            continue;
        }
        let rest = &bytes[at..];
        if rest.starts_with(b"sus") {
            reachable[at + 3] = true;
            if rest.get(3).map_or(false, u8::is_ascii_digit) {
                reachable[at + 4] = true;
            }
        }
        for marker in QUALITY_MARKERS {
            if rest.starts_with(marker.as_bytes()) {
                reachable[at + marker.len()] = true;
            }
        }
    }
    reachable[bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        scan(text).map(|o| o.text).collect()
    }

    #[test]
    fn test_verse_offsets() {
        let text = "Verse:\nG  D  Em C\nLyrics here";
        let found: Vec<ChordOccurrence> = scan(text).collect();
        assert_eq!(found.len(), 4);

        let starts: Vec<usize> = found.iter().map(|o| o.start).collect();
        assert_eq!(starts, vec![7, 10, 13, 16]);
        assert_eq!(found[2].text, "Em");
        assert_eq!(found[2].len, 2);

        // Everything outside the occurrences is untouched text
        assert_eq!(&text[..found[0].start], "Verse:\n");
        assert_eq!(&text[found[0].end()..found[1].start], "  ");
        assert_eq!(&text[found[3].end()..], "\nLyrics here");
    }

    #[test]
    fn test_quality_vocabulary() {
        for chord in [
            "C", "Cm", "Cmaj", "Cmaj7", "Cm7", "Cdim", "Cdim7", "Caug", "Csus", "Csus4",
            "Csus2", "C9", "C11", "C13", "Cm9", "Cadd9x", "C7sus4", "Cmmaj7",
        ] {
            let expected = chord != "Cadd9x";
            assert_eq!(is_chord(chord), expected, "{}", chord);
        }
    }

    #[test]
    fn test_rejects_partial_words() {
        assert!(words("Alone again").is_empty());
        assert!(words("Am, I dreaming").is_empty());
        assert!(words("(Am) Bbm7b5 C10 C3 Cmin").is_empty());
        assert!(words("Eb-").is_empty());
    }

    #[test]
    fn test_single_letter_word_is_a_chord() {
        assert_eq!(words("A song for you"), vec!["A"]);
    }

    #[test]
    fn test_slash_chords() {
        assert!(is_chord("D/F#"));
        assert!(is_chord("Am7/G"));
        assert!(is_chord("C/E/G"));
        assert!(is_chord("H/F#"));
        assert!(!is_chord("D/"));
        assert!(!is_chord("/F#"));
        assert!(!is_chord("D//F#"));
        assert!(!is_chord("D/x"));
    }

    #[test]
    fn test_h_root_accepted() {
        assert_eq!(words("Hm E"), vec!["Hm", "E"]);
    }

    #[test]
    fn test_edges_and_unicode_whitespace() {
        assert_eq!(words("G"), vec!["G"]);
        assert_eq!(words(""), Vec::<String>::new());
        assert_eq!(words("   "), Vec::<String>::new());

        let text = "Ж\u{00A0}C\u{2003}G\tслова";
        let found: Vec<ChordOccurrence> = scan(text).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(&text[found[0].start..found[0].end()], "C");
        assert_eq!(&text[found[1].start..found[1].end()], "G");
    }

    #[test]
    fn test_long_ambiguous_words_are_linear() {
        let chord = format!("C{}", "sus4".repeat(500));
        let lyric = format!("{}x", chord);
        assert!(is_chord(&chord));
        assert!(!is_chord(&lyric));

        let text = format!("{} G {}", lyric, lyric);
        assert_eq!(words(&text), vec!["G"]);
    }

    #[test]
    fn test_scan_is_stateless() {
        let text = "C G Am F";
        assert_eq!(words(text), words(text));
        let mut scanner = scan(text);
        assert_eq!(scanner.next().map(|o| o.text), Some("C".to_string()));
        assert_eq!(scan(text).count(), 4);
    }
}
