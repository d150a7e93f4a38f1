//! # Song View
//!
//! The state behind one displayed song: its text as originally written, every
//! chord found in it, and the key currently selected.
//!
//! ## Baselines
//! A view scans its text exactly once, when it is opened. Each chord keeps the
//! spelling it had at that moment, and every render is computed from those
//! spellings, never from what was rendered last. That is what keeps repeated
//! transpositions from drifting: going +3 then -3 lands on the original text,
//! and +2 followed by +5 renders the same as +7.
//!
//! ## Selecting keys
//! Two kinds of user action are supported and they are deliberately different:
//! - [`SongView::select`] picks an option from the key list. The option's
//!   offset is applied to the baseline, so picking `D` twice on a song in `C`
//!   shows `D` both times.
//! - [`SongView::step_up`] / [`SongView::step_down`] move to the neighbouring
//!   option in the list, one entry at a time, clamping at either end.
//!
//! Opening a different song means building a new view; nothing carries over.
//!
//! ## Example
//! ```rust
//! use chordshift::SongView;
//!
//! let mut view = SongView::open("C  F  G\nla la la", Some("C"));
//! assert_eq!(view.step_up().as_deref(), Some("C#  F#  G#\nla la la"));
//! assert_eq!(view.reset(), "C  F  G\nla la la");
//! ```

use crate::lexer::{scan, ChordOccurrence};
use crate::tonality::{enumerate_targets, Tonality, TonalityOption};
use crate::transpose::{splice, TranspositionRequest};
use log::{debug, warn};

/// Key assumed when a song does not declare one.
pub const DEFAULT_KEY: &str = "C";

#[derive(Debug, Clone)]
pub struct SongView {
    text: String,
    occurrences: Vec<ChordOccurrence>,
    tonality: Option<Tonality>,
    options: Vec<TonalityOption>,
    selected: Option<usize>,
}

impl SongView {
    /// Open a view on `text`. A missing key is taken as C. A key that cannot be
    /// read leaves the view without options; it still renders the text as is.
    pub fn open(text: &str, original_key: Option<&str>) -> Self {
        let key = original_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_KEY);
        let tonality = Tonality::parse(key);
        if tonality.is_none() {
            warn!("Unrecognized song key '{}', transposition disabled", key);
        }
        let options = tonality.as_ref().map(enumerate_targets).unwrap_or_default();
        let selected = options.iter().position(|o| o.is_original);
        let occurrences: Vec<ChordOccurrence> = scan(text).collect();
        debug!(
            "Opened song view: {} chords, key {:?}",
            occurrences.len(),
            tonality.as_ref().map(|t| t.to_string())
        );

        Self {
            text: text.to_string(),
            occurrences,
            tonality,
            options,
            selected,
        }
    }

    /// The text exactly as it was opened.
    pub fn original_text(&self) -> &str {
        &self.text
    }

    pub fn occurrences(&self) -> &[ChordOccurrence] {
        &self.occurrences
    }

    pub fn tonality(&self) -> Option<&Tonality> {
        self.tonality.as_ref()
    }

    pub fn options(&self) -> &[TonalityOption] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&TonalityOption> {
        self.options.get(self.selected?)
    }

    /// Render the baseline text moved by `request`.
    pub fn render(&self, request: TranspositionRequest) -> String {
        if request.is_identity() {
            return self.text.clone();
        }
        debug!(
            "Rendering {} chords by {} semitones (flats: {})",
            self.occurrences.len(),
            request.delta,
            request.prefer_flats
        );
        splice(&self.text, &self.occurrences, request)
    }

    /// Request implied by the selected option (identity when nothing is selected).
    pub fn current_request(&self) -> TranspositionRequest {
        self.selected_option()
            .map(|o| TranspositionRequest::new(o.delta, o.prefer_flats))
            .unwrap_or_default()
    }

    /// Render with the currently selected option.
    pub fn render_current(&self) -> String {
        self.render(self.current_request())
    }

    /// Select the option at `index`. Out of range returns `None` and changes
    /// nothing.
    pub fn select(&mut self, index: usize) -> Option<String> {
        if index >= self.options.len() {
            return None;
        }
        self.selected = Some(index);
        Some(self.render_current())
    }

    /// Select the option whose label is `label`, e.g. `Ebm`.
    pub fn select_by_label(&mut self, label: &str) -> Option<String> {
        let index = self.options.iter().position(|o| o.label == label)?;
        self.select(index)
    }

    /// Move one entry down the key list. `None` when already at the top or
    /// when the view has no options.
    pub fn step_down(&mut self) -> Option<String> {
        let index = self.selected?.checked_sub(1)?;
        self.select(index)
    }

    /// Move one entry up the key list. `None` when already at the bottom.
    pub fn step_up(&mut self) -> Option<String> {
        let index = self.selected? + 1;
        self.select(index)
    }

    /// Back to the original key.
    pub fn reset(&mut self) -> String {
        self.selected = self.options.iter().position(|o| o.is_original);
        self.render_current()
    }

    /// Label to put in a shared link, or `None` when showing the original key.
    pub fn shared_tonality(&self) -> Option<&str> {
        self.selected_option()
            .filter(|o| o.delta != 0)
            .map(|o| o.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SONG: &str = "Intro: C  G/B  Am7  F\nAmazing grace, how sweet\nC      F     C";

    #[test]
    fn test_zero_delta_restores_text() {
        let view = SongView::open(SONG, Some("C"));
        assert_eq!(view.render(TranspositionRequest::new(0, false)), SONG);
        assert_eq!(view.render(TranspositionRequest::new(0, true)), SONG);
    }

    #[test]
    fn test_selection_sequence_matches_single_render() {
        let mut view = SongView::open(SONG, Some("C"));
        let count = view.options().len();
        for first in 0..count {
            for second in 0..count {
                view.select(first).unwrap();
                let rendered = view.select(second).unwrap();

                let target = &view.options()[second];
                let fresh = SongView::open(SONG, Some("C"));
                let expected =
                    fresh.render(TranspositionRequest::new(target.delta, target.prefer_flats));
                assert_eq!(rendered, expected, "{} then {}", first, second);
            }
        }
    }

    #[test]
    fn test_stepping_matches_single_render() {
        let mut view = SongView::open(SONG, Some("Eb"));
        view.select(0).unwrap();
        let fresh = SongView::open(SONG, Some("Eb"));

        let mut index = 0;
        while let Some(rendered) = view.step_up() {
            index += 1;
            let target = &fresh.options()[index];
            let expected =
                fresh.render(TranspositionRequest::new(target.delta, target.prefer_flats));
            assert_eq!(rendered, expected, "up to {}", target.label);
        }
        while let Some(rendered) = view.step_down() {
            index -= 1;
            let target = &fresh.options()[index];
            let expected =
                fresh.render(TranspositionRequest::new(target.delta, target.prefer_flats));
            assert_eq!(rendered, expected, "down to {}", target.label);
        }
        assert_eq!(index, 0);
        assert_eq!(view.reset(), SONG);
    }

    #[test]
    fn test_renders_never_accumulate() {
        let view = SongView::open(SONG, Some("C"));
        let first = view.render(TranspositionRequest::new(2, false));
        let second = view.render(TranspositionRequest::new(2, false));
        assert_eq!(first, second);
        assert!(first.starts_with("Intro: D  A/C#  Bm7  G"));
    }

    #[test]
    fn test_reselecting_same_option_is_stable() {
        let mut view = SongView::open("C F G", Some("C"));
        let d = view.options().iter().position(|o| o.name == "D").unwrap();
        assert_eq!(view.select(d).as_deref(), Some("D G A"));
        assert_eq!(view.select(d).as_deref(), Some("D G A"));
    }

    #[test]
    fn test_steps_move_one_option_at_a_time() {
        let mut view = SongView::open("C F G", Some("C"));
        assert_eq!(view.selected_option().map(|o| o.name), Some("C"));
        assert_eq!(view.step_up().as_deref(), Some("C# F# G#"));
        assert_eq!(view.step_up().as_deref(), Some("Db Gb Ab"));
        assert_eq!(view.step_up().as_deref(), Some("D G A"));
        assert_eq!(view.step_down().as_deref(), Some("Db Gb Ab"));
    }

    #[test]
    fn test_steps_clamp_at_ends() {
        let mut view = SongView::open("C", Some("C"));
        assert_eq!(view.selected_index(), Some(0));
        assert_eq!(view.step_down(), None);
        assert_eq!(view.selected_index(), Some(0));

        let last = view.options().len() - 1;
        assert_eq!(view.select(last).as_deref(), Some("B"));
        assert_eq!(view.step_up(), None);
        assert_eq!(view.selected_index(), Some(last));
    }

    #[test]
    fn test_select_by_label_and_share() {
        let mut view = SongView::open("Am  Dm  E7", Some("Am"));
        assert_eq!(view.shared_tonality(), None);
        assert_eq!(view.select_by_label("Bbm").as_deref(), Some("Bbm  Ebm  F7"));
        assert_eq!(view.shared_tonality(), Some("Bbm"));
        assert_eq!(view.select_by_label("Xm"), None);
        assert_eq!(view.shared_tonality(), Some("Bbm"));
        assert_eq!(view.reset(), "Am  Dm  E7");
        assert_eq!(view.shared_tonality(), None);
    }

    #[test]
    fn test_missing_key_defaults_to_c() {
        let view = SongView::open("G", None);
        assert_eq!(view.tonality().map(|t| t.to_string()), Some("C".to_string()));
        let view = SongView::open("G", Some("  "));
        assert_eq!(view.selected_option().map(|o| o.name), Some("C"));
    }

    #[test]
    fn test_unreadable_key_disables_selection() {
        let mut view = SongView::open("G D", Some("unknown"));
        assert!(view.options().is_empty());
        assert_eq!(view.step_up(), None);
        assert_eq!(view.select(0), None);
        assert_eq!(view.render_current(), "G D");
        assert_eq!(view.reset(), "G D");
        assert_eq!(view.render(TranspositionRequest::new(2, false)), "A E");
    }

    #[test]
    fn test_lyrics_are_byte_identical() {
        let view = SongView::open(SONG, Some("C"));
        let rendered = view.render(TranspositionRequest::new(5, true));
        assert_eq!(
            rendered,
            "Intro: F  C/E  Dm7  Bb\nAmazing grace, how sweet\nF      Bb     F"
        );
    }
}
