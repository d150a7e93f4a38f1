//! # Songs and Songbooks
//!
//! Typed song records, read from a YAML songbook whose column names match the
//! shared spreadsheet the songs usually live in:
//!
//! ```yaml
//! - Name: Amazing Grace
//!   Tonality: G
//!   BPM: 72
//!   Language: English
//!   GroupBy: Hymns
//!   Favorites: true
//!   Text: |
//!     G        C      G
//!     Amazing grace, how sweet the sound
//! ```
//!
//! Every column is optional. Rows without a name cannot be listed and are
//! dropped. The book is ordered by name, ignoring case, with favorites first.

use crate::error::ChordError;
use crate::view::SongView;
use log::debug;
use serde::Deserialize;

/// Raw row as it appears in the songbook file.
#[derive(Deserialize, Debug, Default)]
struct RawSong {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "Tonality")]
    tonality: Option<String>,
    // Spreadsheets hand this over as either a number or a string
    #[serde(rename = "BPM")]
    bpm: Option<serde_yaml::Value>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "GroupBy")]
    group_by: Option<String>,
    // Only a real `true` marks a favorite; "TRUE", "yes" and friends do not
    #[serde(rename = "Favorites")]
    favorites: Option<serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Song {
    pub name: String,
    pub text: Option<String>,
    pub tonality: Option<String>,
    pub bpm: Option<u32>,
    pub language: Option<String>,
    pub group_by: Option<String>,
    pub favorite: bool,
}

impl Song {
    /// Open a view on this song's text in its declared key.
    pub fn view(&self) -> SongView {
        SongView::open(self.text.as_deref().unwrap_or_default(), self.tonality.as_deref())
    }

    /// `None` for rows without a usable name.
    fn from_raw(raw: RawSong) -> Option<Self> {
        let name = non_empty(raw.name)?;
        Some(Song {
            name,
            text: non_empty(raw.text),
            tonality: non_empty(raw.tonality),
            bpm: raw.bpm.as_ref().and_then(parse_bpm),
            language: non_empty(raw.language),
            group_by: non_empty(raw.group_by),
            favorite: matches!(raw.favorites, Some(serde_yaml::Value::Bool(true))),
        })
    }
}

fn parse_bpm(value: &serde_yaml::Value) -> Option<u32> {
    match value {
        serde_yaml::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_yaml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct Songbook {
    songs: Vec<Song>,
}

impl Songbook {
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        let raw: Vec<RawSong> =
            serde_yaml::from_str(content).map_err(|e| ChordError::Songbook(e.to_string()))?;
        let total = raw.len();
        let mut songs: Vec<Song> = raw
            .into_iter()
            .filter_map(Song::from_raw)
            .collect();
        songs.sort_by_cached_key(|song| (!song.favorite, song.name.to_lowercase()));
        debug!("Loaded {} songs ({} unnamed rows dropped)", songs.len(), total - songs.len());
        Ok(Self { songs })
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn find(&self, name: &str) -> Result<&Song, ChordError> {
        self.songs
            .iter()
            .find(|song| song.name == name)
            .ok_or_else(|| ChordError::SongNotFound(name.to_string()))
    }
}
