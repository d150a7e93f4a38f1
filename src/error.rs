//! # Error Types
//!
//! Errors raised at the ingestion boundary of chordshift.
//!
//! The chord engine itself never fails: scanning, normalizing and transposing
//! are total over arbitrary text, and anything that does not look like a chord
//! is passed through untouched. Errors only appear where a caller hands us
//! structured input that has to be valid (a songbook file, an explicit key,
//! a named song or a target tonality).
//!
//! ## Error Types
//! - `Songbook` - The songbook YAML could not be deserialized
//! - `SongNotFound` - No song with the requested name
//! - `InvalidKey` - A key spelling that does not start with a note name
//! - `UnknownTarget` - A target tonality label that is not offered for the song
//!
//! ## Usage
//! ```rust
//! use chordshift::{ChordError, Songbook};
//!
//! match Songbook::from_yaml("- Name: [not, a, string]") {
//!     Ok(book) => println!("{} songs", book.len()),
//!     Err(ChordError::Songbook(message)) => eprintln!("bad songbook: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordError {
    /// The songbook could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use chordshift::ChordError;
    /// let err = ChordError::Songbook("expected a sequence".to_string());
    /// assert_eq!(err.to_string(), "Invalid songbook: expected a sequence");
    /// ```
    #[error("Invalid songbook: {0}")]
    Songbook(String),

    /// Lookup by name failed.
    ///
    /// # Example
    /// ```
    /// # use chordshift::ChordError;
    /// let err = ChordError::SongNotFound("Amazing Grace".to_string());
    /// assert_eq!(err.to_string(), "Song not found: Amazing Grace");
    /// ```
    #[error("Song not found: {0}")]
    SongNotFound(String),

    /// A key spelling was explicitly required but could not be read.
    ///
    /// # Example
    /// ```
    /// # use chordshift::ChordError;
    /// let err = ChordError::InvalidKey("X#".to_string());
    /// assert_eq!(err.to_string(), "Invalid key: X#");
    /// ```
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The requested target tonality is not one of the offered options.
    #[error("Unknown target tonality '{target}' for a song in {original}")]
    UnknownTarget { target: String, original: String },
}
