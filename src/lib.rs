pub mod api;
pub mod chord;
pub mod error;
pub mod lexer;
pub mod pitch;
pub mod song;
pub mod tonality;
pub mod transpose;
pub mod view;

pub use api::{target_keys, transpose_song, transpose_song_to};
pub use chord::ChordSymbol;
pub use error::*;
pub use lexer::{is_chord, scan, ChordOccurrence, Scanner};
pub use pitch::{normalize, PitchClass};
pub use song::{Song, Songbook};
pub use tonality::{enumerate_targets, Tonality, TonalityOption};
pub use transpose::{transpose, transpose_text, TranspositionRequest};
pub use view::SongView;
