//! Word-search board generation.
//!
//! Words are placed onto a rectangular grid along the eight compass directions so that each one
//! can be read in exactly one place, and the leftover cells are then filled with noise letters
//! that never spell a placed word a second time.
//!
//! There are two planners. `random_placement::place_words_random` greedily packs as many words
//! as it can from a `WordSource`, and `backtracking::place_words_backtrack` places an exact word
//! list or reports that it can't be done. Either result can then go through
//! `fill::fill_free_cells_random`.

use instant::Duration;

pub mod backtracking;
pub mod board;
pub mod candidates;
pub mod dictionary;
pub mod duplication;
pub mod errors;
pub mod fill;
pub mod geometry;
pub mod log;
pub mod random_placement;

pub use board::{Board, PlacedWord};
pub use candidates::CandidatePool;
pub use dictionary::{Dictionary, WordSource};
pub use geometry::{Candidate, Direction};

/// Sentinel for a cell that doesn't hold a letter yet.
pub const EMPTY_CELL: char = '\0';

/// Shortest word the driver asks the dictionary for by default.
pub const MIN_WORD_LENGTH: usize = 3;

/// Words must be strictly shorter than this to be loaded. Also the inline capacity for word
/// footprints.
pub const MAX_WORD_LENGTH: usize = 25;

/// Number of consecutive failed attempts before the random planner gives up.
pub const SAFETY_COUNT: usize = 2000;

/// How quickly the random planner lowers its minimum word length as attempts fail.
pub const WORD_LENGTH_DECREMENT_FACTOR: f32 = 0.5;

/// A struct tracking statistics about a placement run.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Words drawn (random planner) or candidates tried (backtracking planner).
    pub attempts: u64,
    pub placements: u64,
    pub backtracks: u64,
    pub duration: Duration,
}

/// A finished placement: the board, the words on it and how we got there.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub board: Board,
    pub words: Vec<PlacedWord>,
    pub statistics: Statistics,
}

impl Puzzle {
    /// The placed words, in placement order.
    pub fn word_strings(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|placed| placed.word.as_str())
    }
}
