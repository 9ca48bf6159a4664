use std::fmt::{Display, Formatter};

use bit_set::BitSet;
use smallvec::SmallVec;

use crate::geometry::{Candidate, GridCoord};
use crate::{EMPTY_CELL, MAX_WORD_LENGTH};

/// Flat cell offsets (row-major) covered by a word.
pub type Footprint = SmallVec<[usize; MAX_WORD_LENGTH]>;

/// Each covered offset paired with the letter a word puts there.
type LetterCells = SmallVec<[(usize, char); MAX_WORD_LENGTH]>;

/// A word that has been committed to the board, with enough provenance to find it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub candidate: Candidate,
    pub length: usize,
}

impl PlacedWord {
    pub fn new(word: &str, candidate: Candidate) -> PlacedWord {
        PlacedWord { word: word.to_string(), candidate, length: word.chars().count() }
    }
}

impl AsRef<str> for PlacedWord {
    fn as_ref(&self) -> &str {
        &self.word
    }
}

/// A rectangular grid of letters. Empty cells hold `EMPTY_CELL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Board {
        Board { rows, cols, cells: vec![EMPTY_CELL; rows * cols] }
    }

    /// Build a board from one string per row, with `.` standing for an empty cell. Rows shorter
    /// than the longest one are padded with empty cells.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Board {
        let cols = rows.iter().map(|row| row.as_ref().chars().count()).max().unwrap_or(0);
        let mut board = Board::new(rows.len(), cols);

        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, letter) in row.as_ref().chars().enumerate() {
                if letter != '.' {
                    board.set((row_idx, col_idx), letter);
                }
            }
        }

        board
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, (row, col): GridCoord) -> char {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, (row, col): GridCoord, letter: char) {
        self.cells[row * self.cols + col] = letter;
    }

    pub fn is_empty_at(&self, coord: GridCoord) -> bool {
        self.get(coord) == EMPTY_CELL
    }

    /// Number of empty cells on the whole board.
    pub fn free_cells_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == EMPTY_CELL).count()
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<GridCoord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == EMPTY_CELL)
            .map(|(offset, _)| (offset / self.cols, offset % self.cols))
            .collect()
    }

    /// The cells a word of `length` would cover starting at `candidate`, or `None` if any of them
    /// fall off the board.
    pub fn footprint(&self, candidate: &Candidate, length: usize) -> Option<Footprint> {
        (0..length)
            .map(|index| {
                let (row, col) = candidate.cell_at(index);
                if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
                    None
                } else {
                    Some(row as usize * self.cols + col as usize)
                }
            })
            .collect()
    }

    /// Pair each covered cell with the word's letter that would go there.
    fn walk(&self, candidate: &Candidate, word: &str) -> Option<LetterCells> {
        let length = word.chars().count();
        let footprint = self.footprint(candidate, length)?;
        Some(footprint.into_iter().zip(word.chars()).collect())
    }

    /// Can `word` go at `candidate` without clobbering a different letter?
    pub fn verify_word(&self, candidate: &Candidate, word: &str) -> bool {
        match self.walk(candidate, word) {
            Some(cells) => cells.iter().all(|&(offset, letter)| {
                self.cells[offset] == EMPTY_CELL || self.cells[offset] == letter
            }),
            None => false,
        }
    }

    /// Write `word` at `candidate`. Returns `false` (and writes nothing) if the word would run off
    /// the board. Letters aren't checked here; call `verify_word` first.
    pub fn apply_word(&mut self, candidate: &Candidate, word: &str) -> bool {
        let Some(cells) = self.walk(candidate, word) else {
            return false;
        };

        for (offset, letter) in cells {
            self.cells[offset] = letter;
        }
        true
    }

    /// Write `word` at `candidate`, filling only cells that were empty, and return the set of
    /// word indices that were newly written. Cells that already held the right letter (because a
    /// crossing word put it there) aren't recorded, so undoing this word leaves them alone.
    pub fn apply_word_indices(&mut self, candidate: &Candidate, word: &str) -> Option<BitSet> {
        let cells = self.walk(candidate, word)?;
        let mut written = BitSet::with_capacity(cells.len());

        for (index, (offset, letter)) in cells.into_iter().enumerate() {
            if self.cells[offset] == EMPTY_CELL {
                self.cells[offset] = letter;
                written.insert(index);
            }
        }

        Some(written)
    }

    /// Undo `apply_word_indices`: clear exactly the recorded indices of the word's footprint.
    pub fn unapply_word_indices(&mut self, candidate: &Candidate, word: &str, written: &BitSet) {
        let Some(footprint) = self.footprint(candidate, word.chars().count()) else {
            return;
        };

        for index in written {
            if let Some(&offset) = footprint.get(index) {
                self.cells[offset] = EMPTY_CELL;
            }
        }
    }

    /// How many currently-empty cells would `word` fill at `candidate`?
    pub fn count_empty_cells(&self, candidate: &Candidate, word: &str) -> usize {
        match self.footprint(candidate, word.chars().count()) {
            Some(footprint) => {
                footprint.iter().filter(|&&offset| self.cells[offset] == EMPTY_CELL).count()
            }
            None => 0,
        }
    }

    /// Does the board already spell `word` at `candidate`?
    pub fn check_word(&self, candidate: &Candidate, word: &str) -> bool {
        match self.walk(candidate, word) {
            Some(cells) => cells.iter().all(|&(offset, letter)| self.cells[offset] == letter),
            None => false,
        }
    }
}

/// Render the board the way the driver prints it: each cell right-justified in a four-character
/// field, `.` for empty cells, one line per row and a trailing blank line.
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.get((row, col));
                let shown = if cell == EMPTY_CELL { '.' } else { cell };
                write!(f, "{:>4}", shown)?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
