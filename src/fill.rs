//! Filling the cells no word claimed.
//!
//! Each empty cell, in row-major order, gets a random lowercase letter. A letter is only kept if
//! it doesn't make any placed word readable more often than it was before filling (or more than
//! once, for a word that wasn't on the board yet); otherwise the next letter is tried. Boards that
//! already read a word twice, such as a palindrome placed with the duplicate guard off, can still
//! be filled this way. There's no backtracking across cells, so a cell where every letter is bad
//! is reported as an error rather than retried forever.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::candidates::CandidatePool;
use crate::duplication::{exceeds_counts, occurrence_counts};
use crate::errors::FillError;

const NOISE_ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Fill every empty cell of `board` with a noise letter, keeping each of `words` readable exactly
/// as often as it was before (a word that wasn't on the board may show up once).
///
/// # Errors
///
/// `FillError::NoSafeLetter` if some cell can't take any letter. The board is left untouched in
/// that case.
pub fn fill_free_cells_random<S: AsRef<str>, R: Rng + ?Sized>(
    board: &mut Board,
    words: &[S],
    rng: &mut R,
) -> Result<(), FillError> {
    let check_pool = CandidatePool::new(board.rows(), board.cols());
    let limits = occurrence_limits(board, words, &check_pool);
    let mut scratch = board.clone();

    fill_with_limits(&mut scratch, words, &limits, &check_pool, rng)?;

    *board = scratch;
    Ok(())
}

/// Each word may be read as often as it is now, and at least once.
fn occurrence_limits<S: AsRef<str>>(board: &Board, words: &[S], check_pool: &CandidatePool) -> Vec<usize> {
    occurrence_counts(board, words.iter().map(AsRef::as_ref), check_pool)
        .into_iter()
        .map(|count| count.max(1))
        .collect()
}

fn fill_with_limits<S: AsRef<str>, R: Rng + ?Sized>(
    board: &mut Board,
    words: &[S],
    limits: &[usize],
    check_pool: &CandidatePool,
    rng: &mut R,
) -> Result<(), FillError> {
    let empty_cells = board.empty_cells();
    log::debug!("filling {} empty cells", empty_cells.len());

    for coord in empty_cells {
        let mut letters = NOISE_ALPHABET;
        letters.shuffle(rng);

        let safe = letters.into_iter().find(|&letter| {
            board.set(coord, letter);
            !exceeds_counts(&*board, words.iter().map(AsRef::as_ref), limits, check_pool)
        });

        if safe.is_none() {
            let (row, col) = coord;
            return Err(FillError::NoSafeLetter { row, col });
        }
    }

    Ok(())
}

/// Write `message` into the empty cells, in row-major order, and fill whatever is left with
/// noise. Whitespace in the message is skipped and letters are lowercased, so reading the free
/// cells in order spells the message out.
///
/// # Errors
///
/// `FillError::MessageTooLong` if there aren't enough empty cells for the message,
/// `FillError::MessageCreatesDuplicate` if one of its letters makes a placed word appear again,
/// and anything `fill_free_cells_random` can return. On error the board is left untouched.
pub fn fill_free_cells_with_message<S: AsRef<str>, R: Rng + ?Sized>(
    board: &mut Board,
    words: &[S],
    message: &str,
    rng: &mut R,
) -> Result<(), FillError> {
    let letters: Vec<char> = message
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let empty_cells = board.empty_cells();
    if letters.len() > empty_cells.len() {
        return Err(FillError::MessageTooLong { needed: letters.len(), available: empty_cells.len() });
    }

    let check_pool = CandidatePool::new(board.rows(), board.cols());
    let limits = occurrence_limits(board, words, &check_pool);
    let mut scratch = board.clone();

    for (&letter, coord) in letters.iter().zip(empty_cells) {
        scratch.set(coord, letter);
        if exceeds_counts(&scratch, words.iter().map(AsRef::as_ref), &limits, &check_pool) {
            let (row, col) = coord;
            return Err(FillError::MessageCreatesDuplicate { letter, row, col });
        }
    }

    fill_with_limits(&mut scratch, words, &limits, &check_pool, rng)?;

    *board = scratch;
    Ok(())
}
