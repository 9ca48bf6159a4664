//! Guards against a word being readable in more than one place.
//!
//! The `check_pool` passed around here must be built straight from the board's geometry and
//! never pruned. Pruning only exists to speed up placement, and using a pruned pool here would
//! hide real duplicates.

use crate::board::Board;
use crate::candidates::CandidatePool;
use crate::geometry::Candidate;

/// How many places on the board spell `word`? Stops counting once it sees `limit` matches.
pub fn count_occurrences(board: &Board, word: &str, check_pool: &CandidatePool, limit: usize) -> usize {
    let length = word.chars().count();
    let mut count = 0;

    for candidate in check_pool.for_length(length) {
        if board.check_word(candidate, word) {
            count += 1;
            if count >= limit {
                break;
            }
        }
    }

    count
}

/// Is any of `words` readable more than once on the board?
pub fn is_any_word_duplicated<'a, I>(board: &Board, words: I, check_pool: &CandidatePool) -> bool
    where
        I: IntoIterator<Item = &'a str>
{
    words.into_iter().any(|word| count_occurrences(board, word, check_pool, 2) > 1)
}

/// How many times each of `words` can be read on the board right now, in order.
pub fn occurrence_counts<'a, I>(board: &Board, words: I, check_pool: &CandidatePool) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a str>
{
    words.into_iter().map(|word| count_occurrences(board, word, check_pool, usize::MAX)).collect()
}

/// Can any of `words` be read more often than its entry in `limits` allows?
pub fn exceeds_counts<'a, I>(board: &Board, words: I, limits: &[usize], check_pool: &CandidatePool) -> bool
    where
        I: IntoIterator<Item = &'a str>
{
    words
        .into_iter()
        .zip(limits)
        .any(|(word, &limit)| count_occurrences(board, word, check_pool, limit + 1) > limit)
}

/// Would writing `new_word` at `candidate` make it, or any of the already-placed `words`, appear
/// twice? The check runs against a scratch copy of the board. Returns `true` if the placement is
/// safe.
pub fn verify_duplication<'a, I>(
    board: &Board,
    words: I,
    candidate: &Candidate,
    new_word: &str,
    check_pool: &CandidatePool,
) -> bool
    where
        I: IntoIterator<Item = &'a str>
{
    let mut scratch = board.clone();
    if !scratch.apply_word(candidate, new_word) {
        return false;
    }

    !is_any_word_duplicated(&scratch, [new_word], check_pool) &&
        !is_any_word_duplicated(&scratch, words, check_pool)
}
