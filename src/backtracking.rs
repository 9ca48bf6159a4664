//! Exact placement of a fixed word list by depth-first search.
//!
//! Each level of the search owns one word. It walks the directions in a fresh random order and,
//! within each direction, the candidates for that word's length. A usable candidate is written
//! with index tracking, the candidate pool is copied and pruned for the next level, and we
//! recurse. If the deeper levels fail we erase exactly the cells this word wrote and keep
//! scanning; letters shared with an earlier word stay put.
//!
//! The worst case is exponential in the number of words, so this is for short lists and small
//! boards. `random_placement` is the planner to use for real puzzles.

use instant::Instant;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, PlacedWord};
use crate::candidates::CandidatePool;
use crate::duplication::verify_duplication;
use crate::geometry::Direction;
use crate::{Puzzle, Statistics};

#[derive(Debug, Clone)]
pub struct BacktrackConfig {
    /// Reject placements that would make any placed word readable twice. This dominates the
    /// running time on larger boards; turning it off can produce boards where a word appears
    /// more than once.
    pub verify_duplication: bool,
}

impl Default for BacktrackConfig {
    fn default() -> BacktrackConfig {
        BacktrackConfig { verify_duplication: true }
    }
}

/// Search state shared by every level of the recursion.
struct Search<'a> {
    words: Vec<&'a str>,
    verify_duplication: bool,
    check_pool: CandidatePool,
    board: Board,
    placements: Vec<PlacedWord>,
    statistics: Statistics,
}

impl<'a> Search<'a> {
    /// Place `words[word_idx..]` using the candidates left in `pool`. On failure the board is
    /// exactly as it was on entry.
    fn place_from<R: Rng + ?Sized>(&mut self, word_idx: usize, pool: &CandidatePool, rng: &mut R) -> bool {
        let Some(&word) = self.words.get(word_idx) else {
            return true;
        };
        let length = word.chars().count();

        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        for direction in directions {
            for candidate in pool.bucket(direction, length) {
                self.statistics.attempts += 1;

                if !self.board.verify_word(candidate, word) || self.board.count_empty_cells(candidate, word) == 0 {
                    continue;
                }

                if self.verify_duplication && !verify_duplication(
                    &self.board,
                    self.placements.iter().map(|placed| placed.word.as_str()),
                    candidate,
                    word,
                    &self.check_pool,
                ) {
                    continue;
                }

                let Some(written) = self.board.apply_word_indices(candidate, word) else {
                    continue;
                };

                // Siblings at this level keep scanning the unpruned pool.
                let mut next_pool = pool.clone();
                next_pool.remove_intercepting(candidate, length);
                self.placements.push(PlacedWord::new(word, *candidate));

                if self.place_from(word_idx + 1, &next_pool, rng) {
                    return true;
                }

                self.placements.pop();
                self.board.unapply_word_indices(candidate, word, &written);
                self.statistics.backtracks += 1;
            }
        }

        false
    }
}

/// Place every word of `words`, in order, on a `rows` x `cols` board. Returns `None` if there's
/// no way to do it. The first arrangement found wins; it isn't optimal in any sense.
pub fn place_words_backtrack<S: AsRef<str>, R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    words: &[S],
    config: &BacktrackConfig,
    rng: &mut R,
) -> Option<Puzzle> {
    let start = Instant::now();
    let pool = CandidatePool::shuffled(rows, cols, rng);

    let mut search = Search {
        words: words.iter().map(AsRef::as_ref).collect(),
        verify_duplication: config.verify_duplication,
        check_pool: CandidatePool::new(rows, cols),
        board: Board::new(rows, cols),
        placements: Vec::with_capacity(words.len()),
        statistics: Statistics::default(),
    };

    let found = search.place_from(0, &pool, rng);
    search.statistics.duration = start.elapsed();

    if !found {
        log::debug!("no arrangement of {:?} fits a {}x{} board: {:?}", search.words, rows, cols, search.statistics);
        return None;
    }

    search.statistics.placements = search.placements.len() as u64;
    log::info!(
        "Placed {} words on a {}x{} board after {} backtracks in {:?}",
        search.placements.len(),
        rows,
        cols,
        search.statistics.backtracks,
        search.statistics.duration,
    );

    Some(Puzzle { board: search.board, words: search.placements, statistics: search.statistics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplication::is_any_word_duplicated;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cat_and_dog_on_6x6() {
        let mut rng = StdRng::seed_from_u64(11);

        let puzzle = place_words_backtrack(6, 6, &["cat", "dog"], &BacktrackConfig::default(), &mut rng)
            .expect("cat and dog fit on an empty 6x6 board");

        assert_eq!(puzzle.words.len(), 2);
        assert_eq!(puzzle.words[0].word, "cat");
        assert_eq!(puzzle.words[1].word, "dog");
        for placed in &puzzle.words {
            assert!(puzzle.board.check_word(&placed.candidate, &placed.word));
        }

        // No shared letters, so everything else is still empty.
        assert_eq!(puzzle.board.free_cells_count(), 36 - 6);

        let check_pool = CandidatePool::new(6, 6);
        assert!(!is_any_word_duplicated(&puzzle.board, puzzle.word_strings(), &check_pool));
    }

    #[test]
    fn test_words_longer_than_any_line_are_impossible() {
        let mut rng = StdRng::seed_from_u64(1);

        let puzzle = place_words_backtrack(4, 4, &["abcde", "fghij"], &BacktrackConfig::default(), &mut rng);

        assert!(puzzle.is_none());
    }

    #[test]
    fn test_conflicting_words_on_a_single_row_are_impossible() {
        let mut rng = StdRng::seed_from_u64(2);

        let puzzle = place_words_backtrack(1, 3, &["abc", "def"], &BacktrackConfig::default(), &mut rng);

        assert!(puzzle.is_none());
    }

    #[test]
    fn test_palindrome_fills_a_single_row_without_the_guard() {
        // Forwards and backwards both produce the same board, and there's nowhere else to go.
        let config = BacktrackConfig { verify_duplication: false };

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let puzzle = place_words_backtrack(1, 4, &["abba"], &config, &mut rng).unwrap();

            assert_eq!(puzzle.board, Board::from_rows(&["abba"]));
        }
    }

    /// The eight rotations and reflections of a square board given as rows.
    fn square_symmetries(rows: &[&str]) -> Vec<Board> {
        let mut current: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        let n = current.len();
        let mut images = Vec::with_capacity(8);

        for _ in 0..4 {
            current = (0..n).map(|r| (0..n).map(|c| current[n - 1 - c][r]).collect()).collect();
            let mirrored: Vec<Vec<char>> = current.iter().map(|row| row.iter().rev().copied().collect()).collect();

            for image in [&current, &mirrored] {
                let image_rows: Vec<String> = image.iter().map(|row| row.iter().collect()).collect();
                images.push(Board::from_rows(&image_rows));
            }
        }

        images
    }

    #[test]
    fn test_unique_arrangement_on_4x4_up_to_symmetry() {
        // These five words fit together in exactly one way. Every rotation or reflection of a
        // valid board is valid too, so that's as unique as a word search can get.
        let words = ["bcyl", "bfzs", "bjnt", "yinw", "cjvm"];
        let expected = square_symmetries(&["bfzs", "cjvm", "yinw", "l..t"]);

        let mut seen = Vec::new();
        for seed in 0..12 {
            let mut rng = StdRng::seed_from_u64(seed);
            let puzzle = place_words_backtrack(4, 4, &words, &BacktrackConfig::default(), &mut rng)
                .expect("the five words have an arrangement");

            assert!(expected.contains(&puzzle.board), "unexpected board:\n{}", puzzle.board);
            assert_eq!(puzzle.board.free_cells_count(), 2);
            if !seen.contains(&puzzle.board) {
                seen.push(puzzle.board);
            }
        }

        // The search order is random, so more than one orientation should turn up.
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_duplication_guard_rejects_palindromes() {
        let mut rng = StdRng::seed_from_u64(3);

        let puzzle = place_words_backtrack(1, 4, &["abba"], &BacktrackConfig::default(), &mut rng);

        assert!(puzzle.is_none());
    }

    #[test]
    fn test_repeated_word_needs_the_guard_off() {
        let mut rng = StdRng::seed_from_u64(4);

        assert!(place_words_backtrack(4, 4, &["cat", "cat"], &BacktrackConfig::default(), &mut rng).is_none());

        let puzzle = place_words_backtrack(4, 4, &["cat", "cat"], &BacktrackConfig { verify_duplication: false }, &mut rng)
            .unwrap();
        assert_eq!(puzzle.words.len(), 2);
    }

    #[test]
    fn test_crossing_words_share_a_cell() {
        let mut rng = StdRng::seed_from_u64(6);

        // On a 3x3 board these can only coexist by crossing in the centre.
        let puzzle = place_words_backtrack(3, 3, &["abc", "dbe", "fbg", "hbi"], &BacktrackConfig::default(), &mut rng)
            .expect("four lines through the centre");

        assert_eq!(puzzle.board.get((1, 1)), 'b');
        assert_eq!(puzzle.board.free_cells_count(), 0);
        for placed in &puzzle.words {
            assert!(puzzle.board.check_word(&placed.candidate, &placed.word));
        }
    }

    #[test]
    fn test_empty_word_list_is_trivially_placed() {
        let mut rng = StdRng::seed_from_u64(7);
        let words: [&str; 0] = [];

        let puzzle = place_words_backtrack(3, 3, &words, &BacktrackConfig::default(), &mut rng).unwrap();

        assert!(puzzle.words.is_empty());
        assert_eq!(puzzle.board.free_cells_count(), 9);
    }
}
