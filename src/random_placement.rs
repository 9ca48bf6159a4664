//! Greedy randomized placement: keep drawing a random word and direction and drop the word into
//! the first compatible spot, until the board is crowded enough that `safety_count` attempts in a
//! row go nowhere.
//!
//! Two tweaks make the output look more like a hand-made puzzle. Long words are preferred at
//! first, and the minimum length sampled decays as attempts fail so that the gaps left late in
//! the run get plugged with short words. And the first half of the board is filled with diagonal
//! words only, after which only horizontal and vertical words are placed, so that a puzzle
//! doesn't end up being all one or the other.

use std::ops::RangeInclusive;

use instant::Instant;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, PlacedWord};
use crate::candidates::CandidatePool;
use crate::dictionary::WordSource;
use crate::duplication::verify_duplication;
use crate::geometry::Direction;
use crate::{Puzzle, Statistics, MIN_WORD_LENGTH, MAX_WORD_LENGTH, SAFETY_COUNT, WORD_LENGTH_DECREMENT_FACTOR};

/// Knobs for `place_words_random`.
#[derive(Debug, Clone)]
pub struct PlacementConfig {
    /// Stop once this many words are placed. `None` keeps going until the board is full.
    pub word_count: Option<usize>,

    /// Shortest word length to ask the word source for.
    pub min_length: usize,

    /// Longest word length to ask for. Clamped to the longer board dimension.
    pub max_length: usize,

    /// Consecutive failed attempts before giving up.
    pub safety_count: usize,

    /// How much the minimum sampled length drops per failed attempt.
    pub length_decrement_factor: f32,
}

impl Default for PlacementConfig {
    fn default() -> PlacementConfig {
        PlacementConfig {
            word_count: None,
            min_length: MIN_WORD_LENGTH,
            max_length: MAX_WORD_LENGTH - 1,
            safety_count: SAFETY_COUNT,
            length_decrement_factor: WORD_LENGTH_DECREMENT_FACTOR,
        }
    }
}

/// Which directions the planner is currently drawing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectionSchedule {
    Diagonal,
    Straight,
}

impl DirectionSchedule {
    fn directions(self) -> &'static [Direction] {
        match self {
            DirectionSchedule::Diagonal => &Direction::DIAGONAL,
            DirectionSchedule::Straight => &Direction::STRAIGHT,
        }
    }
}

/// The range of word lengths to sample from after `safety_counter` failed attempts. It starts as
/// the top two lengths and widens downward by `floor(safety_counter * factor)`, never going below
/// `min_length`.
pub fn word_length_range(
    min_length: usize,
    max_length: usize,
    safety_counter: usize,
    factor: f32,
) -> RangeInclusive<usize> {
    let decrement = (safety_counter as f32 * factor).floor() as usize;
    let lower = max_length
        .saturating_sub(1)
        .saturating_sub(decrement)
        .max(min_length)
        .min(max_length);

    lower..=max_length
}

/// Live state for a single run of the planner.
struct RandomPlacement<'a, S: WordSource> {
    source: &'a S,
    config: &'a PlacementConfig,
    max_length: usize,
    board: Board,
    words: Vec<PlacedWord>,
    pool: CandidatePool,
    check_pool: CandidatePool,
    statistics: Statistics,
}

impl<'a, S: WordSource> RandomPlacement<'a, S> {
    /// Try to place one more word, drawing directions from `directions`. Returns `false` once
    /// `safety_count` attempts in a row have failed.
    fn place_word<R: Rng + ?Sized>(&mut self, directions: &[Direction], rng: &mut R) -> bool {
        let source = self.source;
        let mut safety_counter = 0;

        while safety_counter < self.config.safety_count {
            self.statistics.attempts += 1;

            let Some(&direction) = directions.choose(rng) else {
                return false;
            };
            let lengths = word_length_range(
                self.config.min_length,
                self.max_length,
                safety_counter,
                self.config.length_decrement_factor,
            );
            let length = rng.gen_range(lengths);

            // Nothing of this length, or we already used what we got: both count as a miss.
            let Some(word) = source.random_word(length, rng) else {
                safety_counter += 1;
                continue;
            };
            if self.words.iter().any(|placed| placed.word == word) {
                safety_counter += 1;
                continue;
            }

            self.pool.shuffle_bucket(direction, length, rng);

            let board = &self.board;
            let placed_words = &self.words;
            let check_pool = &self.check_pool;
            let found = self.pool.bucket(direction, length).iter().copied().find(|candidate| {
                board.verify_word(candidate, word) &&
                    board.count_empty_cells(candidate, word) > 0 &&
                    verify_duplication(
                        board,
                        placed_words.iter().map(|placed| placed.word.as_str()),
                        candidate,
                        word,
                        check_pool,
                    )
            });

            if let Some(candidate) = found {
                self.board.apply_word(&candidate, word);
                self.pool.remove_intercepting(&candidate, length);
                self.words.push(PlacedWord::new(word, candidate));
                self.statistics.placements += 1;

                log::debug!(
                    "placed {:?} at ({}, {}) going {:?} after {} misses",
                    word, candidate.row, candidate.col, candidate.direction, safety_counter,
                );
                return true;
            }

            safety_counter += 1;
        }

        false
    }
}

/// Place as many distinct words from `source` as will fit on a `rows` x `cols` board, or up to
/// `config.word_count` if that's set. Never fails: the returned word list is whatever could be
/// placed before the retry budget ran out, and callers shouldn't assume the requested count was
/// reached.
pub fn place_words_random<S: WordSource, R: Rng + ?Sized>(
    source: &S,
    rows: usize,
    cols: usize,
    config: &PlacementConfig,
    rng: &mut R,
) -> Puzzle {
    let start = Instant::now();

    let mut state = RandomPlacement {
        source,
        config,
        max_length: config.max_length.min(rows.max(cols)),
        board: Board::new(rows, cols),
        words: vec![],
        pool: CandidatePool::shuffled(rows, cols, rng),
        check_pool: CandidatePool::new(rows, cols),
        statistics: Statistics::default(),
    };

    let total_cells = rows * cols;
    let mut schedule = DirectionSchedule::Diagonal;

    if total_cells > 0 {
        loop {
            if config.word_count.map_or(false, |target| state.words.len() >= target) {
                break;
            }

            if !state.place_word(schedule.directions(), rng) {
                break;
            }

            let free_cells = state.board.free_cells_count();
            if schedule == DirectionSchedule::Diagonal && free_cells < total_cells / 2 {
                log::debug!("{} of {} cells free; switching to straight words", free_cells, total_cells);
                schedule = DirectionSchedule::Straight;
            }
        }
    }

    state.statistics.duration = start.elapsed();

    log::info!(
        "Placed {} words on a {}x{} board ({} cells free) in {:?}",
        state.words.len(),
        rows,
        cols,
        state.board.free_cells_count(),
        state.statistics.duration,
    );

    Puzzle { board: state.board, words: state.words, statistics: state.statistics }
}

/// Averages over repeated runs of the random planner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub runs: usize,
    pub average_free_cells: f64,
    pub average_word_count: f64,
}

/// Run `place_words_random` `runs` times with the same settings and average how many cells were
/// left free and how many words were placed. Handy for judging how well a configuration packs a
/// board.
pub fn summarize_random_runs<S: WordSource, R: Rng + ?Sized>(
    source: &S,
    rows: usize,
    cols: usize,
    config: &PlacementConfig,
    runs: usize,
    rng: &mut R,
) -> RunSummary {
    if runs == 0 {
        return RunSummary::default();
    }

    let mut free_cells = 0;
    let mut word_count = 0;
    for _ in 0..runs {
        let puzzle = place_words_random(source, rows, cols, config, rng);
        free_cells += puzzle.board.free_cells_count();
        word_count += puzzle.words.len();
    }

    RunSummary {
        runs,
        average_free_cells: free_cells as f64 / runs as f64,
        average_word_count: word_count as f64 / runs as f64,
    }
}
