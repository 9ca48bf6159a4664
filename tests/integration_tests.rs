//! Integration tests for the word-search generator.
//!
//! These run the whole pipeline, from dictionary loading through placement to noise filling,
//! against the bundled word list. Every generator is seeded so failures reproduce.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use wordgrid::backtracking::{place_words_backtrack, BacktrackConfig};
use wordgrid::duplication::is_any_word_duplicated;
use wordgrid::errors::DictionaryError;
use wordgrid::fill::{fill_free_cells_random, fill_free_cells_with_message};
use wordgrid::random_placement::{place_words_random, PlacementConfig};
use wordgrid::{Board, CandidatePool, Dictionary, Puzzle, EMPTY_CELL};

fn bundled_dictionary() -> Dictionary {
    Dictionary::parse_from_str(include_str!("../data/words.txt"))
}

/// Every placed word reads back at its candidate and nowhere else.
fn assert_words_sound(puzzle: &Puzzle) {
    for placed in &puzzle.words {
        assert!(puzzle.board.check_word(&placed.candidate, &placed.word), "{:?} isn't on the board", placed);
    }

    let check_pool = CandidatePool::new(puzzle.board.rows(), puzzle.board.cols());
    assert!(!is_any_word_duplicated(&puzzle.board, puzzle.word_strings(), &check_pool));
}

/// Filling touched only the cells that were empty, and left none behind.
fn assert_filled_around(before: &Board, after: &Board) {
    assert_eq!(after.free_cells_count(), 0);
    for row in 0..before.rows() {
        for col in 0..before.cols() {
            if before.get((row, col)) != EMPTY_CELL {
                assert_eq!(before.get((row, col)), after.get((row, col)));
            }
        }
    }
}

#[test]
fn test_bundled_dictionary_loads() {
    let dictionary = bundled_dictionary();

    assert!(dictionary.len() > 200);
    assert!(!dictionary.words_of_length(5).is_empty());
}

#[test]
fn test_random_pipeline() {
    let mut rng = StdRng::seed_from_u64(2024);
    let config = PlacementConfig {
        word_count: Some(10),
        min_length: 3,
        max_length: 8,
        safety_count: 500,
        ..PlacementConfig::default()
    };

    let mut puzzle = place_words_random(&bundled_dictionary(), 10, 10, &config, &mut rng);

    assert!(!puzzle.words.is_empty());
    assert!(puzzle.words.len() <= 10);
    let distinct: HashSet<_> = puzzle.word_strings().collect();
    assert_eq!(distinct.len(), puzzle.words.len());
    assert_words_sound(&puzzle);

    let before = puzzle.board.clone();
    fill_free_cells_random(&mut puzzle.board, &puzzle.words, &mut rng).unwrap();

    assert_filled_around(&before, &puzzle.board);
    assert_words_sound(&puzzle);
}

#[test]
fn test_backtracking_pipeline() {
    let mut rng = StdRng::seed_from_u64(7);
    let words = ["apple", "lemon", "grape", "melon"];

    let mut puzzle = place_words_backtrack(7, 7, &words, &BacktrackConfig::default(), &mut rng)
        .expect("four five-letter words fit on a 7x7 board");

    assert_eq!(puzzle.word_strings().collect::<Vec<_>>(), words);
    assert_words_sound(&puzzle);

    let before = puzzle.board.clone();
    fill_free_cells_random(&mut puzzle.board, &puzzle.words, &mut rng).unwrap();

    assert_filled_around(&before, &puzzle.board);
    assert_words_sound(&puzzle);
}

#[test]
fn test_sampled_words_through_backtracking() {
    let mut rng = StdRng::seed_from_u64(31);
    let dictionary = bundled_dictionary();

    let words = dictionary.random_words(4, 3, 5, &mut rng).unwrap();
    assert_eq!(words.len(), 4);
    assert!(words.iter().all(|word| (3..=5).contains(&word.chars().count())));

    let puzzle = place_words_backtrack(8, 8, &words, &BacktrackConfig::default(), &mut rng)
        .expect("four short words fit on an 8x8 board");

    assert_eq!(puzzle.words.len(), 4);
    assert_words_sound(&puzzle);
}

#[test]
fn test_hidden_message_pipeline() {
    let mut rng = StdRng::seed_from_u64(5);
    let words = ["tiger", "zebra"];

    let mut puzzle = place_words_backtrack(6, 6, &words, &BacktrackConfig::default(), &mut rng).unwrap();
    let free_cells = puzzle.board.empty_cells();

    fill_free_cells_with_message(&mut puzzle.board, &puzzle.words, "Hi mom", &mut rng).unwrap();

    let hidden: String = free_cells.iter().take(5).map(|&coord| puzzle.board.get(coord)).collect();
    assert_eq!(hidden, "himom");
    assert_eq!(puzzle.board.free_cells_count(), 0);
    assert_words_sound(&puzzle);
}

#[test]
fn test_dictionary_exhaustion_is_an_error() {
    let mut rng = StdRng::seed_from_u64(3);
    let dictionary = bundled_dictionary();
    let available: usize = (3..=5).map(|length| dictionary.words_of_length(length).len()).sum();

    let err = dictionary.random_words(available + 1, 3, 5, &mut rng).unwrap_err();

    assert!(matches!(err, DictionaryError::PoolExhausted { requested, .. } if requested == available + 1));
    assert_eq!(err.code(), "E101");
}

#[test]
fn test_render_format() {
    let board = Board::from_rows(&["do.", ".g."]);

    assert_eq!(board.to_string(), "   d   o   .\n   .   g   .\n\n");
}
