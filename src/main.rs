use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wordgrid::backtracking::{place_words_backtrack, BacktrackConfig};
use wordgrid::errors::FillError;
use wordgrid::fill::{fill_free_cells_random, fill_free_cells_with_message};
use wordgrid::random_placement::{place_words_random, summarize_random_runs, PlacementConfig};
use wordgrid::{Dictionary, Puzzle, SAFETY_COUNT, WORD_LENGTH_DECREMENT_FACTOR};

/// Word-search board generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of rows on the board
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Number of columns on the board
    #[arg(long, default_value_t = 10)]
    cols: usize,

    /// Path to the dictionary (whitespace-separated words)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/words.txt")
    )]
    dictionary: String,

    /// Stop after placing this many words (random planner only)
    #[arg(short = 'n', long)]
    word_count: Option<usize>,

    /// Shortest word length to draw from the dictionary
    #[arg(long, default_value_t = 4)]
    min_length: usize,

    /// Longest word length to draw from the dictionary
    #[arg(long, default_value_t = 24)]
    max_length: usize,

    /// Seed for the random generator, for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    /// Place exactly these words with the backtracking planner (e.g. "cat,dog,owl")
    #[arg(short, long, value_delimiter = ',', conflicts_with = "backtrack")]
    words: Option<Vec<String>>,

    /// Draw this many words from the dictionary and place them with the backtracking planner
    #[arg(long)]
    backtrack: Option<usize>,

    /// Let the backtracking planner produce boards where a word can be read twice
    #[arg(long)]
    no_duplicate_guard: bool,

    /// Hide this message in the free cells, in reading order
    #[arg(long)]
    message: Option<String>,

    /// Leave the free cells empty
    #[arg(long)]
    no_fill: bool,

    /// Afterwards, run the random planner this many more times and print the average free-cell
    /// and word counts
    #[arg(long)]
    runs: Option<usize>,

    /// Log placement decisions
    #[arg(long)]
    debug: bool,
}

/// Entry point of the word-search generator.
///
/// Delegates to [`try_main`] and turns any error into a message on stderr and a nonzero exit.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let debug_enabled = cli.debug || std::env::var("WORDGRID_DEBUG").is_ok();
    wordgrid::log::init_logger(debug_enabled);

    if let Err(e) = try_main(&cli) {
        eprintln!("Error: {e}");
        if let Some(fill_err) = e.downcast_ref::<FillError>() {
            if let Some(help) = fill_err.help() {
                eprintln!("  help: {help}");
            }
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Steps:
/// 1. Pick the planner from the CLI flags and place words.
/// 2. Print the bare board and its free-cell count.
/// 3. Fill the free cells (optionally hiding a message) and print the finished board.
/// 4. Print the word list on stdout and the run statistics on stderr.
/// 5. With `--runs`, average the random planner over that many extra boards.
fn try_main(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let backtrack_config = BacktrackConfig { verify_duplication: !cli.no_duplicate_guard };

    let placement_config = PlacementConfig {
        word_count: cli.word_count,
        min_length: cli.min_length,
        max_length: cli.max_length,
        safety_count: SAFETY_COUNT,
        length_decrement_factor: WORD_LENGTH_DECREMENT_FACTOR,
    };

    let dictionary = if cli.words.is_none() || cli.runs.is_some() {
        let dictionary = Dictionary::read_or_empty(&cli.dictionary);
        log::info!("Loaded {} words from {}", dictionary.len(), cli.dictionary);
        dictionary
    } else {
        Dictionary::default()
    };

    let puzzle = if let Some(words) = &cli.words {
        let words: Vec<String> = words.iter().map(|word| word.trim().to_lowercase()).collect();
        backtrack_or_fail(cli, &words, &backtrack_config, &mut rng)?
    } else if let Some(count) = cli.backtrack {
        let words = dictionary.random_words(count, cli.min_length, cli.max_length, &mut rng)?;
        backtrack_or_fail(cli, &words, &backtrack_config, &mut rng)?
    } else {
        place_words_random(&dictionary, cli.rows, cli.cols, &placement_config, &mut rng)
    };

    let Puzzle { mut board, words, statistics } = puzzle;

    println!("Free cells: {}", board.free_cells_count());
    print!("{board}");

    if !cli.no_fill {
        match &cli.message {
            Some(message) => fill_free_cells_with_message(&mut board, &words, message, &mut rng)?,
            None => fill_free_cells_random(&mut board, &words, &mut rng)?,
        }
        print!("{board}");
    }

    for placed in &words {
        println!("{}", placed.word);
    }

    eprintln!(
        "Placed {} words in {:.3}s ({} attempts, {} backtracks).",
        words.len(),
        statistics.duration.as_secs_f64(),
        statistics.attempts,
        statistics.backtracks,
    );

    if let Some(runs) = cli.runs {
        let summary = summarize_random_runs(&dictionary, cli.rows, cli.cols, &placement_config, runs, &mut rng);
        println!("Average free cells: {:.2}", summary.average_free_cells);
        println!("Average word count: {:.2}", summary.average_word_count);
    }

    Ok(())
}

fn backtrack_or_fail(
    cli: &Cli,
    words: &[String],
    config: &BacktrackConfig,
    rng: &mut StdRng,
) -> Result<Puzzle, Box<dyn Error>> {
    place_words_backtrack(cli.rows, cli.cols, words, config, rng).ok_or_else(|| {
        format!("{:?} can't all be placed on a {}x{} board", words, cli.rows, cli.cols).into()
    })
}
