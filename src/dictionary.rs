//! `dictionary` -- the word list the random planner draws from.
//!
//! The input format is as loose as it gets: whitespace-separated tokens. Every token is
//! lowercased and bucketed by its length in characters. Tokens that are too long to ever fit
//! (`MAX_WORD_LENGTH` or more characters) are dropped, as are repeats within a bucket.
//!
//! Loading never fails hard in the `read_or_empty` path: an unreadable file produces an empty
//! dictionary and a warning, and the planners cope with an empty dictionary by simply placing
//! nothing.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::DictionaryError;
use crate::MAX_WORD_LENGTH;

/// Anything the random planner can draw words from.
pub trait WordSource {
    /// A uniformly random word with exactly `length` characters, or `None` if there isn't one.
    fn random_word<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Option<&str>;
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    /// `words_by_length[n]` holds every word of `n` characters, sorted.
    words_by_length: Vec<Vec<String>>,
}

impl Dictionary {
    pub fn parse_from_str(contents: &str) -> Dictionary {
        let mut words_by_length: Vec<Vec<String>> = vec![vec![]; MAX_WORD_LENGTH];

        for token in contents.split_whitespace() {
            let word = token.to_lowercase();
            let length = word.chars().count();
            if length < MAX_WORD_LENGTH {
                words_by_length[length].push(word);
            }
        }

        for bucket in &mut words_by_length {
            bucket.sort();
            bucket.dedup();
        }

        Dictionary { words_by_length }
    }

    /// Build a dictionary from an in-memory list of words.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Dictionary {
        let joined: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
        Dictionary::parse_from_str(&joined.join("\n"))
    }

    /// Read and parse a dictionary file.
    ///
    /// # Errors
    ///
    /// `DictionaryError::Io` if `path` can't be read.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Dictionary, DictionaryError> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            io::Error::new(e.kind(), format!("'{}': {}", path_ref.display(), e))
        })?;

        Ok(Dictionary::parse_from_str(&data))
    }

    /// Like `load_from_path`, but an unreadable file yields an empty dictionary.
    pub fn read_or_empty<P: AsRef<Path>>(path: P) -> Dictionary {
        match Dictionary::load_from_path(path) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                log::warn!("{e}; continuing with an empty dictionary");
                Dictionary::default()
            }
        }
    }

    pub fn words_of_length(&self, length: usize) -> &[String] {
        self.words_by_length.get(length).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of distinct words.
    pub fn len(&self) -> usize {
        self.words_by_length.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw `count` distinct words whose lengths lie in `length_from..=length_to`. Each draw
    /// picks a length uniformly from the range and then a word uniformly from that bucket, so
    /// short and long words are equally likely regardless of how many of each there are.
    ///
    /// # Errors
    ///
    /// `InvalidLengthRange` if `length_from > length_to`, and `PoolExhausted` if the range
    /// doesn't hold `count` distinct words.
    pub fn random_words<R: Rng + ?Sized>(
        &self,
        count: usize,
        length_from: usize,
        length_to: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, DictionaryError> {
        if length_from > length_to {
            return Err(DictionaryError::InvalidLengthRange { from: length_from, to: length_to });
        }

        let available: usize = (length_from..=length_to)
            .map(|length| self.words_of_length(length).len())
            .sum();
        if count > available {
            return Err(DictionaryError::PoolExhausted { requested: count, available });
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(count);
        let mut result = Vec::with_capacity(count);

        while result.len() < count {
            let length = rng.gen_range(length_from..=length_to);
            if let Some(word) = self.random_word(length, rng) {
                if seen.insert(word) {
                    result.push(word.to_string());
                }
            }
        }

        Ok(result)
    }
}

impl WordSource for Dictionary {
    fn random_word<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Option<&str> {
        self.words_of_length(length).choose(rng).map(String::as_str)
    }
}
