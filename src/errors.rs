//! Error types for the parts of the crate that can actually fail.
//!
//! Placement itself never errors: an impossible word list comes back as `None` and a crowded
//! board just yields fewer words. What's left are dictionary sampling and filling.
//!
//! # Error Codes
//!
//! - E101: `DictionaryError::PoolExhausted`
//! - E102: `DictionaryError::InvalidLengthRange`
//! - E103: `DictionaryError::Io`
//! - E201: `FillError::MessageTooLong`
//! - E202: `FillError::MessageCreatesDuplicate`
//! - E203: `FillError::NoSafeLetter`

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("requested {requested} distinct words but only {available} are available")]
    PoolExhausted { requested: usize, available: usize },

    #[error("invalid word length range: {from}..={to}")]
    InvalidLengthRange { from: usize, to: usize },

    #[error("failed to read dictionary: {0}")]
    Io(#[from] io::Error),
}

impl DictionaryError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            DictionaryError::PoolExhausted { .. } => "E101",
            DictionaryError::InvalidLengthRange { .. } => "E102",
            DictionaryError::Io(_) => "E103",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FillError {
    #[error("message needs {needed} free cells but the board only has {available}")]
    MessageTooLong { needed: usize, available: usize },

    #[error("message letter '{letter}' at ({row}, {col}) makes a placed word readable in an extra place")]
    MessageCreatesDuplicate { letter: char, row: usize, col: usize },

    #[error("no letter can go at ({row}, {col}) without making a placed word readable in an extra place")]
    NoSafeLetter { row: usize, col: usize },
}

impl FillError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            FillError::MessageTooLong { .. } => "E201",
            FillError::MessageCreatesDuplicate { .. } => "E202",
            FillError::NoSafeLetter { .. } => "E203",
        }
    }

    /// A short hint for the CLI to print under the error, if there's anything useful to say.
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            FillError::MessageTooLong { .. } => Some("use a shorter message, a bigger board or fewer words"),
            FillError::MessageCreatesDuplicate { .. } => Some("try another seed or rephrase the message"),
            FillError::NoSafeLetter { .. } => Some("try another seed"),
        }
    }
}
