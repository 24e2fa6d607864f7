//! Library error type
//!
//! Unsatisfiable searches are not errors: they return empty collections.
//! Everything here is a validation failure or an I/O failure surfaced by a reader
//! the caller handed us.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("only upper case alphabetic strings are accepted, got {0:?}")]
    InvalidWord(String),

    #[error("text was not long enough to make an ngram of size {size}")]
    ShortInput { size: usize },

    #[error("ngram size must be at least 1")]
    InvalidNgramSize,

    #[error("line {line}: expected <ngram><TAB><log10 probability>")]
    MalformedFrequencyLine { line: usize },

    #[error("line {line}: invalid float {value:?} in frequency table")]
    InvalidFrequency { line: usize, value: String },

    #[error("line {line}: ngram {found:?} does not have the table's length of {expected}")]
    InconsistentNgramLength {
        line: usize,
        expected: usize,
        found: String,
    },

    #[error("frequency table contains no entries")]
    EmptyFrequencyTable,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
