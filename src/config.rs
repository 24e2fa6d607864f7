//! Per-invocation configuration
//!
//! Each solving entry point takes one of these structs by reference. They are
//! built once (built-in defaults, then an optional TOML file, then command
//! line flags) and never mutated afterwards.

use crate::error::{PuzzleError, Result};
use serde::Deserialize;
use std::path::Path;

/// Length and word-count limits for transposal and letter-bank solutions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchBounds {
    pub min_word_len: usize,
    pub max_word_len: usize,
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            min_word_len: 1,
            max_word_len: usize::MAX,
            min_words: 1,
            max_words: usize::MAX,
        }
    }
}

impl SearchBounds {
    /// Solutions made of exactly `count` words
    #[must_use]
    pub fn words(count: usize) -> Self {
        Self {
            min_words: count,
            max_words: count,
            ..Self::default()
        }
    }

    /// Does a finished word list pass every limit?
    #[must_use]
    pub fn accepts<S: AsRef<str>>(&self, words: &[S]) -> bool {
        (self.min_words..=self.max_words).contains(&words.len())
            && words.iter().all(|word| {
                (self.min_word_len..=self.max_word_len).contains(&word.as_ref().len())
            })
    }
}

/// Settings for the pattern-matching substitution solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// Number of workers the first word's candidates are split across
    pub concurrency: usize,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

/// Settings for the hill-climbing key search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HillclimbConfig {
    /// Generations to run; a generation ends when a trajectory goes stale
    pub generations: usize,
    /// Random pairwise swaps applied to produce each neighbour
    pub mutations: usize,
    /// Iterations without improvement before reseeding
    pub regen_after: usize,
    /// Size of the best-candidate archive
    pub candidate_count: usize,
    /// Neighbours evaluated per local-search step
    pub local_lookaround: usize,
    /// Seed for the random source; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for HillclimbConfig {
    fn default() -> Self {
        Self {
            generations: 50,
            mutations: 1,
            regen_after: 1000,
            candidate_count: 10,
            local_lookaround: 1,
            seed: None,
        }
    }
}

/// Defaults loaded from a TOML file
///
/// ```toml
/// [transposal]
/// min_word_len = 3
///
/// [hillclimb]
/// generations = 20
/// seed = 7
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub transposal: SearchBounds,
    pub letter_bank: SearchBounds,
    pub substitution: SubstitutionConfig,
    pub hillclimb: HillclimbConfig,
}

impl FileConfig {
    /// Parse a config from TOML text
    ///
    /// # Errors
    /// Returns [`PuzzleError::Config`] if the text is not valid TOML for this schema.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PuzzleError::Config(e.to_string()))
    }

    /// Read and parse a config file
    ///
    /// # Errors
    /// Returns an I/O error if the file can't be read, or [`PuzzleError::Config`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
