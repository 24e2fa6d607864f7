//! N-gram frequency model
//!
//! Maps each n-gram to its log10 probability. Built either from a corpus
//! (counting through a trie) or loaded from a precomputed table of
//! `<ngram>\t<log10 probability>` lines.

use super::scanner::NgramScanner;
use crate::core::{Trie, letters_only};
use crate::error::{PuzzleError, Result};
use rustc_hash::FxHashMap;
use std::io::{BufRead, Read, Write};
use tracing::{debug, info};

/// Score added for every n-gram the model has never seen
pub const UNSEEN_NGRAM_PENALTY: f64 = -1000.0;

/// Default n-gram width when nothing else decides it
pub const DEFAULT_NGRAM_SIZE: usize = 4;

/// Log10 probabilities of fixed-length n-grams
#[derive(Debug, Clone)]
pub struct FrequencyModel {
    size: usize,
    log_probabilities: FxHashMap<String, f64>,
}

impl FrequencyModel {
    /// Build a model by counting the n-grams of a corpus
    ///
    /// # Errors
    /// Returns [`PuzzleError::ShortInput`] if the corpus has fewer than `size`
    /// letters, [`PuzzleError::InvalidNgramSize`] for `size == 0`, and I/O
    /// errors from `reader`.
    pub fn from_corpus<R: Read>(reader: R, size: usize) -> Result<Self> {
        let (counts, total) = count_ngrams(reader, size)?;

        let log_probabilities = counts
            .words()
            .map(|(ngram, &count)| (ngram, (count as f64 / total as f64).log10()))
            .collect();

        info!(size, total, "built frequency model from corpus");
        Ok(Self {
            size,
            log_probabilities,
        })
    }

    /// Parse a tab separated `<ngram>\t<log10 probability>` table
    ///
    /// The n-gram width comes from the first record and every later record
    /// must match it. Blank lines are skipped; n-grams are upper cased.
    ///
    /// # Errors
    /// Returns a typed error naming the offending line for malformed records,
    /// bad floats or inconsistent widths, and [`PuzzleError::EmptyFrequencyTable`]
    /// when there are no records at all.
    pub fn from_tsv<R: BufRead>(reader: R) -> Result<Self> {
        let mut size = None;
        let mut log_probabilities = FxHashMap::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let (ngram, value) = line
                .split_once('\t')
                .ok_or(PuzzleError::MalformedFrequencyLine { line: line_number })?;
            let ngram = ngram.trim().to_ascii_uppercase();
            let value = value.trim();

            if ngram.is_empty() || !ngram.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(PuzzleError::MalformedFrequencyLine { line: line_number });
            }

            let expected = *size.get_or_insert(ngram.len());
            if ngram.len() != expected {
                return Err(PuzzleError::InconsistentNgramLength {
                    line: line_number,
                    expected,
                    found: ngram,
                });
            }

            let probability: f64 = value.parse().map_err(|_| PuzzleError::InvalidFrequency {
                line: line_number,
                value: value.to_string(),
            })?;
            log_probabilities.insert(ngram, probability);
        }

        let size = size.ok_or(PuzzleError::EmptyFrequencyTable)?;
        debug!(size, entries = log_probabilities.len(), "loaded frequency table");
        Ok(Self {
            size,
            log_probabilities,
        })
    }

    /// Width of the n-grams in this model
    #[inline]
    #[must_use]
    pub const fn ngram_size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log_probabilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log_probabilities.is_empty()
    }

    /// Log10 probability of an n-gram, if the model has seen it
    #[must_use]
    pub fn log_probability(&self, ngram: &str) -> Option<f64> {
        self.log_probabilities.get(ngram).copied()
    }

    /// Fitness of `text`: the sum of the log probabilities of its n-grams
    ///
    /// Non-letters are ignored. Unseen n-grams score [`UNSEEN_NGRAM_PENALTY`].
    /// Text with fewer letters than the n-gram width scores 0.
    #[must_use]
    pub fn fitness(&self, text: &str) -> f64 {
        self.fitness_of_letters(letters_only(text).as_bytes())
    }

    /// Fitness of text that is already upper case letters only
    ///
    /// This is the hot path for hill climbing, so it slides over the bytes
    /// directly instead of going through a scanner.
    #[must_use]
    pub fn fitness_of_letters(&self, letters: &[u8]) -> f64 {
        letters
            .windows(self.size)
            .map(|window| {
                std::str::from_utf8(window)
                    .ok()
                    .and_then(|ngram| self.log_probability(ngram))
                    .unwrap_or(UNSEEN_NGRAM_PENALTY)
            })
            .sum()
    }

    /// Write the model as a table readable by [`FrequencyModel::from_tsv`]
    ///
    /// Rows are sorted by n-gram.
    ///
    /// # Errors
    /// Propagates write errors.
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut rows: Vec<(&String, &f64)> = self.log_probabilities.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        for (ngram, probability) in rows {
            writeln!(writer, "{ngram}\t{probability:.16}")?;
        }
        Ok(())
    }
}

/// Count n-grams into a trie, returning it with the total number scanned
///
/// # Errors
/// Scanner errors are propagated.
pub fn count_ngrams<R: Read>(reader: R, size: usize) -> Result<(Trie<u64>, u64)> {
    let mut counts: Trie<u64> = Trie::new();
    let mut total = 0u64;

    for ngram in NgramScanner::new(reader, size)? {
        let ngram = ngram?;
        total += 1;
        if let Some(count) = counts.get_mut(&ngram) {
            *count += 1;
        } else {
            counts.insert(&ngram, 1)?;
        }
    }

    Ok((counts, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_probabilities_sum_to_one() {
        let model = FrequencyModel::from_corpus("abab ab".as_bytes(), 2).unwrap();

        // ABABAB -> AB, BA, AB, BA, AB
        assert_eq!(model.ngram_size(), 2);
        assert_eq!(model.len(), 2);
        let ab = model.log_probability("AB").unwrap();
        let ba = model.log_probability("BA").unwrap();
        assert!((ab - (3.0f64 / 5.0).log10()).abs() < 1e-12);
        assert!((10f64.powf(ab) + 10f64.powf(ba) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn counting_uses_trie() {
        let (counts, total) = count_ngrams("the theme".as_bytes(), 3).unwrap();
        assert_eq!(total, 6);
        assert_eq!(counts.get("THE"), Some(&2));
        assert_eq!(counts.get("HET"), Some(&1));
        assert_eq!(counts.get("EME"), Some(&1));
    }

    #[test]
    fn short_corpus_is_an_error() {
        assert!(matches!(
            FrequencyModel::from_corpus("ab".as_bytes(), 4),
            Err(PuzzleError::ShortInput { size: 4 })
        ));
    }

    #[test]
    fn loads_table() {
        let table = "TION\t-2.5\nTHER\t-2.75\n\nNTHE\t-3\n";
        let model = FrequencyModel::from_tsv(table.as_bytes()).unwrap();

        assert_eq!(model.ngram_size(), 4);
        assert_eq!(model.len(), 3);
        assert_eq!(model.log_probability("THER"), Some(-2.75));
        assert_eq!(model.log_probability("ABCD"), None);
    }

    #[test]
    fn table_width_must_be_uniform() {
        let table = "TION\t-2.5\nTHE\t-1.0\n";
        assert!(matches!(
            FrequencyModel::from_tsv(table.as_bytes()),
            Err(PuzzleError::InconsistentNgramLength { line: 2, expected: 4, .. })
        ));
    }

    #[test]
    fn table_errors_are_typed() {
        assert!(matches!(
            FrequencyModel::from_tsv("TION -2.5\n".as_bytes()),
            Err(PuzzleError::MalformedFrequencyLine { line: 1 })
        ));
        assert!(matches!(
            FrequencyModel::from_tsv("TION\tabc\n".as_bytes()),
            Err(PuzzleError::InvalidFrequency { line: 1, .. })
        ));
        assert!(matches!(
            FrequencyModel::from_tsv("\n\n".as_bytes()),
            Err(PuzzleError::EmptyFrequencyTable)
        ));
    }

    #[test]
    fn fitness_penalizes_unseen() {
        let model = FrequencyModel::from_tsv("HEL\t-1.0\nELL\t-2.0\n".as_bytes()).unwrap();

        // HEL + ELL + LLO(unseen)
        let fitness = model.fitness("Hello");
        assert!((fitness - (-3.0 + UNSEEN_NGRAM_PENALTY)).abs() < 1e-9);
        assert!(model.fitness("He").abs() < f64::EPSILON);
    }

    #[test]
    fn written_table_round_trips() {
        let model = FrequencyModel::from_corpus("the quick brown fox".as_bytes(), 3).unwrap();
        let mut buffer = Vec::new();
        model.write_tsv(&mut buffer).unwrap();

        let reloaded = FrequencyModel::from_tsv(buffer.as_slice()).unwrap();
        assert_eq!(reloaded.len(), model.len());
        let original = model.log_probability("THE").unwrap();
        let parsed = reloaded.log_probability("THE").unwrap();
        assert!((original - parsed).abs() < 1e-12);
    }
}
