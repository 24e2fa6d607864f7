//! Dictionary-driven substitution cipher command

use crate::config::SubstitutionConfig;
use crate::core::Trie;
use crate::ngrams::FrequencyModel;
use crate::solver::{SearchControl, SubstitutionSolution, solve_substitution};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Result of solving a substitution cipher against a dictionary
#[derive(Debug, Clone, Serialize)]
pub struct SubstitutionResult {
    pub ciphertext: String,
    pub solutions: Vec<SubstitutionSolution>,
    pub truncated: bool,
    #[serde(skip)]
    pub duration: Duration,
}

/// Find every consistent decryption of `ciphertext`
///
/// With a frequency model the solutions are ranked by how English-like the
/// plaintext reads.
#[must_use]
pub fn solve_cipher<V: Sync>(
    ciphertext: &str,
    dictionary: &Trie<V>,
    config: &SubstitutionConfig,
    model: Option<&FrequencyModel>,
    control: &SearchControl,
) -> SubstitutionResult {
    let start = Instant::now();
    let solutions = solve_substitution(ciphertext, dictionary, config, model, control);

    SubstitutionResult {
        ciphertext: ciphertext.to_ascii_uppercase(),
        solutions,
        truncated: control.is_cancelled(),
        duration: start.elapsed(),
    }
}
