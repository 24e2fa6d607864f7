//! Transposal and letter-bank command
//!
//! Both puzzles produce lists of dictionary words drawn from a fixed set of
//! letters; they differ only in how the letters may be spent.

use crate::config::SearchBounds;
use crate::core::Trie;
use crate::solver::{SearchControl, solve_letter_bank, solve_transposal};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Which letter budget to search with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordListKind {
    /// Every letter used exactly as often as in the input
    Transposal,
    /// Exactly the input's distinct letters, each any number of times
    LetterBank,
}

impl fmt::Display for WordListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transposal => f.write_str("Transposal"),
            Self::LetterBank => f.write_str("Letter bank"),
        }
    }
}

/// One solution: the words in the order they were found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordListSolution {
    pub words: Vec<String>,
}

impl fmt::Display for WordListSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

/// Result of a word-list search
#[derive(Debug, Clone, Serialize)]
pub struct WordListResult {
    pub kind: WordListKind,
    pub input: String,
    pub solutions: Vec<WordListSolution>,
    /// True if the search stopped early and `solutions` may be incomplete
    pub truncated: bool,
    #[serde(skip)]
    pub duration: Duration,
}

/// Search `dictionary` for transposals or letter banks of `input`
#[must_use]
pub fn find_word_lists<V: Sync>(
    kind: WordListKind,
    input: &str,
    dictionary: &Trie<V>,
    bounds: &SearchBounds,
    control: &SearchControl,
) -> WordListResult {
    let start = Instant::now();
    let found = match kind {
        WordListKind::Transposal => solve_transposal(input, dictionary, bounds, control),
        WordListKind::LetterBank => solve_letter_bank(input, dictionary, bounds, control),
    };

    WordListResult {
        kind,
        input: input.to_string(),
        solutions: found
            .into_iter()
            .map(|words| WordListSolution { words })
            .collect(),
        truncated: control.is_cancelled(),
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Trie<()> {
        ["LENDS", "NEEDLESS", "NEEDLES", "DELL", "SEND"]
            .into_iter()
            .collect()
    }

    #[test]
    fn transposal_command_wraps_solutions() {
        let result = find_word_lists(
            WordListKind::Transposal,
            "lends",
            &dictionary(),
            &SearchBounds::words(1),
            &SearchControl::new(),
        );

        assert_eq!(result.input, "lends");
        assert_eq!(result.solutions.len(), 1);
        assert_eq!(result.solutions[0].to_string(), "LENDS");
        assert!(!result.truncated);
    }

    #[test]
    fn letter_bank_command_finds_supersets() {
        let result = find_word_lists(
            WordListKind::LetterBank,
            "LENDS",
            &dictionary(),
            &SearchBounds::words(1),
            &SearchControl::new(),
        );

        let words: Vec<String> = result.solutions.iter().map(ToString::to_string).collect();
        assert_eq!(words, vec!["LENDS", "NEEDLES", "NEEDLESS"]);
    }

    #[test]
    fn budget_marks_result_truncated() {
        let result = find_word_lists(
            WordListKind::Transposal,
            "LENDS",
            &dictionary(),
            &SearchBounds::default(),
            &SearchControl::with_budget(1),
        );
        assert!(result.truncated);
    }

    #[test]
    fn serializes_kind_in_snake_case() {
        let result = find_word_lists(
            WordListKind::LetterBank,
            "XYZ",
            &dictionary(),
            &SearchBounds::default(),
            &SearchControl::new(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "letter_bank");
        assert_eq!(json["solutions"].as_array().map(Vec::len), Some(0));
    }
}
