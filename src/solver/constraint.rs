//! Letter budgets threaded through the constrained word search
//!
//! A constraint answers three questions while the search walks the trie: may
//! this letter come next, what is the budget after taking it, and has the
//! budget been used up exactly. Consuming is pure: it returns a new
//! constraint and leaves the parent untouched, so sibling branches never see
//! each other's letters.

use crate::core::{letter_counts, letter_set};
use std::collections::BTreeSet;

/// A per-search letter budget
pub trait LetterConstraint: Clone + Send + Sync {
    /// Whether a multi-word phrase can keep being extended after it is
    /// satisfied. Transposals stop at exhaustion; letter banks do not.
    const CONTINUES_WHEN_SATISFIED: bool;

    /// Letters a solution may start with
    fn domain(&self) -> Vec<u8>;

    /// Can `letter` be consumed next?
    fn allows(&self, letter: u8) -> bool;

    /// The budget left after consuming `letter`
    #[must_use]
    fn consume(&self, letter: u8) -> Self;

    /// Has the budget been met exactly?
    fn is_satisfied(&self) -> bool;

    /// Word limit for a phrase when the caller gives none
    fn implied_max_words(&self) -> Option<usize> {
        None
    }
}

/// Multiset budget: every letter must be used exactly as often as it appears
///
/// Used for transposals (multi-word anagrams). A letter that reaches zero is
/// removed, so the map never contains a zero count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisetConstraint {
    remaining: Vec<(u8, usize)>,
}

impl MultisetConstraint {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut remaining: Vec<(u8, usize)> = letter_counts(text).into_iter().collect();
        remaining.sort_unstable();
        Self { remaining }
    }

    /// Remaining count for `letter`
    #[must_use]
    pub fn remaining(&self, letter: u8) -> usize {
        self.remaining
            .iter()
            .find(|&&(l, _)| l == letter)
            .map_or(0, |&(_, count)| count)
    }
}

impl LetterConstraint for MultisetConstraint {
    const CONTINUES_WHEN_SATISFIED: bool = false;

    fn domain(&self) -> Vec<u8> {
        self.remaining.iter().map(|&(letter, _)| letter).collect()
    }

    fn allows(&self, letter: u8) -> bool {
        self.remaining.iter().any(|&(l, _)| l == letter)
    }

    fn consume(&self, letter: u8) -> Self {
        let remaining = self
            .remaining
            .iter()
            .filter_map(|&(l, count)| match (l == letter, count) {
                (true, 1) => None,
                (true, n) => Some((l, n - 1)),
                (false, n) => Some((l, n)),
            })
            .collect();
        Self { remaining }
    }

    fn is_satisfied(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Set budget: the phrase must use exactly the letters of the set
///
/// Used for letter banks. Letters may repeat freely; what matters is that the
/// used set ends up equal to the full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetConstraint {
    letters: BTreeSet<u8>,
    used: BTreeSet<u8>,
}

impl SetConstraint {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            letters: letter_set(text),
            used: BTreeSet::new(),
        }
    }

    /// Letters covered so far
    #[must_use]
    pub const fn used(&self) -> &BTreeSet<u8> {
        &self.used
    }
}

impl LetterConstraint for SetConstraint {
    const CONTINUES_WHEN_SATISFIED: bool = true;

    fn domain(&self) -> Vec<u8> {
        self.letters.iter().copied().collect()
    }

    fn allows(&self, letter: u8) -> bool {
        self.letters.contains(&letter)
    }

    fn consume(&self, letter: u8) -> Self {
        let mut used = self.used.clone();
        used.insert(letter);
        Self {
            letters: self.letters.clone(),
            used,
        }
    }

    fn is_satisfied(&self) -> bool {
        !self.letters.is_empty() && self.used.len() == self.letters.len()
    }

    /// Used when the caller sets no word limit. A covered set stays covered,
    /// so an uncapped phrase could repeat words forever.
    fn implied_max_words(&self) -> Option<usize> {
        Some(self.letters.len())
    }
}
