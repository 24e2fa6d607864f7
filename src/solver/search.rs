//! Constrained multi-word search over the dictionary trie
//!
//! One backtracking walk serves both transposals (multiset budget) and letter
//! banks (set budget). At every node the walk can keep spelling the current
//! word with a permitted letter, or, at a word boundary, close the word and
//! start the next one from the root.
//!
//! The walk fans out one rayon task per starting letter. Completed word lists
//! go over a channel to a single collector that applies the length and count
//! limits.

use super::constraint::{LetterConstraint, MultisetConstraint, SetConstraint};
use super::control::SearchControl;
use crate::config::SearchBounds;
use crate::core::{Trie, TrieNode, TrieStep};
use crossbeam_channel::Sender;
use tracing::debug;

/// Find every transposal (multi-word anagram) of `text`
///
/// Each solution's letters, taken together, are exactly the letters of `text`
/// as a multiset. Results are sorted for stable output.
///
/// # Examples
/// ```
/// use puzzle_solver::config::SearchBounds;
/// use puzzle_solver::core::Trie;
/// use puzzle_solver::solver::{SearchControl, solve_transposal};
///
/// let dictionary: Trie<()> = ["DOG", "GOD", "GO"].into_iter().collect();
/// let found = solve_transposal("dog", &dictionary, &SearchBounds::default(), &SearchControl::new());
/// assert_eq!(found, vec![vec!["DOG"], vec!["GOD"]]);
/// ```
#[must_use]
pub fn solve_transposal<V: Sync>(
    text: &str,
    dictionary: &Trie<V>,
    bounds: &SearchBounds,
    control: &SearchControl,
) -> Vec<Vec<String>> {
    constrained_search(dictionary, MultisetConstraint::from_text(text), bounds, control)
}

/// Find every letter bank of `text`
///
/// A letter bank is a word or phrase whose unique letters are exactly the
/// unique letters of `text`. Matches need not be minimal: NEEDLESS is a letter
/// bank of LENDS.
#[must_use]
pub fn solve_letter_bank<V: Sync>(
    text: &str,
    dictionary: &Trie<V>,
    bounds: &SearchBounds,
    control: &SearchControl,
) -> Vec<Vec<String>> {
    constrained_search(dictionary, SetConstraint::from_text(text), bounds, control)
}

/// Run the generic constrained search and collect filtered, sorted results
#[must_use]
pub fn constrained_search<C, V>(
    dictionary: &Trie<V>,
    constraint: C,
    bounds: &SearchBounds,
    control: &SearchControl,
) -> Vec<Vec<String>>
where
    C: LetterConstraint,
    V: Sync,
{
    let bounds = *bounds;
    let max_words = match constraint.implied_max_words() {
        Some(cap) if bounds.max_words == usize::MAX => cap,
        _ => bounds.max_words,
    };
    let root = dictionary.root();
    let (sender, receiver) = crossbeam_channel::unbounded::<Vec<String>>();

    let mut solutions = std::thread::scope(|threads| {
        let collector = threads.spawn(move || {
            receiver
                .iter()
                .filter(|words| bounds.accepts(words))
                .collect::<Vec<_>>()
        });

        rayon::scope(|branches| {
            for letter in constraint.domain() {
                let Some(child) = root.child(letter) else {
                    continue;
                };
                let walker = Walker {
                    root,
                    max_words,
                    control: control.clone(),
                    sender: sender.clone(),
                };
                let remaining = constraint.consume(letter);
                branches.spawn(move |_| {
                    walker.walk(child, &remaining, &[], &char::from(letter).to_string());
                });
            }
        });
        drop(sender);

        collector
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    });

    solutions.sort();
    debug!(
        solutions = solutions.len(),
        visits = control.visits(),
        cancelled = control.is_cancelled(),
        "constrained search finished"
    );
    solutions
}

/// State shared by every step of one branch
struct Walker<'t, V> {
    root: &'t TrieNode<V>,
    max_words: usize,
    control: SearchControl,
    sender: Sender<Vec<String>>,
}

impl<V> Walker<'_, V> {
    fn walk<C: LetterConstraint>(
        &self,
        node: &TrieNode<V>,
        constraint: &C,
        words: &[String],
        current: &str,
    ) {
        if !self.control.visit() {
            return;
        }

        if node.is_word() && constraint.is_satisfied() {
            let mut solution = words.to_vec();
            solution.push(current.to_string());
            // A closed receiver only means nobody is listening any more
            let _ = self.sender.send(solution);
            if !C::CONTINUES_WHEN_SATISFIED {
                return;
            }
        }

        for step in node.steps() {
            match step {
                TrieStep::Letter(letter, child) => {
                    if constraint.allows(letter) {
                        let mut extended = String::with_capacity(current.len() + 1);
                        extended.push_str(current);
                        extended.push(char::from(letter));
                        self.walk(child, &constraint.consume(letter), words, &extended);
                    }
                }
                TrieStep::WordBreak => {
                    // Closing this word only helps if another one still fits
                    if words.len() + 1 < self.max_words {
                        let mut closed = words.to_vec();
                        closed.push(current.to_string());
                        self.walk(self.root, constraint, &closed, "");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::letter_counts;

    fn dictionary(words: &[&str]) -> Trie<()> {
        words.iter().collect()
    }

    fn single_words(solutions: &[Vec<String>]) -> Vec<&str> {
        solutions
            .iter()
            .filter(|s| s.len() == 1)
            .map(|s| s[0].as_str())
            .collect()
    }

    #[test]
    fn transposal_single_word() {
        let dict = dictionary(&["LENDS", "NEEDLESS", "NEEDLES", "DELL", "SEND"]);
        let found = solve_transposal("LENDS", &dict, &SearchBounds::words(1), &SearchControl::new());

        assert_eq!(found, vec![vec!["LENDS".to_string()]]);
    }

    #[test]
    fn transposal_multiset_invariant() {
        let dict = dictionary(&["DOG", "GOD", "CAT", "ACT", "COD"]);
        let found = solve_transposal("dog cat", &dict, &SearchBounds::default(), &SearchControl::new());

        // {CAT, ACT} x {DOG, GOD} in either order
        assert_eq!(found.len(), 8);
        let expected = letter_counts("DOGCAT");
        for solution in &found {
            assert_eq!(letter_counts(&solution.concat()), expected, "{solution:?}");
        }
    }

    #[test]
    fn transposal_repeated_words() {
        let dict = dictionary(&["TO", "OT", "TOOT"]);
        let found = solve_transposal("TOOT", &dict, &SearchBounds::default(), &SearchControl::new());

        let joined: Vec<String> = found.iter().map(|s| s.join(" ")).collect();
        assert_eq!(joined, vec!["OT OT", "OT TO", "TO OT", "TO TO", "TOOT"]);
    }

    #[test]
    fn transposal_respects_max_words() {
        let dict = dictionary(&["DOG", "CAT"]);
        let found = solve_transposal("dogcat", &dict, &SearchBounds::words(1), &SearchControl::new());
        assert!(found.is_empty());
    }

    #[test]
    fn transposal_respects_word_lengths() {
        let dict = dictionary(&["TO", "OT", "TOOT"]);
        let bounds = SearchBounds {
            min_word_len: 3,
            ..SearchBounds::default()
        };
        let found = solve_transposal("TOOT", &dict, &bounds, &SearchControl::new());
        assert_eq!(found, vec![vec!["TOOT".to_string()]]);
    }

    #[test]
    fn letter_bank_single_words() {
        let dict = dictionary(&["LENDS", "NEEDLESS", "NEEDLES", "DELL", "SEND"]);
        let found = solve_letter_bank("LENDS", &dict, &SearchBounds::words(1), &SearchControl::new());

        assert_eq!(single_words(&found), vec!["LENDS", "NEEDLES", "NEEDLESS"]);
    }

    #[test]
    fn letter_bank_min_word_length() {
        let dict = dictionary(&["LENDS", "NEEDLESS"]);
        let bounds = SearchBounds {
            min_word_len: 6,
            ..SearchBounds::words(1)
        };
        let found = solve_letter_bank("LENDS", &dict, &bounds, &SearchControl::new());

        assert_eq!(single_words(&found), vec!["NEEDLESS"]);
    }

    #[test]
    fn letter_bank_set_invariant() {
        let dict = dictionary(&["AB", "BA", "C", "CAB", "ABBA"]);
        let found = solve_letter_bank("cab", &dict, &SearchBounds::default(), &SearchControl::new());

        assert!(!found.is_empty());
        let expected = crate::core::letter_set("ABC");
        for solution in &found {
            assert_eq!(crate::core::letter_set(&solution.concat()), expected, "{solution:?}");
        }
        assert!(found.contains(&vec!["CAB".to_string()]));
        assert!(found.contains(&vec!["AB".to_string(), "C".to_string()]));
        assert!(!found.contains(&vec!["ABBA".to_string()]));
    }

    #[test]
    fn letter_bank_two_words() {
        let dict = dictionary(&["AB", "BA", "C"]);
        let found = solve_letter_bank("ABC", &dict, &SearchBounds::words(2), &SearchControl::new());

        let joined: Vec<String> = found.iter().map(|s| s.join(" ")).collect();
        assert_eq!(joined, vec!["AB C", "BA C", "C AB", "C BA"]);
    }

    #[test]
    fn letter_bank_terminates_without_word_cap() {
        let dict = dictionary(&["A", "AA"]);
        let found = solve_letter_bank("A", &dict, &SearchBounds::default(), &SearchControl::new());

        // Capped at one word because the bank has one letter
        assert_eq!(found, vec![vec!["A".to_string()], vec!["AA".to_string()]]);
    }

    #[test]
    fn letter_bank_explicit_word_count_beyond_letters() {
        let dict = dictionary(&["A", "B"]);
        let found = solve_letter_bank("AB", &dict, &SearchBounds::words(3), &SearchControl::new());

        let joined: Vec<String> = found.iter().map(|s| s.join(" ")).collect();
        assert_eq!(joined, vec!["A A B", "A B A", "A B B", "B A A", "B A B", "B B A"]);
    }

    #[test]
    fn cancelled_search_returns_nothing() {
        let dict = dictionary(&["DOG", "GOD"]);
        let control = SearchControl::new();
        control.cancel();
        assert!(solve_transposal("dog", &dict, &SearchBounds::default(), &control).is_empty());
    }

    #[test]
    fn budget_stops_search() {
        let dict = dictionary(&["TO", "OT", "TOOT"]);
        let control = SearchControl::with_budget(2);
        let found = solve_transposal("TOOT", &dict, &SearchBounds::default(), &control);

        assert!(found.len() < 5);
        assert!(control.is_cancelled());
    }

    #[test]
    fn letters_missing_from_dictionary() {
        let dict = dictionary(&["DOG"]);
        assert!(solve_transposal("xyz", &dict, &SearchBounds::default(), &SearchControl::new()).is_empty());
        assert!(solve_letter_bank("", &dict, &SearchBounds::default(), &SearchControl::new()).is_empty());
    }
}
