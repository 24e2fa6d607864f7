//! Puzzle solving algorithms
//!
//! Word-list searches (transposals and letter banks) share one constrained
//! trie walk. Substitution ciphers are attacked either by exhaustive pattern
//! matching against a dictionary or by hill climbing against n-gram
//! statistics.

pub mod caesar;
pub mod constraint;
mod control;
pub mod hillclimb;
mod search;
pub mod substitution;

pub use caesar::{CaesarShift, caesar_shifts};
pub use constraint::{LetterConstraint, MultisetConstraint, SetConstraint};
pub use control::SearchControl;
pub use hillclimb::{HillClimber, HillclimbSolution, solve_hillclimb};
pub use search::{constrained_search, solve_letter_bank, solve_transposal};
pub use substitution::{ByteMap, SubstitutionSolution, WordMatchSet, solve_substitution};
