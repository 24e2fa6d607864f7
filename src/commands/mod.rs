//! Command implementations

pub mod analysis;
pub mod hillclimb;
pub mod ngrams;
pub mod repl;
pub mod substitution;
pub mod word_list;

pub use analysis::{CaesarResult, FrequencyResult, analyze_frequencies, caesar};
pub use hillclimb::{HillclimbResult, run_hillclimb};
pub use ngrams::{NgramSummary, generate_ngrams};
pub use repl::{ReplCommand, ReplSession, run_repl};
pub use substitution::{SubstitutionResult, solve_cipher};
pub use word_list::{WordListKind, WordListResult, WordListSolution, find_word_lists};
