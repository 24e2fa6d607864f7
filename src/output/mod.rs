//! Terminal output formatting
//!
//! Colored text for people and JSON for scripts.

pub mod display;
pub mod formatters;

pub use display::{
    print_caesar_result, print_frequency_result, print_hillclimb_result, print_json,
    print_ngram_summary, print_substitution_result, print_word_list_result,
};
