//! Core domain types
//!
//! The trie dictionary index, shape patterns and letter helpers. Everything
//! here is single-threaded and read-only once built.

pub mod letters;
mod pattern;
mod trie;

pub use letters::{LetterFrequency, letter_counts, letter_frequencies, letter_set, letters_only};
pub use pattern::ShapePattern;
pub use trie::{Trie, TrieNode, TrieStep, Words};
