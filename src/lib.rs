//! Puzzle Solver
//!
//! Word-puzzle and cryptogram tools built on a shared letter trie: transposals,
//! letter banks, dictionary-driven substitution solving, n-gram hill climbing
//! and Caesar shifts.
//!
//! # Quick Start
//!
//! ```rust
//! use puzzle_solver::config::SearchBounds;
//! use puzzle_solver::dictionary::load_dictionary;
//! use puzzle_solver::solver::{SearchControl, solve_letter_bank};
//!
//! let dictionary = load_dictionary("lends\nneedless\ndell\n".as_bytes()).unwrap();
//! let banks = solve_letter_bank("lends", &dictionary, &SearchBounds::words(1), &SearchControl::new());
//! assert_eq!(banks, vec![vec!["LENDS"], vec!["NEEDLESS"]]);
//! ```

// Core domain types
pub mod core;

// N-gram scanning and frequency models
pub mod ngrams;

// Solving algorithms
pub mod solver;

// Dictionary and frequency table loading
pub mod dictionary;

pub mod config;
pub mod error;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub mod logging;

pub use error::{PuzzleError, Result};
