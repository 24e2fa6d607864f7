//! Letter helpers shared by the solvers
//!
//! Everything in the engine works on upper case ASCII letters. Index 0 is 'A'.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Number of letters in the alphabet the engine understands
pub const ALPHABET_LEN: usize = 26;

/// Letters in alphabet order
pub const ALPHABET: [u8; ALPHABET_LEN] = *b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Position of an upper case letter in the alphabet
///
/// Returns `None` for anything outside `A..=Z`.
#[inline]
#[must_use]
pub const fn letter_index(letter: u8) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some((letter - b'A') as usize)
    } else {
        None
    }
}

/// Letter for an alphabet position (0-25)
///
/// # Panics
/// Panics if `index >= 26`
#[inline]
#[must_use]
pub const fn index_letter(index: usize) -> u8 {
    ALPHABET[index]
}

/// Upper case every letter and drop everything else
///
/// # Examples
/// ```
/// use puzzle_solver::core::letters_only;
///
/// assert_eq!(letters_only("Hello, you!"), "HELLOYOU");
/// ```
#[must_use]
pub fn letters_only(text: &str) -> String {
    text.bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| char::from(b.to_ascii_uppercase()))
        .collect()
}

/// Count each letter of `text`, ignoring case and non-letters
///
/// The map never contains a zero count.
#[must_use]
pub fn letter_counts(text: &str) -> FxHashMap<u8, usize> {
    let mut counts = FxHashMap::default();
    for letter in text.bytes().filter(u8::is_ascii_alphabetic) {
        *counts.entry(letter.to_ascii_uppercase()).or_insert(0) += 1;
    }
    counts
}

/// Unique letters of `text`, ignoring case and non-letters
#[must_use]
pub fn letter_set(text: &str) -> BTreeSet<u8> {
    text.bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase())
        .collect()
}

/// One row of a single-letter frequency table
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LetterFrequency {
    pub letter: char,
    pub count: usize,
    pub percent: f64,
}

/// Single-letter frequency table for the upper case letters in `text`
///
/// Lower case letters are not counted; cryptograms are conventionally written
/// in upper case and lower case is reserved for solved plaintext. Rows are
/// ordered by descending count, then alphabetically.
#[must_use]
pub fn letter_frequencies(text: &str) -> Vec<LetterFrequency> {
    let mut counts = [0usize; ALPHABET_LEN];
    let mut total = 0usize;
    for index in text.bytes().filter_map(letter_index) {
        counts[index] += 1;
        total += 1;
    }

    let mut rows: Vec<LetterFrequency> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(index, &count)| LetterFrequency {
            letter: char::from(index_letter(index)),
            count,
            percent: 100.0 * count as f64 / total as f64,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.letter.cmp(&b.letter)));
    rows
}
