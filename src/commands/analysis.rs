//! Quick cipher analysis: letter frequencies and Caesar shifts

use crate::core::{LetterFrequency, letter_frequencies};
use crate::solver::{CaesarShift, caesar_shifts};
use serde::Serialize;

/// Single-letter frequency table of a text
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyResult {
    pub text: String,
    pub total_letters: usize,
    pub letters: Vec<LetterFrequency>,
}

/// Count the upper case letters of `text`; lower case letters are skipped
#[must_use]
pub fn analyze_frequencies(text: &str) -> FrequencyResult {
    let letters = letter_frequencies(text);
    FrequencyResult {
        text: text.to_string(),
        total_letters: letters.iter().map(|f| f.count).sum(),
        letters,
    }
}

/// Every Caesar shift of a text
#[derive(Debug, Clone, Serialize)]
pub struct CaesarResult {
    pub text: String,
    pub shifts: Vec<CaesarShift>,
}

#[must_use]
pub fn caesar(text: &str) -> CaesarResult {
    CaesarResult {
        text: text.to_string(),
        shifts: caesar_shifts(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_upper_case_only() {
        let result = analyze_frequencies("D'M D'LL");
        assert_eq!(result.total_letters, 5);
        assert_eq!(result.letters[0].letter, 'D');
        assert_eq!(result.letters[0].count, 2);

        assert_eq!(analyze_frequencies("%$a'").total_letters, 0);
    }

    #[test]
    fn caesar_lists_all_shifts() {
        let result = caesar("Abc");
        assert_eq!(result.shifts.len(), 25);
        assert_eq!(result.shifts[0].text, "Bcd");
    }
}
