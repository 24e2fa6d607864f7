//! Shape patterns for substitution ciphers
//!
//! A shape pattern records which positions of a word hold the same letter.
//! The first distinct letter becomes 'A', the second 'B' and so on, so
//! `HELLO` becomes `ABCCD`. Two words can only be substitution-equivalent if
//! their patterns are equal.

use rustc_hash::FxHashMap;

/// Shape pattern of a word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapePattern(String);

impl ShapePattern {
    /// Derive the pattern of `word`
    ///
    /// # Examples
    /// ```
    /// use puzzle_solver::core::ShapePattern;
    ///
    /// assert_eq!(ShapePattern::of("HELLO").as_str(), "ABCCD");
    /// assert_eq!(ShapePattern::of("A").as_str(), "A");
    /// assert_eq!(ShapePattern::of("HELLO"), ShapePattern::of("JAKKO"));
    /// ```
    #[must_use]
    pub fn of(word: &str) -> Self {
        let mut symbols: FxHashMap<u8, u8> = FxHashMap::default();
        let mut next = b'A';

        let pattern = word
            .bytes()
            .map(|byte| {
                let symbol = *symbols.entry(byte).or_insert_with(|| {
                    let symbol = next;
                    next = next.wrapping_add(1);
                    symbol
                });
                char::from(symbol)
            })
            .collect();

        Self(pattern)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters in the pattern
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ShapePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_patterns() {
        for (input, expected) in [
            ("HELLO", "ABCCD"),
            ("A", "A"),
            ("WILLING", "ABCCBDE"),
            ("PEOPLE", "ABCADB"),
            ("SOME", "ABCD"),
            ("CHEESES", "ABCCDCD"),
        ] {
            assert_eq!(ShapePattern::of(input).as_str(), expected, "pattern of {input}");
        }
    }

    #[test]
    fn empty_word_has_empty_pattern() {
        assert!(ShapePattern::of("").is_empty());
    }

    #[test]
    fn invariant_under_substitution() {
        // Apply a fixed one-to-one substitution (shift by 7) and compare
        let shift = |word: &str| -> String {
            word.bytes()
                .map(|b| char::from(b'A' + (b - b'A' + 7) % 26))
                .collect()
        };

        for word in ["HELLO", "MISSISSIPPI", "BOOKKEEPER", "XYZ"] {
            assert_eq!(ShapePattern::of(word), ShapePattern::of(&shift(word)));
        }
    }

    #[test]
    fn different_shapes_differ() {
        assert_ne!(ShapePattern::of("HELLO"), ShapePattern::of("WORLD"));
        assert_eq!(ShapePattern::of("HELLO").len(), 5);
    }
}
