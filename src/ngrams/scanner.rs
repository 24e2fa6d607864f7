//! Sliding-window n-gram scanner
//!
//! Streams fixed-width windows of upper case letters out of any reader.
//! Non-letters are skipped entirely: they do not count toward the window and
//! they do not reset it. "Hello, you" at width 4 gives HELL, ELLO, LLOY, LOYO,
//! OYOU.

use crate::error::{PuzzleError, Result};
use std::io::{BufReader, Bytes, Read};

/// Iterator over the n-grams of a byte stream
///
/// Finite and not restartable. If the stream ends before the first window is
/// full, the scanner yields a single [`PuzzleError::ShortInput`] and then stops.
///
/// # Examples
/// ```
/// use puzzle_solver::ngrams::NgramScanner;
///
/// let grams: Vec<String> = NgramScanner::new("Hello, you!".as_bytes(), 4)
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(grams, ["HELL", "ELLO", "LLOY", "LOYO", "OYOU"]);
/// ```
pub struct NgramScanner<R: Read> {
    bytes: Bytes<BufReader<R>>,
    window: Vec<u8>,
    size: usize,
    finished: bool,
}

impl<R: Read> NgramScanner<R> {
    /// Create a scanner producing windows of `size` letters
    ///
    /// # Errors
    /// Returns [`PuzzleError::InvalidNgramSize`] if `size` is 0.
    pub fn new(reader: R, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(PuzzleError::InvalidNgramSize);
        }
        Ok(Self {
            bytes: BufReader::new(reader).bytes(),
            window: Vec::with_capacity(size),
            size,
            finished: false,
        })
    }

    /// Next letter from the stream, upper cased, skipping everything else
    fn next_letter(&mut self) -> Option<Result<u8>> {
        loop {
            match self.bytes.next()? {
                Ok(byte) if byte.is_ascii_alphabetic() => {
                    return Some(Ok(byte.to_ascii_uppercase()));
                }
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }
        }
    }

    fn current(&self) -> String {
        self.window.iter().copied().map(char::from).collect()
    }
}

impl<R: Read> Iterator for NgramScanner<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        // Slide: drop the oldest letter once the window is full
        if self.window.len() == self.size {
            match self.next_letter() {
                Some(Ok(letter)) => {
                    self.window.remove(0);
                    self.window.push(letter);
                    return Some(Ok(self.current()));
                }
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }

        // First fill
        while self.window.len() < self.size {
            match self.next_letter() {
                Some(Ok(letter)) => self.window.push(letter),
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    return Some(Err(PuzzleError::ShortInput { size: self.size }));
                }
            }
        }
        Some(Ok(self.current()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str, size: usize) -> Result<Vec<String>> {
        NgramScanner::new(input.as_bytes(), size)?.collect()
    }

    #[test]
    fn scans_across_punctuation() {
        assert_eq!(
            scan("Hello, you!", 4).unwrap(),
            vec!["HELL", "ELLO", "LLOY", "LOYO", "OYOU"]
        );
    }

    #[test]
    fn skips_leading_junk() {
        assert_eq!(scan("...Hello", 4).unwrap(), vec!["HELL", "ELLO"]);
    }

    #[test]
    fn short_input_is_an_error() {
        assert!(matches!(
            scan("...He", 3),
            Err(PuzzleError::ShortInput { size: 3 })
        ));
        assert!(scan("", 1).is_err());
    }

    #[test]
    fn unigrams() {
        assert_eq!(scan("he", 1).unwrap(), vec!["H", "E"]);
    }

    #[test]
    fn exact_fit_gives_one_window() {
        assert_eq!(scan("a-b-c", 3).unwrap(), vec!["ABC"]);
    }

    #[test]
    fn zero_size_rejected() {
        assert!(matches!(
            NgramScanner::new("abc".as_bytes(), 0),
            Err(PuzzleError::InvalidNgramSize)
        ));
    }

    #[test]
    fn ends_after_short_input_error() {
        let mut scanner = NgramScanner::new("ab".as_bytes(), 3).unwrap();
        assert!(scanner.next().unwrap().is_err());
        assert!(scanner.next().is_none());
    }
}
