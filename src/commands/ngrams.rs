//! N-gram table generation command

use crate::error::Result;
use crate::ngrams::FrequencyModel;
use serde::Serialize;
use std::io::{Read, Write};
use std::time::{Duration, Instant};

/// Summary of a generated frequency table
#[derive(Debug, Clone, Serialize)]
pub struct NgramSummary {
    pub ngram_size: usize,
    pub distinct: usize,
    #[serde(skip)]
    pub duration: Duration,
}

/// Count the n-grams of `corpus` and write the `ngram\tlog10 probability` table
///
/// # Errors
/// Returns [`crate::error::PuzzleError::InvalidNgramSize`] for `size == 0`,
/// [`crate::error::PuzzleError::ShortInput`] for a corpus shorter than one
/// n-gram, and any read or write error.
pub fn generate_ngrams<R: Read, W: Write>(corpus: R, size: usize, output: W) -> Result<NgramSummary> {
    let start = Instant::now();
    let model = FrequencyModel::from_corpus(corpus, size)?;
    model.write_tsv(output)?;

    Ok(NgramSummary {
        ngram_size: size,
        distinct: model.len(),
        duration: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;

    #[test]
    fn writes_readable_table() {
        let mut out = Vec::new();
        let summary = generate_ngrams("Hello, hello!".as_bytes(), 4, &mut out).unwrap();

        // HELLOHELLO -> HELL ELLO LLOH LOHE OHEL HELL ELLO
        assert_eq!(summary.distinct, 5);

        let table = String::from_utf8(out).unwrap();
        assert!(table.starts_with("ELLO\t"));
        let reloaded = FrequencyModel::from_tsv(table.as_bytes()).unwrap();
        assert_eq!(reloaded.len(), 5);
        let hell = reloaded.log_probability("HELL").unwrap();
        assert!((hell - (2.0f64 / 7.0).log10()).abs() < 1e-12);
    }

    #[test]
    fn zero_size_is_rejected() {
        let result = generate_ngrams("text".as_bytes(), 0, Vec::new());
        assert!(matches!(result, Err(PuzzleError::InvalidNgramSize)));
    }
}
