//! N-gram scanning and the frequency model used for fitness scoring

mod frequency;
mod scanner;

pub use frequency::{
    DEFAULT_NGRAM_SIZE, FrequencyModel, UNSEEN_NGRAM_PENALTY, count_ngrams,
};
pub use scanner::NgramScanner;
