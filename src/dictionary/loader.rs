//! Dictionary and frequency table loading
//!
//! Dictionaries are streamed: a producer thread reads lines and sends them
//! over a bounded channel while the calling thread inserts them into the
//! trie. The channel closes when the producer runs out of input.

use crate::core::Trie;
use crate::error::Result;
use crate::ngrams::FrequencyModel;
use crossbeam_channel::{Receiver, bounded};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Lines buffered between the reader and the trie builder
const LINE_BUFFER: usize = 1024;

/// Path that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Build a dictionary trie from one word per line
///
/// Lines are trimmed and upper cased. Blank lines are skipped, as are lines
/// that are not purely alphabetic or not valid UTF-8. Duplicates are harmless.
///
/// # Errors
/// Returns the first I/O error hit while reading.
///
/// # Examples
/// ```
/// use puzzle_solver::dictionary::load_dictionary;
///
/// let trie = load_dictionary("dog\n\nGod\nit's\n".as_bytes()).unwrap();
/// assert!(trie.contains("DOG"));
/// assert!(trie.contains("GOD"));
/// assert_eq!(trie.len(), 2);
/// ```
pub fn load_dictionary<R: BufRead + Send>(reader: R) -> Result<Trie<()>> {
    let (sender, receiver) = bounded::<io::Result<Vec<u8>>>(LINE_BUFFER);

    std::thread::scope(|threads| {
        threads.spawn(move || {
            for line in reader.split(b'\n') {
                let failed = line.is_err();
                // A closed channel means the builder already gave up
                if sender.send(line).is_err() || failed {
                    break;
                }
            }
        });

        build_trie(receiver)
    })
}

fn build_trie(lines: Receiver<io::Result<Vec<u8>>>) -> Result<Trie<()>> {
    let mut trie = Trie::new();
    let mut skipped = 0_usize;

    for line in lines {
        let line = match String::from_utf8(line?) {
            Ok(line) => line,
            Err(err) => {
                let entry = String::from_utf8_lossy(err.as_bytes());
                debug!(%entry, "skipping non-UTF-8 dictionary entry");
                skipped += 1;
                continue;
            }
        };
        let word = line.trim().to_ascii_uppercase();
        if word.is_empty() {
            continue;
        }
        if trie.insert(&word, ()).is_err() {
            debug!(entry = %word, "skipping non-alphabetic dictionary entry");
            skipped += 1;
        }
    }

    info!(words = trie.len(), skipped, "dictionary loaded");
    Ok(trie)
}

/// Open a file for buffered reading, or standard input for `-`
///
/// # Errors
/// Returns an I/O error if the file can't be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    if path == Path::new(STDIN_PATH) {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Load a dictionary from a file path (`-` for standard input)
///
/// # Errors
/// Returns an I/O error if the file can't be opened or read.
pub fn load_dictionary_file<P: AsRef<Path>>(path: P) -> Result<Trie<()>> {
    load_dictionary(open_input(path.as_ref())?)
}

/// Load an n-gram frequency table from a file path (`-` for standard input)
///
/// # Errors
/// Returns an I/O error or the table's parse error.
pub fn load_frequency_file<P: AsRef<Path>>(path: P) -> Result<FrequencyModel> {
    FrequencyModel::from_tsv(open_input(path.as_ref())?)
}
