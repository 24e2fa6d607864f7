//! Pattern-matching solver for simple substitution ciphers
//!
//! # Algorithm
//! 1. Derive the shape pattern of every ciphertext word.
//! 2. Walk the dictionary once and collect, per ciphertext word, the words
//!    with the same pattern.
//! 3. Sort the words by candidate count so the most constrained go first.
//! 4. Backtrack across the words, extending a cipher → plain [`ByteMap`] and
//!    dropping any candidate that contradicts a letter already mapped.
//!
//! The first word's candidates are split round-robin across `concurrency`
//! workers. Every worker shares the remaining match lists read-only and sends
//! completed maps to one collector.

use super::control::SearchControl;
use crate::config::SubstitutionConfig;
use crate::core::letters::{ALPHABET_LEN, index_letter, letter_index};
use crate::core::{ShapePattern, Trie, letters_only};
use crate::ngrams::FrequencyModel;
use crossbeam_channel::Sender;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Cipher letter → plain letter assignments
///
/// Only per-letter consistency is enforced: two cipher letters may map to the
/// same plain letter. The map is `Copy`, so every branch of the search works
/// on its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteMap([Option<u8>; ALPHABET_LEN]);

impl ByteMap {
    #[must_use]
    pub const fn new() -> Self {
        Self([None; ALPHABET_LEN])
    }

    /// Plain letter for a cipher letter, if assigned
    #[must_use]
    pub fn get(&self, cipher: u8) -> Option<u8> {
        letter_index(cipher).and_then(|index| self.0[index])
    }

    /// Assign `cipher` → `plain`, replacing any previous assignment
    ///
    /// Returns false (and changes nothing) if `cipher` is not an upper case letter.
    pub fn assign(&mut self, cipher: u8, plain: u8) -> bool {
        match letter_index(cipher) {
            Some(index) => {
                self.0[index] = Some(plain);
                true
            }
            None => false,
        }
    }

    /// Remove the assignment for `cipher`
    pub fn clear(&mut self, cipher: u8) {
        if let Some(index) = letter_index(cipher) {
            self.0[index] = None;
        }
    }

    /// Number of assigned cipher letters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Assigned `(cipher, plain)` pairs in cipher-letter order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, plain)| plain.map(|p| (index_letter(index), p)))
    }

    /// A copy extended so that `cipher_word` reads as `plain_word`
    ///
    /// Returns `None` if any position contradicts an existing assignment.
    #[must_use]
    pub fn extended(&self, cipher_word: &str, plain_word: &str) -> Option<Self> {
        if cipher_word.len() != plain_word.len() {
            return None;
        }

        let mut map = *self;
        for (cipher, plain) in cipher_word.bytes().zip(plain_word.bytes()) {
            let index = letter_index(cipher)?;
            match map.0[index] {
                None => map.0[index] = Some(plain),
                Some(existing) if existing == plain => {}
                Some(_) => return None,
            }
        }
        Some(map)
    }

    /// Decode `text`, leaving unmapped letters and non-letters untouched
    #[must_use]
    pub fn decipher(&self, text: &str) -> String {
        text.bytes()
            .map(|byte| char::from(self.get(byte).unwrap_or(byte)))
            .collect()
    }

    /// Decode `text`, showing unmapped letters as `unknown`
    #[must_use]
    pub fn partial_decipher(&self, text: &str, unknown: char) -> String {
        text.bytes()
            .map(|byte| match (letter_index(byte), self.get(byte)) {
                (Some(_), Some(plain)) => char::from(plain),
                (Some(_), None) => unknown,
                (None, _) => char::from(byte),
            })
            .collect()
    }

    /// Assignments as characters, for display and serialization
    #[must_use]
    pub fn to_char_map(&self) -> BTreeMap<char, char> {
        self.iter()
            .map(|(cipher, plain)| (char::from(cipher), char::from(plain)))
            .collect()
    }
}

impl fmt::Display for ByteMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .iter()
            .map(|(cipher, plain)| format!("{}={}", char::from(cipher), char::from(plain)))
            .collect();
        f.write_str(&pairs.join(" "))
    }
}

/// Dictionary words that share a ciphertext word's shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatchSet {
    pub word: String,
    pub pattern: ShapePattern,
    pub matches: Vec<String>,
}

impl WordMatchSet {
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        let pattern = ShapePattern::of(&word);
        Self {
            word,
            pattern,
            matches: Vec::new(),
        }
    }
}

/// One consistent decryption of the ciphertext
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstitutionSolution {
    pub mapping: BTreeMap<char, char>,
    pub plaintext: String,
    /// N-gram fitness of the plaintext, when a frequency model was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness: Option<f64>,
}

/// Distinct ciphertext words, upper cased and stripped of non-letters
#[must_use]
pub fn cipher_words(ciphertext: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for word in ciphertext.split_whitespace().map(letters_only) {
        if !word.is_empty() && !words.contains(&word) {
            words.push(word);
        }
    }
    words
}

/// Collect the pattern matches of every word in one pass over the dictionary
#[must_use]
pub fn harvest_matches<V>(words: &[String], dictionary: &Trie<V>) -> Vec<WordMatchSet> {
    let mut sets: Vec<WordMatchSet> = words.iter().map(WordMatchSet::new).collect();

    let mut by_pattern: FxHashMap<ShapePattern, Vec<usize>> = FxHashMap::default();
    for (index, set) in sets.iter().enumerate() {
        by_pattern.entry(set.pattern.clone()).or_default().push(index);
    }

    for (entry, _) in dictionary.words() {
        if let Some(indexes) = by_pattern.get(&ShapePattern::of(&entry)) {
            for &index in indexes {
                sets[index].matches.push(entry.clone());
            }
        }
    }
    sets
}

/// Split a match set's candidates round-robin into `count` partitions
///
/// Partition `i` gets candidates `i`, `i + count`, `i + 2 * count`, ...
#[must_use]
pub fn partition_matches(count: usize, set: &WordMatchSet) -> Vec<WordMatchSet> {
    let count = count.max(1);
    let mut partitions: Vec<WordMatchSet> = (0..count)
        .map(|_| WordMatchSet {
            word: set.word.clone(),
            pattern: set.pattern.clone(),
            matches: Vec::with_capacity(set.matches.len() / count + 1),
        })
        .collect();

    for (index, candidate) in set.matches.iter().enumerate() {
        partitions[index % count].matches.push(candidate.clone());
    }
    partitions
}

/// Solve a substitution cipher against a dictionary
///
/// Returns every consistent byte map with its decipherment. When `model` is
/// given, solutions carry their n-gram fitness and are sorted best first;
/// otherwise they are sorted by plaintext. An empty result means no
/// consistent decryption exists.
#[must_use]
pub fn solve_substitution<V: Sync>(
    ciphertext: &str,
    dictionary: &Trie<V>,
    config: &SubstitutionConfig,
    model: Option<&FrequencyModel>,
    control: &SearchControl,
) -> Vec<SubstitutionSolution> {
    let words = cipher_words(ciphertext);
    let mut sets = harvest_matches(&words, dictionary);
    sets.sort_by_key(|set| set.matches.len());

    for set in &sets {
        debug!(word = %set.word, pattern = %set.pattern, matches = set.matches.len(), "pattern matches");
    }

    let maps = collect_valid_maps(&sets, config.concurrency, control);
    info!(solutions = maps.len(), "substitution search finished");

    let upper = ciphertext.to_ascii_uppercase();
    let mut solutions: Vec<SubstitutionSolution> = maps
        .into_iter()
        .map(|map| {
            let plaintext = map.decipher(&upper);
            SubstitutionSolution {
                mapping: map.to_char_map(),
                fitness: model.map(|m| m.fitness(&plaintext)),
                plaintext,
            }
        })
        .collect();

    solutions.sort_by(|a, b| match (a.fitness, b.fitness) {
        (Some(fa), Some(fb)) => fb.total_cmp(&fa).then_with(|| a.plaintext.cmp(&b.plaintext)),
        _ => a.plaintext.cmp(&b.plaintext),
    });
    solutions
}

/// Run the partitioned backtracking search over ordered match sets
///
/// `concurrency` is clamped to the first word's candidate count (0 counts as
/// "as many as there are candidates").
#[must_use]
pub fn collect_valid_maps(
    sets: &[WordMatchSet],
    concurrency: usize,
    control: &SearchControl,
) -> Vec<ByteMap> {
    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };
    if first.matches.is_empty() {
        return Vec::new();
    }

    let candidates = first.matches.len();
    let workers = if concurrency == 0 || concurrency > candidates {
        candidates
    } else {
        concurrency
    };
    let partitions = partition_matches(workers, first);
    let (sender, receiver) = crossbeam_channel::unbounded::<ByteMap>();

    std::thread::scope(|threads| {
        let collector = threads.spawn(move || receiver.iter().collect::<Vec<_>>());

        // The scope is the join barrier: it returns once every partition is done
        rayon::scope(|scope| {
            for partition in partitions {
                let backtracker = Backtracker {
                    control: control.clone(),
                    sender: sender.clone(),
                };
                scope.spawn(move |_| {
                    backtracker.extend(&partition.word, &partition.matches, rest, ByteMap::new());
                });
            }
        });
        drop(sender);

        collector
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })
}

struct Backtracker {
    control: SearchControl,
    sender: Sender<ByteMap>,
}

impl Backtracker {
    /// Try each candidate for `word` against `map`, recursing into `rest`
    fn extend(&self, word: &str, candidates: &[String], rest: &[WordMatchSet], map: ByteMap) {
        if !self.control.visit() {
            return;
        }

        for candidate in candidates {
            let Some(extended) = map.extended(word, candidate) else {
                continue;
            };
            match rest.split_first() {
                None => {
                    let _ = self.sender.send(extended);
                }
                Some((next, tail)) => self.extend(&next.word, &next.matches, tail, extended),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIPHERTEXT: &str = "BUXXUDR CPICXP TIZP";

    fn dictionary(words: &[&str]) -> Trie<()> {
        words.iter().collect()
    }

    fn solve(dict: &[&str], concurrency: usize) -> Vec<SubstitutionSolution> {
        solve_substitution(
            CIPHERTEXT,
            &dictionary(dict),
            &SubstitutionConfig { concurrency },
            None,
            &SearchControl::new(),
        )
    }

    #[test]
    fn harvest_groups_by_pattern() {
        let words = vec!["HELLO".to_string(), "CHEESES".to_string()];
        let sets = harvest_matches(&words, &dictionary(&["BLEED", "WHEESES", "BOLT", "BOSSY"]));

        assert_eq!(sets[0].pattern.as_str(), "ABCCD");
        assert_eq!(sets[0].matches, vec!["BLEED", "BOSSY"]);
        assert_eq!(sets[1].matches, vec!["WHEESES"]);
    }

    #[test]
    fn partitions_round_robin() {
        let mut set = WordMatchSet::new("HELLO");
        set.matches = ["YUCCA", "WATTS", "VROOM", "VILLA", "SWEET"]
            .map(String::from)
            .to_vec();

        let five = partition_matches(5, &set);
        assert_eq!(five.len(), 5);
        assert_eq!(five[0].matches, vec!["YUCCA"]);

        let one = partition_matches(1, &set);
        assert_eq!(one[0].matches.len(), 5);

        let two = partition_matches(2, &set);
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].matches, vec!["YUCCA", "VROOM", "SWEET"]);
        assert_eq!(two[1].matches, vec!["WATTS", "VILLA"]);
        assert!(two.iter().all(|p| p.word == "HELLO"));
    }

    #[test]
    fn byte_map_rejects_conflicts() {
        let map = ByteMap::new().extended("ABB", "SEE").unwrap();
        assert_eq!(map.get(b'A'), Some(b'S'));
        assert_eq!(map.len(), 2);

        assert!(map.extended("BA", "ES").is_some());
        assert!(map.extended("BA", "XS").is_none());
        // the original is untouched by a failed extension
        assert_eq!(map.get(b'B'), Some(b'E'));
    }

    #[test]
    fn byte_map_is_not_required_to_be_injective() {
        let map = ByteMap::new().extended("AB", "SS").unwrap();
        assert_eq!(map.get(b'A'), map.get(b'B'));
    }

    #[test]
    fn byte_map_deciphers() {
        let mut map = ByteMap::new();
        map.assign(b'X', b'H');
        map.assign(b'Y', b'I');

        assert_eq!(map.decipher("XY, Z!"), "HI, Z!");
        assert_eq!(map.partial_decipher("XY, Z!", '_'), "HI, _!");
        assert_eq!(map.to_string(), "X=H Y=I");

        map.clear(b'X');
        assert_eq!(map.partial_decipher("XY", '_'), "_I");
        assert!(!map.assign(b'x', b'H'));
    }

    #[test]
    fn solves_known_cipher() {
        let solutions = solve(&["WILLING", "PEOPLE", "SOME"], 4);
        assert_eq!(solutions.len(), 1);

        let expected: BTreeMap<char, char> = [
            ('B', 'W'),
            ('U', 'I'),
            ('X', 'L'),
            ('D', 'N'),
            ('R', 'G'),
            ('C', 'P'),
            ('P', 'E'),
            ('I', 'O'),
            ('T', 'S'),
            ('Z', 'M'),
        ]
        .into_iter()
        .collect();
        assert_eq!(solutions[0].mapping, expected);
        assert_eq!(solutions[0].plaintext, "WILLING PEOPLE SOME");
        assert_eq!(solutions[0].fitness, None);
    }

    #[test]
    fn solution_counts_depend_on_dictionary() {
        assert!(solve(&["BOSOMY", "HELLFIRE", "CRUTCH"], 4).is_empty());

        let solutions = solve(&["WILLING", "PEOPLE", "SOME", "SUCCUMB", "THATCH", "GASH"], 4);
        let plaintexts: Vec<&str> = solutions.iter().map(|s| s.plaintext.as_str()).collect();
        assert_eq!(plaintexts, vec!["SUCCUMB THATCH GASH", "WILLING PEOPLE SOME"]);
    }

    #[test]
    fn concurrency_does_not_change_results() {
        let dict = ["WILLING", "PEOPLE", "SOME", "SUCCUMB", "THATCH", "GASH"];
        let baseline = solve(&dict, 1);
        for concurrency in [0, 2, 3, 100] {
            assert_eq!(solve(&dict, concurrency), baseline, "concurrency {concurrency}");
        }
    }

    #[test]
    fn word_without_matches_is_unsatisfiable() {
        let sets = harvest_matches(
            &cipher_words("ABC XYZZY"),
            &dictionary(&["THE", "AND"]),
        );
        assert!(collect_valid_maps(&sets, 4, &SearchControl::new()).is_empty());
    }

    #[test]
    fn duplicate_words_are_merged() {
        assert_eq!(cipher_words("abc, ABC xy!"), vec!["ABC", "XY"]);
        assert!(cipher_words(" ... ").is_empty());
    }

    #[test]
    fn model_ranks_solutions() {
        let model = FrequencyModel::from_tsv("SOM\t-1.0\nOME\t-1.0\n".as_bytes()).unwrap();
        let solutions = solve_substitution(
            CIPHERTEXT,
            &dictionary(&["WILLING", "PEOPLE", "SOME", "SUCCUMB", "THATCH", "GASH"]),
            &SubstitutionConfig::default(),
            Some(&model),
            &SearchControl::new(),
        );

        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].plaintext, "WILLING PEOPLE SOME");
        assert!(solutions[0].fitness > solutions[1].fitness);
    }

    #[test]
    fn cancelled_solver_returns_nothing() {
        let control = SearchControl::new();
        control.cancel();
        let solutions = solve_substitution(
            CIPHERTEXT,
            &dictionary(&["WILLING", "PEOPLE", "SOME"]),
            &SubstitutionConfig::default(),
            None,
            &control,
        );
        assert!(solutions.is_empty());
    }
}
