//! Letter-indexed trie
//!
//! The trie only accepts upper case alphabetic strings. Each node holds one
//! child slot per letter (index = letter - 'A'), a word-boundary marker and an
//! optional payload. It is built once and then shared read-only by the solvers.

use super::letters::{ALPHABET_LEN, index_letter, letter_index};
use crate::error::{PuzzleError, Result};
use tracing::debug;

/// One prefix position in the trie
#[derive(Debug, Clone)]
pub struct TrieNode<V> {
    letter: Option<u8>,
    value: Option<V>,
    children: [Option<Box<TrieNode<V>>>; ALPHABET_LEN],
}

impl<V> TrieNode<V> {
    fn new(letter: Option<u8>) -> Self {
        Self {
            letter,
            value: None,
            children: std::array::from_fn(|_| None),
        }
    }

    /// The letter this node represents (`None` for the root)
    #[inline]
    #[must_use]
    pub const fn letter(&self) -> Option<u8> {
        self.letter
    }

    /// True iff a complete word ends at this node
    #[inline]
    #[must_use]
    pub const fn is_word(&self) -> bool {
        self.value.is_some()
    }

    /// Payload stored for the word ending here
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Child for an upper case letter, if present
    #[inline]
    #[must_use]
    pub fn child(&self, letter: u8) -> Option<&Self> {
        letter_index(letter).and_then(|index| self.children[index].as_deref())
    }

    /// Traversal steps out of this node, in letter order
    ///
    /// Yields every present child, followed by a single [`TrieStep::WordBreak`]
    /// when a word ends here. The trailing word break lets a search both close
    /// the current word and keep extending it ("TO" as well as "TORO").
    pub fn steps(&self) -> impl Iterator<Item = TrieStep<'_, V>> {
        let children = self
            .children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| {
                child
                    .as_deref()
                    .map(|node| TrieStep::Letter(index_letter(index), node))
            });
        children.chain(self.is_word().then_some(TrieStep::WordBreak))
    }
}

/// A single move available while walking the trie
#[derive(Debug)]
pub enum TrieStep<'a, V> {
    /// Descend into the child for this letter
    Letter(u8, &'a TrieNode<V>),
    /// The current node ends a word
    WordBreak,
}

/// Trie of upper case words with a payload per word
///
/// # Examples
/// ```
/// use puzzle_solver::core::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("TORO", 2).unwrap();
/// trie.insert("TO", 1).unwrap();
///
/// assert_eq!(trie.get("TO"), Some(&1));
/// assert_eq!(trie.get("TOR"), None); // a prefix is not a word
/// assert!(trie.insert("toro", 3).is_err());
/// assert_eq!(trie.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Trie<V> {
    root: TrieNode<V>,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(None),
        }
    }

    /// The root node (represents the empty prefix, never a word)
    #[inline]
    #[must_use]
    pub const fn root(&self) -> &TrieNode<V> {
        &self.root
    }

    /// Insert `word` with `value`, overwriting any previous payload
    ///
    /// # Errors
    /// Returns [`PuzzleError::InvalidWord`] unless `word` matches `^[A-Z]+$`.
    pub fn insert(&mut self, word: &str, value: V) -> Result<()> {
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(PuzzleError::InvalidWord(word.to_string()));
        }

        let mut node = &mut self.root;
        for letter in word.bytes() {
            let index = usize::from(letter - b'A');
            node = node.children[index]
                .get_or_insert_with(|| Box::new(TrieNode::new(Some(letter))))
                .as_mut();
        }
        node.value = Some(value);
        Ok(())
    }

    /// Look up the payload for `word`
    ///
    /// Returns `None` if any link is missing or if the walk stops on a prefix
    /// that is not itself a word.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&V> {
        self.node(word).and_then(TrieNode::value)
    }

    /// Mutable access to the payload for `word`
    pub fn get_mut(&mut self, word: &str) -> Option<&mut V> {
        let mut node = &mut self.root;
        for letter in word.bytes() {
            let index = letter_index(letter)?;
            node = node.children[index].as_deref_mut()?;
        }
        node.value.as_mut()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Node reached by walking `prefix`, whether or not it ends a word
    #[must_use]
    pub fn node(&self, prefix: &str) -> Option<&TrieNode<V>> {
        prefix
            .bytes()
            .try_fold(&self.root, |node, letter| node.child(letter))
    }

    /// Number of words in the trie
    ///
    /// Computed by enumerating every word; nothing is cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words().next().is_none()
    }

    /// Lazily enumerate `(word, payload)` pairs depth first, in letter order
    ///
    /// Each call starts a fresh traversal.
    #[must_use]
    pub fn words(&self) -> Words<'_, V> {
        Words {
            stack: vec![(&self.root, String::new())],
        }
    }
}

/// Depth-first iterator over the words of a [`Trie`]
pub struct Words<'a, V> {
    stack: Vec<(&'a TrieNode<V>, String)>,
}

impl<'a, V> Iterator for Words<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, prefix)) = self.stack.pop() {
            // Reverse so the lowest letter is popped first
            for child in node.children.iter().rev().flatten() {
                let mut word = prefix.clone();
                if let Some(letter) = child.letter {
                    word.push(char::from(letter));
                }
                self.stack.push((child.as_ref(), word));
            }

            if let Some(value) = node.value.as_ref() {
                return Some((prefix, value));
            }
        }
        None
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie<()> {
    /// Build a dictionary trie, skipping entries that are not upper case words
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Self::new();
        for word in iter {
            let word = word.as_ref();
            if let Err(err) = trie.insert(word, ()) {
                debug!(entry = word, %err, "skipping dictionary entry");
            }
        }
        trie
    }
}
