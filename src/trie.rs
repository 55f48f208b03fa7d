//! Prefix tree holding the candidate words.
//!
//! The tree is the only state that survives from one round to the next.
//! Words go in once through [`Trie::insert`] or one of the source loaders,
//! and come out only through [`Trie::prune`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};

use crate::constraints::Constraints;
use crate::error::Result;
use crate::prune::{self, PruneReport};
use crate::WORD_LENGTH;

/// A single node of the tree.
///
/// Children are keyed by letter and owned by value, so dropping a node drops
/// its whole subtree. A [`BTreeMap`] keeps traversal order lexicographic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    pub(crate) children: BTreeMap<char, TrieNode>,
    pub(crate) is_end_of_word: bool,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &BTreeMap<char, TrieNode> {
        &self.children
    }

    pub fn child(&self, letter: char) -> Option<&TrieNode> {
        self.children.get(&letter)
    }

    /// True when the path from the root to this node spells a word.
    pub fn is_end_of_word(&self) -> bool {
        self.is_end_of_word
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The candidate-word space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie {
    root: TrieNode,
    word_length: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new(WORD_LENGTH)
    }
}

impl Trie {
    pub fn new(word_length: usize) -> Self {
        Self {
            root: TrieNode::new(),
            word_length,
        }
    }

    /// Build a tree from an iterator of words, trimming and lowercasing each
    /// one and skipping blanks.
    pub fn from_words<I, S>(word_length: usize, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new(word_length);
        for word in words {
            trie.ingest_line(word.as_ref());
        }
        trie
    }

    /// Build a tree from a newline-separated word source.
    pub fn from_source<R: BufRead>(word_length: usize, source: R) -> Result<Self> {
        let mut trie = Self::new(word_length);
        trie.build_from_source(source)?;
        Ok(trie)
    }

    /// Build a tree from a word list on disk.
    pub fn from_path(word_length: usize, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading word list from {}", path.display());
        let file = File::open(path)?;
        Self::from_source(word_length, BufReader::new(file))
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Insert a word. Inserting a word that is already present does nothing,
    /// and any character sequence is accepted.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for letter in word.chars() {
            node = node.children.entry(letter).or_default();
        }
        node.is_end_of_word = true;
    }

    /// Insert every line of `source`, trimmed and lowercased. Blank lines
    /// are skipped.
    ///
    /// Returns the number of lines that were inserted.
    pub fn build_from_source<R: BufRead>(&mut self, source: R) -> Result<usize> {
        let mut inserted = 0;
        for line in source.lines() {
            if self.ingest_line(&line?) {
                inserted += 1;
            }
        }
        debug!("ingested {} words, {} candidates", inserted, self.len());
        Ok(inserted)
    }

    fn ingest_line(&mut self, line: &str) -> bool {
        let word = line.trim().to_lowercase();
        if word.is_empty() {
            trace!("skipping blank source line");
            return false;
        }
        self.insert(&word);
        true
    }

    /// True when `word` is a complete path in the tree.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = &self.root;
        for letter in word.chars() {
            match node.children.get(&letter) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_end_of_word
    }

    /// Every complete word of the configured length, in lexicographic order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::new();
        self.for_each_word(|word| words.push(word.iter().collect()));
        words
    }

    /// Number of complete words of the configured length.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.for_each_word(|_| count += 1);
        count
    }

    /// True when no word of the configured length is left. Stops at the
    /// first word found.
    pub fn is_empty(&self) -> bool {
        !has_word(&self.root, 0, self.word_length)
    }

    /// Visit every complete word of the configured length in lexicographic
    /// order. The callback sees the word as a slice of letters.
    pub fn for_each_word<F: FnMut(&[char])>(&self, mut visit: F) {
        let mut prefix = Vec::with_capacity(self.word_length);
        walk(&self.root, &mut prefix, self.word_length, &mut visit);
    }

    /// Remove every word that violates `constraints`.
    ///
    /// The constraints are checked before the tree is touched, so a
    /// malformed round leaves the candidates as they were.
    pub fn prune(&mut self, constraints: &Constraints) -> Result<PruneReport> {
        self.prune_with(constraints, false)
    }

    /// Like [`Trie::prune`], but prunes the root's branches on the rayon pool.
    pub fn par_prune(&mut self, constraints: &Constraints) -> Result<PruneReport> {
        self.prune_with(constraints, true)
    }

    pub(crate) fn prune_with(
        &mut self,
        constraints: &Constraints,
        parallel: bool,
    ) -> Result<PruneReport> {
        let rules = constraints.compile(self.word_length)?;
        let before = self.len();

        let root = std::mem::take(&mut self.root);
        let (pruned, after) = if parallel {
            prune::prune_root_parallel(root, &rules)
        } else {
            prune::prune_root(root, &rules)
        };
        // An emptied tree restarts from a fresh root.
        self.root = pruned.unwrap_or_default();

        let report = PruneReport { before, after };
        debug!(
            "pruned {} of {} candidates",
            report.eliminated(),
            report.before
        );
        Ok(report)
    }
}

fn has_word(node: &TrieNode, depth: usize, word_length: usize) -> bool {
    if depth == word_length {
        return node.is_end_of_word;
    }
    node.children
        .values()
        .any(|child| has_word(child, depth + 1, word_length))
}

fn walk<F: FnMut(&[char])>(
    node: &TrieNode,
    prefix: &mut Vec<char>,
    word_length: usize,
    visit: &mut F,
) {
    if node.is_end_of_word && prefix.len() == word_length {
        visit(&prefix[..]);
    }
    if prefix.len() >= word_length {
        return;
    }
    for (&letter, child) in &node.children {
        prefix.push(letter);
        walk(child, prefix, word_length, visit);
        prefix.pop();
    }
}
