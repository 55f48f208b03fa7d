//! Letter-position frequency model.

use crate::trie::Trie;

const ALPHABET: usize = 26;

fn letter_index(letter: char) -> Option<usize> {
    letter
        .is_ascii_lowercase()
        .then(|| (letter as u8 - b'a') as usize)
}

/// How often each letter `a`..`z` occurs at each position across the
/// surviving words, as a fraction of the word count.
///
/// This is a value recomputed from the tree every round, never stored
/// alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyMatrix {
    cells: Vec<[f64; ALPHABET]>,
    total_words: usize,
}

impl FrequencyMatrix {
    /// Count every complete word in `trie` and normalize by the word count.
    /// An empty tree yields an all-zero matrix.
    pub fn from_trie(trie: &Trie) -> Self {
        let mut cells = vec![[0.0; ALPHABET]; trie.word_length()];
        let mut total_words = 0;

        trie.for_each_word(|word| {
            total_words += 1;
            for (position, &letter) in word.iter().enumerate() {
                if let Some(idx) = letter_index(letter) {
                    cells[position][idx] += 1.0;
                }
            }
        });

        if total_words > 0 {
            let total = total_words as f64;
            for cell in cells.iter_mut().flat_map(|row| row.iter_mut()) {
                *cell /= total;
            }
        }

        Self { cells, total_words }
    }

    /// Frequency of `letter` at `position`. Anything outside the table is 0.
    pub fn get(&self, letter: char, position: usize) -> f64 {
        match (letter_index(letter), self.cells.get(position)) {
            (Some(idx), Some(row)) => row[idx],
            _ => 0.0,
        }
    }

    pub fn word_length(&self) -> usize {
        self.cells.len()
    }

    /// Number of words the matrix was computed from.
    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn column_sum(&self, position: usize) -> f64 {
        self.cells
            .get(position)
            .map_or(0.0, |row| row.iter().sum())
    }

    /// Score a word: the sum of its letters' frequencies at their positions.
    ///
    /// A repeated letter contributes once per occurrence, so words with
    /// doubled common letters can outscore words with more variety.
    pub fn score(&self, word: &[char]) -> f64 {
        word.iter()
            .enumerate()
            .map(|(position, &letter)| self.get(letter, position))
            .sum()
    }
}
