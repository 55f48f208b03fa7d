//! # Wordle Trie
//!
//! A Wordle solver built on a prefix tree.
//!
//! Every valid word lives in a [`Trie`]. After each guess the feedback is
//! turned into [`Constraints`] and the tree is pruned in place, dropping
//! whole branches as soon as a prefix breaks a positional rule. The next
//! guess is the surviving word whose letters are most common at their
//! positions among the survivors.

pub mod config;
pub mod constraints;
pub mod error;
pub mod feedback;
pub mod frequency;
pub mod prune;
pub mod solver;
pub mod trie;

pub use config::SolverConfig;
pub use constraints::{Constraints, Rules};
pub use error::{Result, SolverError};
pub use feedback::{Feedback, FeedbackPattern};
pub use frequency::FrequencyMatrix;
pub use prune::PruneReport;
pub use solver::{GuessScore, WordleSolver};
pub use trie::{Trie, TrieNode};

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;

/// Load the dictionary from the embedded file
pub fn load_dictionary() -> Trie {
    Trie::from_words(
        WORD_LENGTH,
        include_str!("../dictionary/dictionary.txt").lines(),
    )
}

/// Load the embedded dictionary for words of `word_length` letters.
///
/// Only [`WORD_LENGTH`]-letter words are embedded; any other length needs a
/// word list of its own.
pub fn dictionary_for_length(word_length: usize) -> Result<Trie> {
    if word_length != WORD_LENGTH {
        return Err(SolverError::NoDictionary { word_length });
    }
    Ok(load_dictionary())
}
