//! Errors produced by the solver.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolverError>;

/// The errors that `wordle_trie` can produce.
///
/// An empty candidate set is deliberately absent from this list: pruning
/// every word away leaves an empty [`Trie`](crate::Trie) and the selector
/// returns `None`, and the caller decides what that means.
#[derive(Debug, Error)]
pub enum SolverError {
    /// One round of feedback claimed two different letters for the same
    /// position. This means the feedback source is corrupt.
    #[error("position {position} is claimed by both '{existing}' and '{conflicting}'")]
    ConflictingExactPosition {
        position: usize,
        existing: char,
        conflicting: char,
    },

    /// A constraint names a position that does not exist in a word of the
    /// configured length.
    #[error("constraint '{letter}' at position {position} is outside a {word_length}-letter word")]
    PositionOutOfRange {
        letter: char,
        position: usize,
        word_length: usize,
    },

    /// A feedback pattern string could not be parsed.
    #[error("invalid feedback pattern \"{0}\"")]
    InvalidPattern(String),

    /// A word does not have the length the solver was configured for.
    #[error("\"{word}\" does not have {expected} letters")]
    LengthMismatch { word: String, expected: usize },

    /// No built-in word list exists for the requested word length.
    #[error("no built-in dictionary of {word_length}-letter words, supply a word list")]
    NoDictionary { word_length: usize },

    /// Reading the word source failed.
    #[error("could not read word source")]
    Io(#[from] std::io::Error),
}
