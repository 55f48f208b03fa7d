//! Solver configuration.

use crate::WORD_LENGTH;

/// Maximum guesses in one game of Wordle.
pub const MAX_GUESSES: usize = 6;

/// Knobs for a [`WordleSolver`](crate::WordleSolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Length of every candidate word.
    pub word_length: usize,
    /// Rounds the driving loop plays before giving up.
    pub max_guesses: usize,
    /// Opening guess. When unset the selector picks the first guess too.
    pub first_word: Option<String>,
    /// Prune the root's branches on the rayon pool.
    pub parallel_prune: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            word_length: WORD_LENGTH,
            max_guesses: MAX_GUESSES,
            first_word: None,
            parallel_prune: false,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word_length(self, word_length: usize) -> Self {
        Self {
            word_length,
            ..self
        }
    }

    pub fn max_guesses(self, max_guesses: usize) -> Self {
        Self {
            max_guesses,
            ..self
        }
    }

    pub fn first_word(self, word: impl Into<String>) -> Self {
        Self {
            first_word: Some(word.into()),
            ..self
        }
    }

    pub fn no_first_word(self) -> Self {
        Self {
            first_word: None,
            ..self
        }
    }

    pub fn parallel_prune(self, parallel_prune: bool) -> Self {
        Self {
            parallel_prune,
            ..self
        }
    }
}
