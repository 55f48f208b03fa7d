//! Guess selection and the round-by-round driving loop.
//!
//! Each round the solver scores every surviving word by how common its
//! letters are at their positions among the survivors, guesses the best
//! one, and prunes the tree with the feedback it gets back.

use std::cmp::Ordering;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::config::SolverConfig;
use crate::constraints::Constraints;
use crate::error::{Result, SolverError};
use crate::feedback::FeedbackPattern;
use crate::frequency::FrequencyMatrix;
use crate::prune::PruneReport;
use crate::trie::Trie;

/// A candidate word and its frequency score.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessScore {
    pub word: String,
    pub score: f64,
}

/// Pick the highest-scoring word in `trie`, or `None` if it is empty.
///
/// Words are visited in lexicographic order and only a strictly higher
/// score replaces the current best, so ties go to the lexicographically
/// smallest word.
pub fn select_next_guess(trie: &Trie) -> Option<String> {
    let matrix = FrequencyMatrix::from_trie(trie);
    select_with(trie, &matrix).map(|best| best.word)
}

fn select_with(trie: &Trie, matrix: &FrequencyMatrix) -> Option<GuessScore> {
    let mut best: Option<(f64, Vec<char>)> = None;
    trie.for_each_word(|word| {
        let score = matrix.score(word);
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, word.to_vec()));
        }
    });
    best.map(|(score, word)| GuessScore {
        word: word.into_iter().collect(),
        score,
    })
}

/// The `n` best words in `trie`, highest score first, ties lexicographic.
pub fn ranked_guesses(trie: &Trie, n: usize) -> Vec<GuessScore> {
    let matrix = FrequencyMatrix::from_trie(trie);
    let mut scored = Vec::with_capacity(trie.len());
    trie.for_each_word(|word| {
        scored.push(GuessScore {
            word: word.iter().collect(),
            score: matrix.score(word),
        })
    });

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.word.cmp(&b.word))
    });
    scored.truncate(n);
    scored
}

/// A candidate tree together with the configuration to play it.
#[derive(Debug, Clone)]
pub struct WordleSolver {
    initial: Trie,
    trie: Trie,
    config: SolverConfig,
}

impl WordleSolver {
    pub fn new(trie: Trie) -> Self {
        Self::with_config(trie, SolverConfig::default())
    }

    /// The tree decides the word length; `config.word_length` is
    /// overwritten to match it.
    pub fn with_config(trie: Trie, config: SolverConfig) -> Self {
        let config = config.word_length(trie.word_length());
        Self {
            initial: trie.clone(),
            trie,
            config,
        }
    }

    pub fn from_words<I, S>(words: I, config: SolverConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(Trie::from_words(config.word_length, words), config)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn remaining_count(&self) -> usize {
        self.trie.len()
    }

    pub fn possible_answers(&self) -> Vec<String> {
        self.trie.words()
    }

    /// Every word the solver started with.
    pub fn all_words(&self) -> Vec<String> {
        self.initial.words()
    }

    pub fn reset(&mut self) {
        self.trie = self.initial.clone();
    }

    pub fn frequency_matrix(&self) -> FrequencyMatrix {
        FrequencyMatrix::from_trie(&self.trie)
    }

    pub fn select_next_guess(&self) -> Option<String> {
        select_next_guess(&self.trie)
    }

    pub fn find_best_guess(&self) -> Option<GuessScore> {
        select_with(&self.trie, &self.frequency_matrix())
    }

    pub fn ranked_guesses(&self, n: usize) -> Vec<GuessScore> {
        ranked_guesses(&self.trie, n)
    }

    /// Prune the candidates with one round of constraints.
    pub fn apply_constraints(&mut self, constraints: &Constraints) -> Result<PruneReport> {
        let report = self
            .trie
            .prune_with(constraints, self.config.parallel_prune)?;
        if report.is_exhausted() {
            warn!("no candidates remain");
        }
        Ok(report)
    }

    /// Prune the candidates with the feedback the game gave for `guess`.
    pub fn apply_feedback(
        &mut self,
        guess: &str,
        pattern: &FeedbackPattern,
    ) -> Result<PruneReport> {
        self.check_length(guess)?;
        let constraints = Constraints::from_feedback(guess, pattern)?;
        debug!("{} {} -> {:?}", guess, pattern, constraints);
        self.apply_constraints(&constraints)
    }

    fn check_length(&self, word: &str) -> Result<()> {
        if word.chars().count() == self.config.word_length {
            Ok(())
        } else {
            Err(SolverError::LengthMismatch {
                word: word.to_string(),
                expected: self.config.word_length,
            })
        }
    }

    /// Play a game, asking `get_feedback` to grade each guess.
    ///
    /// Stops after a winning pattern, when no candidate is left to guess, or
    /// after `max_guesses` rounds. Returns the guesses in order.
    pub fn solve_with_feedback<F>(
        &mut self,
        mut get_feedback: F,
    ) -> Result<Vec<(String, FeedbackPattern)>>
    where
        F: FnMut(&str) -> FeedbackPattern,
    {
        if let Some(word) = &self.config.first_word {
            self.check_length(word)?;
        }

        let mut guesses = Vec::new();

        for round in 0..self.config.max_guesses {
            let guess = match (round, &self.config.first_word) {
                (0, Some(word)) => word.clone(),
                _ => match self.select_next_guess() {
                    Some(word) => word,
                    None => {
                        warn!("out of candidates after {} guesses", round);
                        break;
                    }
                },
            };

            let pattern = get_feedback(&guess);
            info!("guess {}: {} {}", round + 1, guess, pattern);
            guesses.push((guess.clone(), pattern.clone()));

            if pattern.is_win() {
                break;
            }

            self.apply_feedback(&guess, &pattern)?;
        }

        Ok(guesses)
    }

    /// Solve a puzzle knowing the target word (for testing/benchmarking)
    pub fn solve_for_target(&mut self, target: &str) -> Result<Vec<(String, FeedbackPattern)>> {
        self.check_length(target)?;
        self.solve_with_feedback(|guess| FeedbackPattern::calculate(guess, target))
    }

    /// Guesses needed for every starting word, on a fresh copy of the
    /// solver each time. A game that is not won counts as
    /// `max_guesses + 1`.
    fn benchmark_guess_counts(&self) -> Result<Vec<usize>> {
        let unsolved = self.config.max_guesses + 1;
        self.all_words()
            .par_iter()
            .map(|target| -> Result<usize> {
                let mut solver = self.clone();
                solver.reset();
                let guesses = solver.solve_for_target(target)?;
                let won = guesses.last().map_or(false, |(_, pattern)| pattern.is_win());
                Ok(if won { guesses.len() } else { unsolved })
            })
            .collect()
    }

    /// Calculate the average number of guesses needed to solve all words
    pub fn benchmark_average_guesses(&self) -> Result<f64> {
        let counts = self.benchmark_guess_counts()?;
        if counts.is_empty() {
            return Ok(0.0);
        }
        Ok(counts.iter().sum::<usize>() as f64 / counts.len() as f64)
    }

    /// Get distribution of guess counts across all words
    pub fn benchmark_guess_distribution(&self) -> Result<Vec<(usize, usize)>> {
        let guess_counts = self.benchmark_guess_counts()?;

        let max_guesses = guess_counts.iter().copied().max().unwrap_or(0);
        let mut distribution = vec![0usize; max_guesses + 1];

        for count in guess_counts {
            distribution[count] += 1;
        }

        Ok(distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_go_to_the_smallest_word() {
        // every letter is unique to its word, so all scores are equal
        let trie = Trie::from_words(5, ["vwxyz", "abcde", "fghij"]);
        assert_eq!(select_next_guess(&trie).as_deref(), Some("abcde"));

        let ranked = ranked_guesses(&trie, 3);
        let words: Vec<_> = ranked.iter().map(|g| g.word.as_str()).collect();
        assert_eq!(words, vec!["abcde", "fghij", "vwxyz"]);
    }

    #[test]
    fn empty_tree_has_no_guess() {
        assert_eq!(select_next_guess(&Trie::default()), None);
        assert!(ranked_guesses(&Trie::default(), 5).is_empty());
    }

    #[test]
    fn length_is_checked_before_pruning() {
        let mut solver = WordleSolver::from_words(["crane"], SolverConfig::default());
        let pattern = FeedbackPattern::parse("bbbb").unwrap();
        let err = solver.apply_feedback("cran", &pattern).unwrap_err();
        assert!(matches!(err, SolverError::LengthMismatch { expected: 5, .. }));
        assert_eq!(solver.remaining_count(), 1);
    }
}
