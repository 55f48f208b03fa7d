//! Per-round letter constraints and the evaluator that checks words
//! against them.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;

use crate::error::{Result, SolverError};
use crate::feedback::{Feedback, FeedbackPattern};

/// The three constraint sets derived from one round of feedback.
///
/// These are built fresh every round and thrown away after pruning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Letters confirmed at an exact position (green).
    pub exact: Vec<(char, usize)>,
    /// Letters in the word but not at the given position (yellow).
    pub present: Vec<(char, usize)>,
    /// Letters not in the word, or not beyond the count that `exact` and
    /// `present` require (grey).
    pub absent: BTreeSet<char>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exact(mut self, letter: char, position: usize) -> Self {
        self.exact.push((letter, position));
        self
    }

    pub fn present(mut self, letter: char, position: usize) -> Self {
        self.present.push((letter, position));
        self
    }

    pub fn absent(mut self, letter: char) -> Self {
        self.absent.insert(letter);
        self
    }

    /// Translate the feedback for `guess` into constraint sets.
    ///
    /// Tile `i` of the pattern grades letter `i` of the guess.
    pub fn from_feedback(guess: &str, pattern: &FeedbackPattern) -> Result<Self> {
        let letters: Vec<char> = guess.chars().collect();
        if letters.len() != pattern.len() {
            return Err(SolverError::LengthMismatch {
                word: guess.to_string(),
                expected: pattern.len(),
            });
        }

        let mut constraints = Self::new();
        for (position, (&letter, feedback)) in letters.iter().zip(pattern.iter()).enumerate() {
            match feedback {
                Feedback::Correct => constraints.exact.push((letter, position)),
                Feedback::Present => constraints.present.push((letter, position)),
                Feedback::Absent => {
                    constraints.absent.insert(letter);
                }
            }
        }
        Ok(constraints)
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.present.is_empty() && self.absent.is_empty()
    }

    /// True when every position of a `word_length`-letter word is pinned by
    /// an exact constraint.
    pub fn is_solved(&self, word_length: usize) -> bool {
        let pinned: BTreeSet<usize> = self.exact.iter().map(|&(_, position)| position).collect();
        (0..word_length).all(|position| pinned.contains(&position))
    }

    /// Preprocess the sets into lookup tables for a tree of words of
    /// `word_length` letters.
    ///
    /// Fails if two different letters claim one position, or if a position
    /// lies outside the word.
    pub fn compile(&self, word_length: usize) -> Result<Rules> {
        let in_range = |letter: char, position: usize| {
            if position < word_length {
                Ok(())
            } else {
                Err(SolverError::PositionOutOfRange {
                    letter,
                    position,
                    word_length,
                })
            }
        };

        let mut fixed = vec![None; word_length];
        for &(letter, position) in &self.exact {
            in_range(letter, position)?;
            match fixed[position] {
                Some(existing) if existing != letter => {
                    return Err(SolverError::ConflictingExactPosition {
                        position,
                        existing,
                        conflicting: letter,
                    });
                }
                _ => fixed[position] = Some(letter),
            }
        }

        let mut forbidden: BTreeMap<char, BTreeSet<usize>> = BTreeMap::new();
        for &(letter, position) in &self.present {
            in_range(letter, position)?;
            forbidden.entry(letter).or_default().insert(position);
        }

        // a pair listed twice is still one occurrence of the letter
        let required = self
            .exact
            .iter()
            .unique()
            .chain(self.present.iter().unique())
            .map(|&(letter, _)| letter)
            .counts();

        Ok(Rules {
            word_length,
            fixed,
            forbidden,
            required,
            absent: self.absent.clone(),
        })
    }
}

/// Compiled form of [`Constraints`], built once per round.
#[derive(Debug, Clone)]
pub struct Rules {
    word_length: usize,
    fixed: Vec<Option<char>>,
    forbidden: BTreeMap<char, BTreeSet<usize>>,
    required: HashMap<char, usize>,
    absent: BTreeSet<char>,
}

impl Rules {
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// The letter required at `position`, if any.
    pub fn fixed_at(&self, position: usize) -> Option<char> {
        self.fixed.get(position).copied().flatten()
    }

    /// How many times `letter` must occur, counting exact and present
    /// constraints together.
    pub fn required_count(&self, letter: char) -> Option<usize> {
        self.required.get(&letter).copied()
    }

    /// Cheap check run before descending into a child: can a word with
    /// `letter` at `depth` survive at all?
    pub fn admits_branch(&self, depth: usize, letter: char) -> bool {
        if let Some(fixed) = self.fixed_at(depth) {
            if fixed != letter {
                return false;
            }
        }
        !self
            .forbidden
            .get(&letter)
            .map_or(false, |positions| positions.contains(&depth))
    }

    /// Full check of a complete word.
    pub fn admits_word(&self, word: &[char]) -> bool {
        if word.len() != self.word_length {
            return false;
        }

        let exact_ok = self
            .fixed
            .iter()
            .zip(word)
            .all(|(fixed, letter)| fixed.map_or(true, |fixed| fixed == *letter));
        if !exact_ok {
            return false;
        }

        for (letter, positions) in &self.forbidden {
            if !word.contains(letter) {
                return false;
            }
            if positions.iter().any(|&position| word[position] == *letter) {
                return false;
            }
        }

        let counts = word.iter().counts();
        self.absent.iter().all(|letter| {
            let seen = counts.get(letter).copied().unwrap_or(0);
            match self.required_count(*letter) {
                Some(required) => seen == required,
                None => seen == 0,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(word: &str) -> Vec<char> {
        word.chars().collect()
    }

    #[test]
    fn required_count_sums_exact_and_present() {
        let rules = Constraints::new()
            .exact('e', 2)
            .present('e', 4)
            .present('r', 0)
            .compile(5)
            .unwrap();
        assert_eq!(rules.required_count('e'), Some(2));
        assert_eq!(rules.required_count('r'), Some(1));
        assert_eq!(rules.required_count('x'), None);
    }

    #[test]
    fn conflicting_exact_letters_fail() {
        let err = Constraints::new()
            .exact('a', 1)
            .exact('o', 1)
            .compile(5)
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::ConflictingExactPosition {
                position: 1,
                existing: 'a',
                conflicting: 'o'
            }
        ));
    }

    #[test]
    fn repeated_exact_letter_is_fine() {
        let rules = Constraints::new().exact('a', 1).exact('a', 1).compile(5).unwrap();
        assert_eq!(rules.fixed_at(1), Some('a'));
        assert_eq!(rules.required_count('a'), Some(1));
    }

    #[test]
    fn repeated_pairs_count_once() {
        let rules = Constraints::new()
            .exact('c', 0)
            .exact('c', 0)
            .absent('c')
            .compile(5)
            .unwrap();
        assert!(rules.admits_word(&chars("crane")));

        let rules = Constraints::new()
            .present('r', 0)
            .present('r', 0)
            .absent('r')
            .compile(5)
            .unwrap();
        assert_eq!(rules.required_count('r'), Some(1));
        assert!(rules.admits_word(&chars("crane")));
        assert!(!rules.admits_word(&chars("error")));
    }

    #[test]
    fn out_of_range_position_fails() {
        let err = Constraints::new().present('q', 5).compile(5).unwrap_err();
        assert!(matches!(err, SolverError::PositionOutOfRange { position: 5, .. }));
    }

    #[test]
    fn branch_check() {
        let rules = Constraints::new().exact('c', 0).present('a', 2).compile(5).unwrap();
        assert!(rules.admits_branch(0, 'c'));
        assert!(!rules.admits_branch(0, 'b'));
        assert!(rules.admits_branch(1, 'a'));
        assert!(!rules.admits_branch(2, 'a'));
    }

    #[test]
    fn grey_duplicate_enforces_exact_count() {
        // guess "speed" against "creep": s grey, p yellow, e green, e green, d grey
        let rules = Constraints::new()
            .exact('e', 2)
            .exact('e', 3)
            .present('p', 1)
            .absent('s')
            .absent('d')
            .compile(5)
            .unwrap();
        assert!(rules.admits_word(&chars("creep")));
        assert!(!rules.admits_word(&chars("spree")));

        // one green e plus a grey e means exactly one e
        let rules = Constraints::new()
            .exact('e', 4)
            .absent('e')
            .compile(5)
            .unwrap();
        assert!(rules.admits_word(&chars("crane")));
        assert!(!rules.admits_word(&chars("geese")));
    }

    #[test]
    fn wrong_length_never_admitted() {
        let rules = Constraints::new().compile(5).unwrap();
        assert!(rules.admits_word(&chars("crane")));
        assert!(!rules.admits_word(&chars("cran")));
    }

    #[test]
    fn is_solved_needs_every_position() {
        let mut constraints = Constraints::new();
        for (i, c) in "crane".chars().enumerate() {
            constraints = constraints.exact(c, i);
        }
        assert!(constraints.is_solved(5));
        assert!(!Constraints::new().exact('c', 0).is_solved(5));
    }
}
