//! Per-tile feedback for a guess.
//!
//! A [`FeedbackPattern`] is what the game reports after a guess. It is the
//! input to [`Constraints::from_feedback`](crate::Constraints::from_feedback),
//! which turns it into the constraint sets the pruner consumes.

use std::fmt;
use std::str::FromStr;

use crate::error::SolverError;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Correct,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word (gray)
    Absent,
}

impl Feedback {
    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black/gray)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Correct),
            'y' | '1' => Some(Feedback::Present),
            'b' | 'x' | '0' | '-' => Some(Feedback::Absent),
            _ => None,
        }
    }

    /// Parse a tile state as the game page names it.
    pub fn from_state(state: &str) -> Option<Self> {
        match state.trim().to_ascii_lowercase().as_str() {
            "correct" => Some(Feedback::Correct),
            "present" => Some(Feedback::Present),
            "absent" => Some(Feedback::Absent),
            _ => None,
        }
    }
}

/// The feedback for a whole guess, one tile per letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedbackPattern(Vec<Feedback>);

impl FeedbackPattern {
    pub fn new(feedbacks: Vec<Feedback>) -> Self {
        Self(feedbacks)
    }

    /// The winning pattern for a word of `len` letters.
    pub fn all_correct(len: usize) -> Self {
        Self(vec![Feedback::Correct; len])
    }

    /// Calculate the feedback pattern for a guess against a target word.
    ///
    /// This implements the standard Wordle feedback rules:
    /// - Green (Correct): Letter is in the correct position
    /// - Yellow (Present): Letter is in the word but wrong position
    /// - Gray (Absent): Letter is not in the word (or all instances accounted for)
    pub fn calculate(guess: &str, target: &str) -> Self {
        let guess: Vec<char> = guess.chars().collect();
        let target: Vec<char> = target.chars().collect();
        debug_assert_eq!(guess.len(), target.len());

        let mut feedback = vec![Feedback::Absent; guess.len()];
        let mut target_remaining: Vec<char> = Vec::with_capacity(target.len());

        for (i, (g, t)) in guess.iter().zip(&target).enumerate() {
            if g == t {
                feedback[i] = Feedback::Correct;
            } else {
                target_remaining.push(*t);
            }
        }

        for (i, g) in guess.iter().enumerate() {
            if feedback[i] == Feedback::Correct {
                continue;
            }
            if let Some(idx) = target_remaining.iter().position(|t| t == g) {
                feedback[i] = Feedback::Present;
                target_remaining.swap_remove(idx);
            }
        }

        Self(feedback)
    }

    /// Parse a pattern from a string like "gybbb" or "21000"
    pub fn parse(s: &str) -> Option<Self> {
        let feedbacks: Option<Vec<_>> = s.trim().chars().map(Feedback::from_char).collect();
        feedbacks.filter(|f| !f.is_empty()).map(Self)
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&f| f == Feedback::Correct)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feedback> {
        self.0.iter()
    }

    pub fn feedbacks(&self) -> &[Feedback] {
        &self.0
    }

    /// Display as emoji string
    pub fn to_emoji_string(&self) -> String {
        self.0.iter().map(|f| f.to_char()).collect()
    }
}

impl FromStr for FeedbackPattern {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SolverError::InvalidPattern(s.to_string()))
    }
}

impl FromIterator<Feedback> for FeedbackPattern {
    fn from_iter<I: IntoIterator<Item = Feedback>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}
