//! Guessed-letter tracking.

use serde::{Deserialize, Serialize};

use super::types::Letter;

/// Letters guessed so far, in the order they were guessed, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessedLetters {
    letters: Vec<Letter>,
}

impl GuessedLetters {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a letter. Returns `false` when it was already present.
    pub fn add(&mut self, letter: Letter) -> bool {
        if self.contains(letter) {
            return false;
        }
        self.letters.push(letter);
        true
    }

    /// Checks membership.
    pub fn contains(&self, letter: Letter) -> bool {
        self.letters.contains(&letter)
    }

    /// Checks membership of a raw (already normalized) character.
    pub fn contains_char(&self, c: char) -> bool {
        self.letters.iter().any(|l| l.as_char() == c)
    }

    /// Removes every letter.
    pub fn clear(&mut self) {
        self.letters.clear();
    }

    /// Number of distinct letters guessed.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// True when nothing was guessed.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Iterates in guess order.
    pub fn iter(&self) -> impl Iterator<Item = Letter> + '_ {
        self.letters.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::from_key(c).unwrap()
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut once = GuessedLetters::new();
        once.add(letter('A'));

        let mut twice = GuessedLetters::new();
        assert!(twice.add(letter('A')));
        assert!(!twice.add(letter('A')));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut guesses = GuessedLetters::new();
        for c in ['Z', 'A', 'M', 'A'] {
            guesses.add(letter(c));
        }
        let order: String = guesses.iter().map(Letter::as_char).collect();
        assert_eq!(order, "ZAM");
    }
}
