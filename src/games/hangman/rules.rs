//! Win and loss rules for hangman.
//!
//! Pure functions over a word and the guessed letters. The session decides
//! when to apply them and how to time the loss.

use tracing::instrument;

use super::guesses::GuessedLetters;
use super::normalize::normalized_letters;
use super::types::{GameWord, Letter};

/// Incorrect guesses allowed before the game is lost.
pub const MAX_INCORRECT: usize = 6;

/// What the guesses mean for the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Neither condition holds.
    Continue,
    /// Every letter of the word was guessed.
    Won,
    /// The incorrect-guess limit was reached.
    Lost,
}

/// Guessed letters that do not appear in the word, in guess order.
pub fn incorrect_letters(word: &GameWord, guesses: &GuessedLetters) -> Vec<Letter> {
    guesses
        .iter()
        .filter(|l| !normalized_letters(word.word()).any(|c| c == l.as_char()))
        .collect()
}

/// Guessed letters that appear in the word, in guess order.
pub fn correct_letters(word: &GameWord, guesses: &GuessedLetters) -> Vec<Letter> {
    guesses
        .iter()
        .filter(|l| normalized_letters(word.word()).any(|c| c == l.as_char()))
        .collect()
}

/// True when every accent-stripped letter of the word was guessed.
pub fn is_solved(word: &GameWord, guesses: &GuessedLetters) -> bool {
    normalized_letters(word.word()).all(|c| guesses.contains_char(c))
}

/// Evaluates the guesses against the word.
///
/// The loss threshold is checked before the win.
#[instrument(skip(word, guesses), fields(guessed = guesses.len()))]
pub fn evaluate(word: &GameWord, guesses: &GuessedLetters) -> Verdict {
    if incorrect_letters(word, guesses).len() >= MAX_INCORRECT {
        return Verdict::Lost;
    }
    if is_solved(word, guesses) {
        return Verdict::Won;
    }
    Verdict::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guesses(letters: &str) -> GuessedLetters {
        let mut set = GuessedLetters::new();
        for c in letters.chars() {
            set.add(Letter::from_key(c).unwrap());
        }
        set
    }

    fn word(w: &str) -> GameWord {
        GameWord::new(w, "Teste", Vec::new())
    }

    #[test]
    fn test_win_when_all_letters_guessed() {
        assert_eq!(evaluate(&word("GATO"), &guesses("GATO")), Verdict::Won);
        assert_eq!(evaluate(&word("GATO"), &guesses("GAT")), Verdict::Continue);
    }

    #[test]
    fn test_accented_letters_match_plain_guesses() {
        assert_eq!(evaluate(&word("AÇÃO"), &guesses("ACO")), Verdict::Won);
    }

    #[test]
    fn test_spaces_need_no_guess() {
        assert_eq!(evaluate(&word("SOL NASCENTE"), &guesses("SOLNACET")), Verdict::Won);
    }

    #[test]
    fn test_loss_at_six_distinct_misses() {
        assert_eq!(evaluate(&word("SOL"), &guesses("XYZQW")), Verdict::Continue);
        assert_eq!(evaluate(&word("SOL"), &guesses("XYZQWR")), Verdict::Lost);
    }

    #[test]
    fn test_incorrect_letters_keep_guess_order() {
        let missed = incorrect_letters(&word("SOL"), &guesses("XSYO"));
        let missed: String = missed.into_iter().map(Letter::as_char).collect();
        assert_eq!(missed, "XY");
    }
}
