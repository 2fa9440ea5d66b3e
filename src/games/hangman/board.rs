//! Derived view of a game: word tiles, keyboard keys, gallows stage.

use super::guesses::GuessedLetters;
use super::normalize::{normalize_char, normalized_letters};
use super::rules::MAX_INCORRECT;
use super::types::{GameWord, Letter};

/// One character position of the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// A gap between words.
    Space,
    /// A letter slot.
    Letter {
        /// The letter as written in the word, accents included.
        ch: char,
        /// Whether the letter is shown.
        visible: bool,
        /// Shown only because the game ended, never guessed.
        missed: bool,
    },
}

/// Builds the tiles for a word.
///
/// With `reveal` set every letter is visible and the ones never guessed
/// are marked as missed.
pub fn tiles(word: &GameWord, guesses: &GuessedLetters, reveal: bool) -> Vec<Tile> {
    word.word()
        .chars()
        .map(|ch| {
            if ch == ' ' {
                return Tile::Space;
            }
            let guessed = guesses.contains_char(normalize_char(ch));
            Tile::Letter {
                ch,
                visible: guessed || reveal,
                missed: reveal && !guessed,
            }
        })
        .collect()
}

/// State of one key on the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Not guessed yet.
    Unused,
    /// Guessed and in the word.
    Correct,
    /// Guessed and not in the word.
    Incorrect,
}

/// Classifies a key against the word and the guesses.
pub fn key_state(letter: Letter, word: &GameWord, guesses: &GuessedLetters) -> KeyState {
    if !guesses.contains(letter) {
        return KeyState::Unused;
    }
    if normalized_letters(word.word()).any(|c| c == letter.as_char()) {
        KeyState::Correct
    } else {
        KeyState::Incorrect
    }
}

/// Number of gallows parts to draw for an incorrect-guess count.
pub fn gallows_stage(incorrect: usize) -> usize {
    incorrect.min(MAX_INCORRECT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guessed(letters: &str) -> GuessedLetters {
        let mut set = GuessedLetters::new();
        for c in letters.chars() {
            set.add(Letter::from_key(c).unwrap());
        }
        set
    }

    #[test]
    fn test_accented_tile_visible_after_plain_guess() {
        let word = GameWord::new("PÃO", "Comida", Vec::new());
        let tiles = tiles(&word, &guessed("A"), false);
        assert_eq!(
            tiles[1],
            Tile::Letter {
                ch: 'Ã',
                visible: true,
                missed: false
            }
        );
        assert!(matches!(tiles[0], Tile::Letter { visible: false, .. }));
    }

    #[test]
    fn test_reveal_marks_missed_letters() {
        let word = GameWord::new("SOL", "Astro", Vec::new());
        let tiles = tiles(&word, &guessed("S"), true);
        assert!(matches!(tiles[0], Tile::Letter { missed: false, visible: true, .. }));
        assert!(matches!(tiles[2], Tile::Letter { missed: true, visible: true, .. }));
    }

    #[test]
    fn test_spaces_become_gaps() {
        let word = GameWord::new("A B", "Teste", Vec::new());
        assert_eq!(tiles(&word, &guessed(""), false)[1], Tile::Space);
    }

    #[test]
    fn test_key_states() {
        let word = GameWord::new("GATO", "Animal", Vec::new());
        let guesses = guessed("GX");
        let g = Letter::from_key('G').unwrap();
        let x = Letter::from_key('X').unwrap();
        let z = Letter::from_key('Z').unwrap();
        assert_eq!(key_state(g, &word, &guesses), KeyState::Correct);
        assert_eq!(key_state(x, &word, &guesses), KeyState::Incorrect);
        assert_eq!(key_state(z, &word, &guesses), KeyState::Unused);
    }

    #[test]
    fn test_gallows_stage_clamped() {
        assert_eq!(gallows_stage(3), 3);
        assert_eq!(gallows_stage(9), MAX_INCORRECT);
    }
}
