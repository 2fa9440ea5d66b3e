//! Core domain types for hangman.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Maximum number of hints a word carries.
pub const MAX_HINTS: usize = 3;

/// A word to guess, together with its category and hints.
///
/// Deserializing goes through [`GameWord::new`], so the hint cap holds for
/// words read from JSON too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "GameWordRecord")]
pub struct GameWord {
    word: String,
    category: String,
    hints: Vec<String>,
}

/// Wire form of [`GameWord`] before the hint cap is applied.
#[derive(Debug, Deserialize)]
struct GameWordRecord {
    word: String,
    category: String,
    #[serde(default)]
    hints: Vec<String>,
}

impl From<GameWordRecord> for GameWord {
    fn from(record: GameWordRecord) -> Self {
        Self::new(record.word, record.category, record.hints)
    }
}

impl GameWord {
    /// Creates a word record, keeping at most [`MAX_HINTS`] hints.
    pub fn new(word: impl Into<String>, category: impl Into<String>, mut hints: Vec<String>) -> Self {
        hints.truncate(MAX_HINTS);
        Self {
            word: word.into(),
            category: category.into(),
            hints,
        }
    }

    /// Returns the word in uppercase, diacritics preserved.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Returns the category shown alongside the word.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the hints, vaguest first.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }
}

/// How hard the generated word should be.
///
/// Only affects the request sent to the word generator.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Common, easy to guess.
    Easy,
    /// Neither obvious nor impossible.
    #[default]
    Medium,
    /// Rare or abstract.
    Hard,
}

impl Difficulty {
    /// Returns the display label for this difficulty.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Fácil",
            Self::Medium => "Médio",
            Self::Hard => "Difícil",
        }
    }

    /// Returns the next difficulty, wrapping around.
    #[instrument]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    /// Returns the previous difficulty, wrapping around.
    #[instrument]
    pub fn previous(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single uppercase ASCII letter, the only thing a player can guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Letter(char);

impl Letter {
    /// Builds a letter from a key press, case-insensitively.
    ///
    /// Returns `None` for anything that is not an ASCII letter.
    pub fn from_key(key: char) -> Option<Self> {
        key.is_ascii_alphabetic()
            .then(|| Self(key.to_ascii_uppercase()))
    }

    /// Returns the letter as an uppercase `char`.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Iterates A through Z.
    pub fn alphabet() -> impl Iterator<Item = Letter> {
        ('A'..='Z').map(Letter)
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// No game running.
    #[default]
    Idle,
    /// Letters are being guessed.
    Playing,
    /// Every letter was found.
    Won,
    /// Six incorrect guesses were made.
    Lost,
}

impl GameStatus {
    /// True for `Won` and `Lost`.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Which screen is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppScreen {
    /// Mode selection.
    #[default]
    Home,
    /// Difficulty selection for a random AI word.
    SetupRandom,
    /// Topic and difficulty for an AI word.
    SetupTopic,
    /// Secret word and hints for a versus game.
    SetupWord,
    /// The game board.
    Game,
}

/// A mode picked on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum GameMode {
    /// The AI picks any word.
    Random,
    /// The AI picks a word on a topic.
    Topic,
    /// A second player types the word.
    Manual,
}

impl GameMode {
    /// Returns the setup screen for this mode.
    #[instrument]
    pub fn setup_screen(self) -> AppScreen {
        match self {
            Self::Random => AppScreen::SetupRandom,
            Self::Topic => AppScreen::SetupTopic,
            Self::Manual => AppScreen::SetupWord,
        }
    }

    /// Returns the mode behind a setup screen, if it is one.
    #[instrument]
    pub fn from_setup_screen(screen: AppScreen) -> Option<Self> {
        match screen {
            AppScreen::SetupRandom => Some(Self::Random),
            AppScreen::SetupTopic => Some(Self::Topic),
            AppScreen::SetupWord => Some(Self::Manual),
            AppScreen::Home | AppScreen::Game => None,
        }
    }

    /// Returns the home-screen label.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Modo Aleatório",
            Self::Topic => "Definir Tópico",
            Self::Manual => "Protocolo Versus",
        }
    }

    /// Returns the one-line description shown under the label.
    #[instrument]
    pub fn description(self) -> &'static str {
        match self {
            Self::Random => "A IA escolherá o destino. Defina a intensidade.",
            Self::Topic => "Escolha o campo de batalha para a IA.",
            Self::Manual => "Configure o desafio para o seu oponente.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialized_word_keeps_hint_cap() {
        let json = r#"{"word": "SOL", "category": "Astro",
            "hints": ["a", "b", "c", "d", "e"]}"#;
        let word: GameWord = serde_json::from_str(json).unwrap();
        assert_eq!(word.hints().len(), MAX_HINTS);
        assert_eq!(word.hints()[2], "c");
    }

    #[test]
    fn test_letter_from_key_is_case_insensitive() {
        assert_eq!(Letter::from_key('g'), Letter::from_key('G'));
        assert_eq!(Letter::from_key('g').map(Letter::as_char), Some('G'));
    }

    #[test]
    fn test_letter_rejects_non_ascii_letters() {
        assert_eq!(Letter::from_key('1'), None);
        assert_eq!(Letter::from_key(' '), None);
        assert_eq!(Letter::from_key('é'), None);
    }

    #[test]
    fn test_game_word_caps_hints() {
        let hints = (1..=5).map(|i| format!("hint {i}")).collect();
        let word = GameWord::new("GATO", "Animal", hints);
        assert_eq!(word.hints().len(), MAX_HINTS);
        assert_eq!(word.hints()[0], "hint 1");
    }

    #[test]
    fn test_difficulty_cycles() {
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
