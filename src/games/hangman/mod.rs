//! Hangman: word rules, guess tracking and the session state machine.

pub mod board;
mod guesses;
mod hints;
pub mod normalize;
pub mod rules;
pub mod sanitize;
mod session;
mod types;

pub use board::{KeyState, Tile};
pub use guesses::GuessedLetters;
pub use hints::HintReveal;
pub use rules::{MAX_INCORRECT, Verdict};
pub use sanitize::{MANUAL_CATEGORY, NO_HINTS_PLACEHOLDER, SanitizeError};
pub use session::{FetchTicket, GuessOutcome, InputBlocked, LOSS_DELAY, Session, SessionError};
pub use types::{AppScreen, Difficulty, GameMode, GameStatus, GameWord, Letter, MAX_HINTS};
