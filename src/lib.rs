//! Forca library - a hangman game with AI-generated words
//!
//! The game core is a pure state machine; words come from an LLM provider
//! (Gemini, OpenAI, Anthropic) or a built-in fallback table.
//!
//! # Architecture
//!
//! - **Games**: Hangman rules, word cleanup and the session state machine
//! - **Word source**: Prompting, response parsing and fallback words
//! - **LLM client**: JSON completions over the providers' HTTP APIs
//! - **TUI**: Terminal screens driven by the session
//!
//! # Example
//!
//! ```
//! use forca::{GameMode, Session};
//! use std::time::Instant;
//!
//! let mut session = Session::new();
//! session.select_mode(GameMode::Manual);
//! session.start_manual_session("sol", &[]).unwrap();
//! session.press_key('s', Instant::now());
//! session.press_key('o', Instant::now());
//! session.press_key('l', Instant::now());
//! assert!(session.status().is_finished());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod llm_client;
mod settings;
mod word_source;

/// Terminal user interface.
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, ForcaConfig, default_model};

// Crate-level exports - LLM client
pub use llm_client::{DEFAULT_TIMEOUT, LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Settings
pub use settings::{AppSettings, Theme};

// Crate-level exports - Word source
pub use word_source::{
    SYSTEM_PROMPT, WordCompletion, WordSource, WordSourceError, build_prompt,
    difficulty_instruction, fallback_word, fallback_words, parse_generated, response_schema,
};

// Crate-level exports - Game types (hangman)
pub use games::hangman::{
    AppScreen, Difficulty, FetchTicket, GameMode, GameStatus, GameWord, GuessOutcome,
    GuessedLetters, HintReveal, InputBlocked, KeyState, LOSS_DELAY, Letter, MANUAL_CATEGORY,
    MAX_HINTS, MAX_INCORRECT, NO_HINTS_PLACEHOLDER, SanitizeError, Session, SessionError, Tile,
    Verdict,
};

// Crate-level exports - Pure game functions
pub use games::hangman::board::{gallows_stage, key_state, tiles};
pub use games::hangman::normalize::{normalize_char, normalized_letters};
pub use games::hangman::rules::{correct_letters, evaluate, incorrect_letters, is_solved};
pub use games::hangman::sanitize::{build_manual_word, sanitize_generated_word, sanitize_word};
