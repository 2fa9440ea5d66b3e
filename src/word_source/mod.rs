//! Word source adapter: turns a topic and difficulty into a [`GameWord`].
//!
//! The generator is reached through [`WordCompletion`]; any failure falls
//! back to a built-in word so a game can always start.

mod fallback;
mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Display;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::games::hangman::{Difficulty, GameWord, SanitizeError, sanitize::sanitize_generated_word};
use crate::llm_client::{LlmClient, LlmError, strip_code_fence};

pub use fallback::{fallback_word, fallback_words};
pub use prompt::{SYSTEM_PROMPT, build_prompt, difficulty_instruction, response_schema};

/// Backend that answers a word request with raw JSON text.
#[async_trait]
pub trait WordCompletion: Send + Sync + std::fmt::Debug {
    /// Sends the request and returns the raw answer.
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl WordCompletion for LlmClient {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        self.generate_json(system_prompt, user_message, &response_schema())
            .await
    }
}

/// Why a generated word could not be used.
#[derive(Debug, Display)]
pub enum WordSourceError {
    /// No generator is configured.
    #[display("No word generator configured")]
    Offline,
    /// The generator call failed.
    #[display("{}", _0)]
    Llm(LlmError),
    /// The answer was blank.
    #[display("Generator returned an empty response")]
    EmptyResponse,
    /// The answer was not the expected JSON object.
    #[display("Malformed generator response: {}", _0)]
    Malformed(serde_json::Error),
    /// The word had no letters once cleaned.
    #[display("Generated word unusable: {}", _0)]
    Word(SanitizeError),
}

impl std::error::Error for WordSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Llm(e) => Some(e),
            Self::Malformed(e) => Some(e),
            Self::Word(e) => Some(e),
            Self::Offline | Self::EmptyResponse => None,
        }
    }
}

impl From<LlmError> for WordSourceError {
    fn from(err: LlmError) -> Self {
        Self::Llm(err)
    }
}

impl From<serde_json::Error> for WordSourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err)
    }
}

impl From<SanitizeError> for WordSourceError {
    fn from(err: SanitizeError) -> Self {
        Self::Word(err)
    }
}

/// Shape of the generator's answer.
#[derive(Debug, Deserialize)]
struct GeneratedWord {
    word: String,
    category: String,
    hints: Vec<String>,
}

/// Parses and cleans a raw generator answer.
///
/// # Errors
///
/// Fails on blank text, JSON that does not match the word shape, or a word
/// with no letters left after cleanup.
#[instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn parse_generated(raw: &str) -> Result<GameWord, WordSourceError> {
    let text = strip_code_fence(raw);
    if text.is_empty() {
        return Err(WordSourceError::EmptyResponse);
    }
    let generated: GeneratedWord = serde_json::from_str(text)?;
    let word = sanitize_generated_word(&generated.word)?;
    debug!(category = %generated.category, hints = generated.hints.len(), "Parsed generated word");
    Ok(GameWord::new(word, generated.category.trim(), generated.hints))
}

/// Produces words from the generator, or from the fallback table.
#[derive(Debug, Clone, Default)]
pub struct WordSource {
    completion: Option<Arc<dyn WordCompletion>>,
}

impl WordSource {
    /// Creates a source backed by a generator.
    #[instrument(skip(completion))]
    pub fn new(completion: impl WordCompletion + 'static) -> Self {
        Self {
            completion: Some(Arc::new(completion)),
        }
    }

    /// Creates a source that always serves fallback words.
    #[instrument]
    pub fn offline() -> Self {
        info!("Word source running offline");
        Self::default()
    }

    /// True when a generator is configured.
    pub fn is_online(&self) -> bool {
        self.completion.is_some()
    }

    /// Asks the generator for a word.
    ///
    /// # Errors
    ///
    /// Returns a [`WordSourceError`] on any failure; no fallback applies.
    #[instrument(skip(self, topic), fields(topic = ?topic))]
    pub async fn try_fetch_word(
        &self,
        topic: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<GameWord, WordSourceError> {
        let completion = self.completion.as_ref().ok_or(WordSourceError::Offline)?;
        let user_message = build_prompt(topic, difficulty);
        debug!(%difficulty, "Requesting word from generator");
        let raw = completion.complete(SYSTEM_PROMPT, &user_message).await?;
        parse_generated(&raw)
    }

    /// Fetches a word, falling back to the built-in table on any failure.
    ///
    /// Never fails.
    #[instrument(skip(self, topic), fields(topic = ?topic))]
    pub async fn fetch_word(&self, topic: Option<&str>, difficulty: Difficulty) -> GameWord {
        match self.try_fetch_word(topic, difficulty).await {
            Ok(word) => {
                info!(category = %word.category(), "Generated word ready");
                word
            }
            Err(e) => {
                warn!(error = %e, "Word generation failed, using fallback");
                fallback_word()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cleans_word_and_caps_hints() {
        let raw = r#"{"word": " Saudade! ", "category": "Sentimento",
            "hints": ["a", "b", "c", "d"]}"#;
        let word = parse_generated(raw).unwrap();
        assert_eq!(word.word(), "SAUDADE");
        assert_eq!(word.category(), "Sentimento");
        assert_eq!(word.hints().len(), 3);
    }

    #[test]
    fn test_parse_keeps_accents() {
        let raw = r#"{"word": "coração", "category": "Corpo", "hints": []}"#;
        assert_eq!(parse_generated(raw).unwrap().word(), "CORAÇÃO");
    }

    #[test]
    fn test_parse_rejects_schema_mismatch() {
        let raw = r#"{"word": "SOL", "category": "Astro", "hints": "um só"}"#;
        assert!(matches!(parse_generated(raw), Err(WordSourceError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_blank_and_letterless() {
        assert!(matches!(parse_generated("  "), Err(WordSourceError::EmptyResponse)));
        let raw = r#"{"word": "42", "category": "Número", "hints": []}"#;
        assert!(matches!(parse_generated(raw), Err(WordSourceError::Word(_))));
    }
}
