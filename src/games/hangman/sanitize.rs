//! Free-text cleanup for words coming from players or the generator.

use derive_more::Display;
use tracing::{debug, instrument};

use super::types::{GameWord, MAX_HINTS};

/// Category given to words typed by a second player.
pub const MANUAL_CATEGORY: &str = "Desafio 1x1";

/// Placeholder hint when a manual word has none.
pub const NO_HINTS_PLACEHOLDER: &str = "Sem dicas disponíveis.";

/// Accented uppercase letters kept alongside A–Z.
const ACCENTED: &str = "ÃÁÀÂÄÇÉÈÊËÍÌÎÏÕÓÒÔÖÚÙÛÜÑ";

/// Reasons a piece of text cannot become a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SanitizeError {
    /// Nothing playable remained after stripping.
    #[display("Word has no letters left after removing invalid characters")]
    EmptyWord,
}

impl std::error::Error for SanitizeError {}

fn is_allowed(c: char) -> bool {
    c.is_ascii_uppercase() || c == ' ' || ACCENTED.contains(c)
}

/// Uppercases, keeps letters (accents included) and spaces, then trims.
///
/// `" café!! "` becomes `"CAFÉ"`.
#[instrument]
pub fn sanitize_word(raw: &str) -> Result<String, SanitizeError> {
    let upper = raw.to_uppercase();
    let kept: String = upper.chars().filter(|c| is_allowed(*c)).collect();
    let word = kept.trim();
    if word.is_empty() {
        debug!("Sanitized word is empty");
        return Err(SanitizeError::EmptyWord);
    }
    Ok(word.to_string())
}

/// Cleans a word from the generator: like [`sanitize_word`] but spaces are
/// dropped too, so `"Pão de Queijo"` becomes `"PÃODEQUEIJO"`.
#[instrument]
pub fn sanitize_generated_word(raw: &str) -> Result<String, SanitizeError> {
    let word: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| *c != ' ' && is_allowed(*c))
        .collect();
    if word.is_empty() {
        debug!("Sanitized generated word is empty");
        return Err(SanitizeError::EmptyWord);
    }
    Ok(word)
}

/// Builds the word for a versus game.
///
/// Blank hints are dropped; with none left the placeholder hint is used.
#[instrument(skip(hints), fields(hint_count = hints.len()))]
pub fn build_manual_word(raw_word: &str, hints: &[String]) -> Result<GameWord, SanitizeError> {
    let word = sanitize_word(raw_word)?;
    let mut hints: Vec<String> = hints
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .take(MAX_HINTS)
        .map(str::to_string)
        .collect();
    if hints.is_empty() {
        hints.push(NO_HINTS_PLACEHOLDER.to_string());
    }
    Ok(GameWord::new(word, MANUAL_CATEGORY, hints))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_word_strips_punctuation_keeps_accents() {
        let word = build_manual_word(" café!! ", &[]).unwrap();
        assert_eq!(word.word(), "CAFÉ");
        assert_eq!(word.category(), MANUAL_CATEGORY);
        assert_eq!(word.hints(), [NO_HINTS_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn test_blank_hints_are_dropped() {
        let hints = vec!["  ".to_string(), " Bebida quente ".to_string(), String::new()];
        let word = build_manual_word("cafe", &hints).unwrap();
        assert_eq!(word.hints(), ["Bebida quente".to_string()]);
    }

    #[test]
    fn test_spaces_inside_word_survive() {
        assert_eq!(sanitize_word("pão de queijo").unwrap(), "PÃO DE QUEIJO");
    }

    #[test]
    fn test_leading_junk_does_not_leave_a_space() {
        assert_eq!(sanitize_word("!! sol").unwrap(), "SOL");
    }

    #[test]
    fn test_generated_word_loses_spaces() {
        assert_eq!(sanitize_generated_word(" Pão de Queijo! ").unwrap(), "PÃODEQUEIJO");
        assert_eq!(sanitize_generated_word(" - "), Err(SanitizeError::EmptyWord));
    }

    #[test]
    fn test_empty_after_stripping() {
        assert_eq!(sanitize_word("123 !?"), Err(SanitizeError::EmptyWord));
        assert_eq!(build_manual_word("   ", &[]), Err(SanitizeError::EmptyWord));
    }
}
