//! Request text and response schema for word generation.

use serde_json::{Value, json};

use crate::games::hangman::Difficulty;

/// System instruction shared by every provider.
pub const SYSTEM_PROMPT: &str = "Você gera palavras para um jogo da forca. \
Responda somente com um objeto JSON com os campos \"word\" (string), \
\"category\" (string) e \"hints\" (lista de exatamente 3 strings, da mais vaga para a mais óbvia).";

/// Difficulty-specific instruction appended to the request.
pub fn difficulty_instruction(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "A palavra deve ser comum e fácil de adivinhar.",
        Difficulty::Medium => {
            "A palavra deve ser de dificuldade moderada, nem muito óbvia nem impossível."
        }
        Difficulty::Hard => "A palavra deve ser complexa, rara ou abstrata. Desafie o jogador.",
    }
}

/// Builds the user request for a topic (or a random word when absent).
pub fn build_prompt(topic: Option<&str>, difficulty: Difficulty) -> String {
    let instruction = difficulty_instruction(difficulty);
    match topic.map(str::trim).filter(|t| !t.is_empty()) {
        Some(topic) => format!(
            "Gere uma palavra para jogo da forca sobre o tema: \"{topic}\". {instruction} Retorne JSON."
        ),
        None => format!(
            "Gere uma palavra aleatória para jogo da forca (geografia, ciência, artes, etc). {instruction} Retorne JSON."
        ),
    }
}

/// Expected answer shape, in the schema dialect Gemini accepts.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "word": {
                "type": "STRING",
                "description": "A palavra para o jogo (sem espaços, caixa alta)."
            },
            "category": {
                "type": "STRING",
                "description": "A categoria da palavra."
            },
            "hints": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Uma lista de exatamente 3 dicas, da mais vaga para a mais óbvia."
            }
        },
        "required": ["word", "category", "hints"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_is_embedded() {
        let prompt = build_prompt(Some("Roman Empire"), Difficulty::Medium);
        assert!(prompt.contains("\"Roman Empire\""));
        assert!(prompt.contains(difficulty_instruction(Difficulty::Medium)));
    }

    #[test]
    fn test_blank_topic_means_random() {
        assert_eq!(
            build_prompt(Some("   "), Difficulty::Easy),
            build_prompt(None, Difficulty::Easy)
        );
        assert!(build_prompt(None, Difficulty::Easy).contains("aleatória"));
    }

    #[test]
    fn test_instructions_are_distinct() {
        let easy = difficulty_instruction(Difficulty::Easy);
        let medium = difficulty_instruction(Difficulty::Medium);
        let hard = difficulty_instruction(Difficulty::Hard);
        assert_ne!(easy, medium);
        assert_ne!(medium, hard);
        assert_ne!(easy, hard);
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = response_schema();
        assert_eq!(schema["required"], json!(["word", "category", "hints"]));
    }
}
