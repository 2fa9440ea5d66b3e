//! Built-in words used whenever the generator cannot answer.

use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

use crate::games::hangman::GameWord;

/// A pre-authored word record.
#[derive(Debug, Clone, Copy)]
struct FallbackRecord {
    word: &'static str,
    category: &'static str,
    hints: [&'static str; 3],
}

const FALLBACK_WORDS: [FallbackRecord; 5] = [
    FallbackRecord {
        word: "JAVASCRIPT",
        category: "Programação",
        hints: ["Linguagem da web", "Usada com React", "Executa no navegador"],
    },
    FallbackRecord {
        word: "REACT",
        category: "Biblioteca",
        hints: ["Criado pelo Facebook", "Baseado em componentes", "Usa JSX"],
    },
    FallbackRecord {
        word: "TYPESCRIPT",
        category: "Linguagem",
        hints: ["Superset do JS", "Adiciona tipagem estática", "Compila para JS"],
    },
    FallbackRecord {
        word: "GEMINI",
        category: "IA",
        hints: ["Modelo do Google", "Multimodal", "Concorrente do GPT"],
    },
    FallbackRecord {
        word: "ALGORITMO",
        category: "Ciência da Computação",
        hints: ["Sequência de passos", "Resolve problemas", "Fundamental em lógica"],
    },
];

impl FallbackRecord {
    fn to_game_word(self) -> GameWord {
        GameWord::new(
            self.word,
            self.category,
            self.hints.iter().map(|h| h.to_string()).collect(),
        )
    }
}

/// Every fallback word, in table order.
pub fn fallback_words() -> Vec<GameWord> {
    FALLBACK_WORDS.iter().map(|r| r.to_game_word()).collect()
}

/// Picks one fallback word uniformly at random.
#[instrument]
pub fn fallback_word() -> GameWord {
    let record = FALLBACK_WORDS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(FALLBACK_WORDS[0]);
    debug!(word = record.word, "Picked fallback word");
    record.to_game_word()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_five_complete_records() {
        let words = fallback_words();
        assert_eq!(words.len(), 5);
        assert!(words.iter().all(|w| w.hints().len() == 3));
    }

    #[test]
    fn test_pick_comes_from_table() {
        let table = fallback_words();
        for _ in 0..20 {
            assert!(table.contains(&fallback_word()));
        }
    }
}
