//! Accent stripping for letter comparison.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strips diacritics from a character.
///
/// Decomposes canonically and keeps the first non-combining code point,
/// so `'Ã'` becomes `'A'` and `'Ç'` becomes `'C'`. Characters without a
/// decomposition come back unchanged.
pub fn normalize_char(c: char) -> char {
    std::iter::once(c)
        .nfd()
        .find(|d| !is_combining_mark(*d))
        .unwrap_or(c)
}

/// Accent-stripped letters of a word, blanks discarded.
///
/// Repeated letters are kept; spaces require no guess.
pub fn normalized_letters(word: &str) -> impl Iterator<Item = char> + '_ {
    word.chars()
        .map(normalize_char)
        .filter(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_portuguese_accents() {
        assert_eq!(normalize_char('Ã'), 'A');
        assert_eq!(normalize_char('É'), 'E');
        assert_eq!(normalize_char('Ç'), 'C');
        assert_eq!(normalize_char('Ô'), 'O');
        assert_eq!(normalize_char('Ü'), 'U');
        assert_eq!(normalize_char('Ñ'), 'N');
    }

    #[test]
    fn test_plain_characters_unchanged() {
        assert_eq!(normalize_char('A'), 'A');
        assert_eq!(normalize_char(' '), ' ');
        assert_eq!(normalize_char('Z'), 'Z');
    }

    #[test]
    fn test_normalized_letters_skip_spaces() {
        let letters: String = normalized_letters("PÃO DE AÇÚCAR").collect();
        assert_eq!(letters, "PAODEACUCAR");
    }
}
