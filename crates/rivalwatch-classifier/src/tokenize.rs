//! Tokenizer matching the vectorizer the model was trained with.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Words of two or more word characters.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// Lowercase `text` and split it into tokens, dropping any in `stop_words`.
pub(crate) fn tokenize(text: &str, stop_words: &HashSet<String>) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !stop_words.contains(*token))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stop_words() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn lowercases_and_splits_on_non_word_chars() {
        assert_eq!(
            tokenize("New Pricing: $20/mo!", &no_stop_words()),
            vec!["new", "pricing", "20", "mo"]
        );
    }

    #[test]
    fn drops_single_character_tokens() {
        assert_eq!(tokenize("a b cd e", &no_stop_words()), vec!["cd"]);
    }

    #[test]
    fn drops_stop_words() {
        let stop: HashSet<String> = ["the", "we", "are"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(
            tokenize("We are hiring the best", &stop),
            vec!["hiring", "best"]
        );
    }

    #[test]
    fn keeps_unicode_words() {
        assert_eq!(tokenize("Café prix", &no_stop_words()), vec!["café", "prix"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("   ", &no_stop_words()).is_empty());
    }
}
