use crate::parsing::text_extractor::segment_sentences;
use crate::types::study_data::Flashcard;

const MIN_SENTENCE_LEN: usize = 20;
const MAX_SENTENCE_LEN: usize = 200;
pub const MAX_CARDS: usize = 20;
/// A word must be longer than this to name the card.
const MIN_KEY_WORD_LEN: usize = 5;
pub const AUTO_CATEGORY: &str = "auto";
pub const FALLBACK_KEY_WORD: &str = "Concept";

pub fn generate_flashcards(text: &str) -> Vec<Flashcard> {
    let cards: Vec<Flashcard> = segment_sentences(text, MIN_SENTENCE_LEN, Some(MAX_SENTENCE_LEN))
        .into_iter()
        .take(MAX_CARDS)
        .map(|sentence| Flashcard {
            front: format!("What is {}?", key_word(&sentence)),
            back: sentence,
            mastered: false,
            category: AUTO_CATEGORY.to_string(),
        })
        .collect();
    log::debug!("flashcards: {} cards", cards.len());
    cards
}

/// First word longer than five characters, else the first word.
fn key_word(sentence: &str) -> &str {
    let mut words = sentence.split(' ');
    let first = words.clone().next().filter(|w| !w.is_empty());
    words
        .find(|w| w.chars().count() > MIN_KEY_WORD_LEN)
        .or(first)
        .unwrap_or(FALLBACK_KEY_WORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_uses_first_long_word() {
        let cards = generate_flashcards("The cell membrane regulates transport of molecules.");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "What is membrane?");
        assert_eq!(cards[0].back, "The cell membrane regulates transport of molecules");
        assert!(!cards[0].mastered);
        assert_eq!(cards[0].category, "auto");
    }

    #[test]
    fn test_front_falls_back_to_first_word() {
        let cards = generate_flashcards("A cat and a dog ran off to eat.");
        assert_eq!(cards[0].front, "What is A?");
    }

    #[test]
    fn test_no_qualifying_sentence_gives_empty_deck() {
        assert!(generate_flashcards("Too short. Also short!").is_empty());
        assert!(generate_flashcards("").is_empty());
    }

    #[test]
    fn test_capped_at_twenty() {
        let text = "This is a reasonably long sentence. ".repeat(30);
        assert_eq!(generate_flashcards(&text).len(), MAX_CARDS);
    }

    #[test]
    fn test_key_word_helper() {
        assert_eq!(key_word(""), FALLBACK_KEY_WORD);
        assert_eq!(key_word("tiny words only"), "tiny");
    }
}
