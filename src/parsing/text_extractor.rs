//*** START FILE: src/parsing/text_extractor.rs ***//
//! Sentence and keyword extraction shared by every study artifact.
//!
//! Lengths are measured in characters. All bounds are exclusive: a sentence
//! is kept when `len > min_len` and, if a maximum is given, `len < max_len`.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Stop-list used when building notes.
pub const NOTES_STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "for", "with", "this", "that", "from", "have", "are", "was",
    "were", "can", "will", "has", "had",
];

/// Stop-list used when building quizzes.
pub const QUIZ_STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "for", "with", "this", "that", "from", "have", "are", "was",
    "were",
];

pub const MIN_KEYWORD_LEN: usize = 4;
pub const MAX_DEFINITIONS: usize = 5;

static SENTENCE_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("static regex"));

// ASCII word runs; a keyword is a run made only of a-z.
static WORD_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("static regex"));

static DEFINITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(is|are|refers to|means|defined as|consists of)\b").expect("static regex")
});

pub fn segment_sentences(text: &str, min_len: usize, max_len: Option<usize>) -> Vec<String> {
    SENTENCE_DELIMITERS
        .split(text)
        .map(str::trim)
        .filter(|s| {
            let len = s.chars().count();
            len > min_len && max_len.map_or(true, |max| len < max)
        })
        .map(String::from)
        .collect()
}

/// Keyword counts in descending frequency; ties keep first-encounter order.
pub fn keyword_frequencies(text: &str, stop_words: &[&str]) -> Vec<(String, usize)> {
    let lowered = text.to_lowercase();
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();

    for run in WORD_RUNS.find_iter(&lowered) {
        let word = run.as_str();
        if word.len() < MIN_KEYWORD_LEN
            || !word.bytes().all(|b| b.is_ascii_lowercase())
            || stop_words.contains(&word)
        {
            continue;
        }
        match index_of.get(word) {
            Some(&idx) => order[idx].1 += 1,
            None => {
                index_of.insert(word, order.len());
                order.push((word.to_string(), 1));
            }
        }
    }

    // sort_by is stable
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

pub fn extract_keywords(text: &str, stop_words: &[&str]) -> Vec<String> {
    keyword_frequencies(text, stop_words)
        .into_iter()
        .map(|(word, _)| word)
        .collect()
}

pub fn find_definition_sentences(sentences: &[String]) -> Vec<String> {
    sentences
        .iter()
        .filter(|s| DEFINITION_PATTERN.is_match(s))
        .take(MAX_DEFINITIONS)
        .cloned()
        .collect()
}

/// Upper-cases the first character, for display only.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Machine learning is a subset of artificial intelligence. \
        Neural networks are computing systems inspired by biological neural networks! \
        Deep learning uses multiple layers to extract higher-level features from raw input?";

    #[test]
    fn test_segment_respects_bounds() {
        let sentences = segment_sentences(SAMPLE, 30, Some(200));
        assert_eq!(sentences.len(), 3);
        for s in &sentences {
            let len = s.chars().count();
            assert!(len > 30 && len < 200, "out of bounds: {:?}", s);
            assert_eq!(s.trim(), s);
        }

        let short_only = segment_sentences(
            "Tiny. Also tiny! This sentence is long enough.",
            10,
            Some(40),
        );
        assert_eq!(short_only, vec!["This sentence is long enough".to_string()]);
    }

    #[test]
    fn test_segment_bounds_are_exclusive() {
        let exactly_twenty = "abcdefghij abcdefghi"; // 20 chars
        assert_eq!(exactly_twenty.len(), 20);
        assert!(segment_sentences(exactly_twenty, 20, None).is_empty());
        assert_eq!(segment_sentences(exactly_twenty, 19, None).len(), 1);
        assert!(segment_sentences(exactly_twenty, 0, Some(20)).is_empty());
    }

    #[test]
    fn test_segment_empty_and_delimiter_runs() {
        assert!(segment_sentences("", 0, None).is_empty());
        assert!(segment_sentences("...!!!???", 0, None).is_empty());
        let s = segment_sentences("First part here...Second part here?!", 5, None);
        assert_eq!(s, vec!["First part here", "Second part here"]);
    }

    #[test]
    fn test_keywords_sorted_and_filtered() {
        let text = "Networks and networks with neural networks. Neural data from the data lake.";
        let freq = keyword_frequencies(text, QUIZ_STOP_WORDS);
        assert_eq!(freq[0], ("networks".to_string(), 3));
        for pair in freq.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        for (word, _) in &freq {
            assert!(word.len() >= MIN_KEYWORD_LEN);
            assert!(!QUIZ_STOP_WORDS.contains(&word.as_str()));
        }
        // "neural" and "data" both occur twice; "neural" was seen first
        assert_eq!(freq[1].0, "neural");
        assert_eq!(freq[2].0, "data");
    }

    #[test]
    fn test_keywords_skip_mixed_runs() {
        let words = extract_keywords("abcd1 under_score café naïve plain", QUIZ_STOP_WORDS);
        assert_eq!(words, vec!["plain".to_string()]);
    }

    #[test]
    fn test_stop_lists_differ_on_will() {
        let text = "They will study. They will learn. Will power.";
        assert!(extract_keywords(text, QUIZ_STOP_WORDS).contains(&"will".to_string()));
        assert!(!extract_keywords(text, NOTES_STOP_WORDS).contains(&"will".to_string()));
    }

    #[test]
    fn test_definitions_capped() {
        let sentences: Vec<String> = (0..8)
            .map(|i| format!("Term {} refers to something specific", i))
            .chain(std::iter::once("Nothing definitional here".to_string()))
            .collect();
        let defs = find_definition_sentences(&sentences);
        assert_eq!(defs.len(), MAX_DEFINITIONS);
        assert!(defs[0].starts_with("Term 0"));

        let none = find_definition_sentences(&["This island mean".to_string()]);
        assert!(none.is_empty());
        let upper = find_definition_sentences(&["Gravity IS a force".to_string()]);
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("learning"), "Learning");
        assert_eq!(capitalize(""), "");
    }
}
//*** END FILE: src/parsing/text_extractor.rs ***//
