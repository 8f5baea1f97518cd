//! Condensed notes from raw text. Deterministic for a given text and type.

use crate::parsing::text_extractor::{
    capitalize, extract_keywords, find_definition_sentences, segment_sentences, NOTES_STOP_WORDS,
};
use crate::types::study_data::{NoteArtifact, NoteType};

const MIN_SENTENCE_LEN: usize = 20;
const MAX_KEY_SENTENCES: usize = 25;
const MAX_KEYWORDS: usize = 20;

const SUMMARY_SENTENCES: usize = 3;
const SUMMARY_TAGS: usize = 15;
const DETAILED_SENTENCES: usize = 15;
const BULLET_SENTENCES: usize = 15;
const MINDMAP_BRANCHES: usize = 8;
const PLAIN_SENTENCES: usize = 10;

pub const DEFAULT_CENTRAL_THEME: &str = "Document";

pub fn generate_notes(text: &str, note_type: NoteType) -> NoteArtifact {
    let sentences = segment_sentences(text, MIN_SENTENCE_LEN, None);
    let key_sentences: Vec<String> = sentences.iter().take(MAX_KEY_SENTENCES).cloned().collect();

    let keywords: Vec<String> = extract_keywords(text, NOTES_STOP_WORDS)
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|w| capitalize(&w))
        .collect();

    // definitions come from every qualifying sentence, not just the first 25
    let definitions = find_definition_sentences(&sentences);

    log::debug!(
        "notes: {} sentences, {} keywords, {} definitions",
        key_sentences.len(),
        keywords.len(),
        definitions.len()
    );

    let prose = |n: usize| key_sentences.iter().take(n).cloned().collect::<Vec<_>>().join(" ");

    match note_type {
        NoteType::Summary => NoteArtifact::Summary {
            summary: prose(SUMMARY_SENTENCES),
            key_concepts: keywords.iter().take(SUMMARY_TAGS).cloned().collect(),
        },
        NoteType::Detailed => NoteArtifact::Detailed {
            analysis: prose(DETAILED_SENTENCES),
            definitions,
        },
        NoteType::Bullet => NoteArtifact::Bullet {
            takeaways: key_sentences.iter().take(BULLET_SENTENCES).cloned().collect(),
        },
        NoteType::MindMap => NoteArtifact::MindMap {
            central_theme: keywords
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_CENTRAL_THEME.to_string()),
            branches: keywords.iter().skip(1).take(MINDMAP_BRANCHES).cloned().collect(),
        },
        NoteType::Plain => NoteArtifact::Plain {
            text: prose(PLAIN_SENTENCES),
        },
    }
}
