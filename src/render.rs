//*** START FILE: src/render.rs ***//
// Plain-text presentation of generated artifacts. Synthesis never formats;
// everything a terminal shows is built here.
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::profile::Progression;
use crate::synthesis::deck::FlashcardDeck;
use crate::synthesis::quiz::QuizEvaluation;
use crate::types::study_data::{NoteArtifact, Question};

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn option_letter(index: usize) -> char {
    OPTION_LETTERS.get(index).copied().unwrap_or('?')
}

/// Maps "a".."d" (either case) back to an option index.
pub fn parse_option_letter(input: &str) -> Option<usize> {
    let mut chars = input.trim().chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    OPTION_LETTERS.iter().position(|&l| l == c)
}

pub fn render_notes(notes: &NoteArtifact) -> String {
    let mut out = String::new();
    match notes {
        NoteArtifact::Summary { summary, key_concepts } => {
            out.push_str("Summary\n\n");
            out.push_str(summary);
            out.push_str("\n\nKey Concepts\n");
            out.push_str(&key_concepts.join(", "));
            out.push('\n');
        }
        NoteArtifact::Detailed { analysis, definitions } => {
            out.push_str("Detailed Analysis\n\n");
            out.push_str(analysis);
            out.push('\n');
            if !definitions.is_empty() {
                out.push_str("\nKey Definitions\n");
                for definition in definitions {
                    out.push_str(&format!("- {}\n", definition));
                }
            }
        }
        NoteArtifact::Bullet { takeaways } => {
            out.push_str("Key Takeaways\n");
            for takeaway in takeaways {
                out.push_str(&format!("- {}\n", takeaway));
            }
        }
        NoteArtifact::MindMap { central_theme, branches } => {
            out.push_str(&format!("[{}]\n", central_theme));
            for branch in branches {
                out.push_str(&format!("  +-- {}\n", branch));
            }
        }
        NoteArtifact::Plain { text } => {
            out.push_str(text);
            out.push('\n');
        }
    }
    out
}

/// `number` is 1-based.
pub fn render_question(number: usize, question: &Question) -> String {
    let mut out = format!("Question {}: {}\n", number, question.text());
    for (i, option) in question.options().iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", option_letter(i), option));
    }
    out
}

pub fn render_evaluation(questions: &[Question], evaluation: &QuizEvaluation) -> String {
    let mut out = format!(
        "Score: {}/{} ({}%)\n{}\n\n",
        evaluation.score, evaluation.total, evaluation.percentage, evaluation.feedback
    );
    for (question, result) in questions.iter().zip(&evaluation.results) {
        let mark = if result.correct { "correct" } else { "incorrect" };
        out.push_str(&format!("{}. [{}] {}\n", result.index + 1, mark, question.text()));
        if let Some(answer) = &result.user_answer {
            out.push_str(&format!("   Your answer: {}\n", answer));
        }
        out.push_str(&format!("   {}\n", question.explanation()));
    }
    out
}

pub fn render_card(deck: &FlashcardDeck) -> String {
    let (Some(index), Some(card)) = (deck.current_index(), deck.current()) else {
        return "No flashcards.\n".to_string();
    };
    let face = if deck.is_flipped() { &card.back } else { &card.front };
    let status = if card.mastered { " (mastered)" } else { "" };
    format!(
        "Card {}/{}{}\n\n{}\n\nMastered {}/{} - retention {}%\n",
        index + 1,
        deck.len(),
        status,
        face,
        deck.mastered_count(),
        deck.len(),
        deck.retention_rate()
    )
}

pub fn render_progress(progression: &Progression) -> String {
    let user = &progression.user;
    let stats = &progression.stats;
    let mut out = format!(
        "{} [{}]  Level {}  {} XP ({} to next)  Streak {}\n",
        user.display_name(),
        user.avatar,
        user.level_number,
        user.xp,
        progression.xp_to_next_level(),
        user.streak
    );
    out.push_str(&format!(
        "Notes {}  Quizzes {}  Flashcards {}  Tasks {}\n",
        stats.notes_created,
        stats.quizzes_taken,
        stats.flashcards_reviewed,
        stats.tasks_done()
    ));
    out.push_str(&format!(
        "Study time {} min  Focus score {}\n",
        stats.study_minutes(),
        stats.focus_score
    ));
    if let Some(avg) = stats.average_quiz_score() {
        out.push_str(&format!("Average quiz score {:.0}%\n", avg * 100.0));
    }
    if !progression.achievements.is_empty() {
        out.push_str("\nAchievements\n");
        for a in &progression.achievements {
            out.push_str(&format!(
                "  {}  {} - {}\n",
                a.earned_at.format("%Y-%m-%d"),
                a.title,
                a.description
            ));
        }
    }
    out
}

pub fn notes_export_file_name(date: NaiveDate) -> String {
    format!("StudyBuddy-Notes-{}.txt", date.format("%Y-%m-%d"))
}

/// Writes rendered notes into `dir`. Returns `None` when there is nothing to write.
pub fn export_notes(notes: &NoteArtifact, dir: &Path, date: NaiveDate) -> Result<Option<PathBuf>> {
    let contents = render_notes(notes);
    if contents.trim().is_empty() {
        log::warn!("No notes to download");
        return Ok(None);
    }
    fs::create_dir_all(dir)?;
    let path = dir.join(notes_export_file_name(date));
    fs::write(&path, contents)?;
    log::info!("Notes exported to {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::study_data::Flashcard;

    #[test]
    fn test_option_letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
        assert_eq!(parse_option_letter(" c "), Some(2));
        assert_eq!(parse_option_letter("E"), None);
        assert_eq!(parse_option_letter("ab"), None);
    }

    #[test]
    fn test_render_question_lists_options() {
        let q = Question::TrueFalse {
            text: "Water boils at 100 degrees".into(),
            options: vec!["True".into(), "False".into()],
            correct: 0,
            explanation: String::new(),
        };
        assert_eq!(
            render_question(1, &q),
            "Question 1: Water boils at 100 degrees\n  A. True\n  B. False\n"
        );
    }

    #[test]
    fn test_render_card_faces() {
        let mut deck = FlashcardDeck::new(vec![Flashcard {
            front: "What is entropy?".into(),
            back: "Entropy measures disorder".into(),
            mastered: false,
            category: "auto".into(),
        }]);
        assert!(render_card(&deck).contains("What is entropy?"));
        deck.toggle_flip();
        assert!(render_card(&deck).contains("Entropy measures disorder"));
        assert_eq!(render_card(&FlashcardDeck::default()), "No flashcards.\n");
    }

    #[test]
    fn test_export_notes_file_name_and_empty_skip() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let notes = NoteArtifact::Bullet {
            takeaways: vec!["Cells divide by mitosis".into()],
        };
        let path = export_notes(&notes, dir.path(), date).unwrap().unwrap();
        assert!(path.ends_with("StudyBuddy-Notes-2024-03-09.txt"));
        assert!(fs::read_to_string(&path).unwrap().contains("- Cells divide by mitosis"));

        let empty = NoteArtifact::Plain { text: String::new() };
        assert_eq!(export_notes(&empty, dir.path(), date).unwrap(), None);
    }
}
//*** END FILE: src/render.rs ***//
