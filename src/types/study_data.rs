//*** START FILE: src/types/study_data.rs ***//
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Summary,
    #[default]
    Detailed,
    Bullet,
    MindMap,
    Plain,
}

impl NoteType {
    /// Unrecognized tags fall through to plain prose.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "summary" => NoteType::Summary,
            "detailed" => NoteType::Detailed,
            "bullet" => NoteType::Bullet,
            "mindmap" => NoteType::MindMap,
            _ => NoteType::Plain,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NoteArtifact {
    Summary {
        summary: String,
        key_concepts: Vec<String>,
    },
    Detailed {
        analysis: String,
        definitions: Vec<String>,
    },
    Bullet {
        takeaways: Vec<String>,
    },
    MindMap {
        central_theme: String,
        branches: Vec<String>,
    },
    Plain {
        text: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    #[default]
    Mcq,
    TrueFalse,
    Short,
    Mixed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Question {
    Mcq {
        text: String,
        options: Vec<String>,
        correct: usize,
        explanation: String,
    },
    TrueFalse {
        text: String,
        options: Vec<String>,
        correct: usize,
        explanation: String,
    },
    Short {
        text: String,
        /// Reference keyword; never compared against the learner's answer.
        correct: String,
        explanation: String,
    },
}

impl Question {
    pub fn text(&self) -> &str {
        match self {
            Question::Mcq { text, .. }
            | Question::TrueFalse { text, .. }
            | Question::Short { text, .. } => text,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Question::Mcq { options, .. } | Question::TrueFalse { options, .. } => options,
            Question::Short { .. } => &[],
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Question::Mcq { explanation, .. }
            | Question::TrueFalse { explanation, .. }
            | Question::Short { explanation, .. } => explanation,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            Question::Mcq { .. } => "mcq",
            Question::TrueFalse { .. } => "truefalse",
            Question::Short { .. } => "short",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Choice(usize),
    Text(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    pub mastered: bool,
    pub category: String,
}
//*** END FILE: src/types/study_data.rs ***//
