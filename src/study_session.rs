//! The study session owns everything a front end mutates between events:
//! progression, the current quiz and deck, the random source and the store.
//! Every mutation is followed by a save.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::Result;
use crate::profile::{Progression, StatEvent};
use crate::profile_io::{load_progression, save_progression, ProgressStore};
use crate::synthesis::{self, FlashcardDeck, KnownOutcome, QuizEvaluation};
use crate::types::study_data::{Answer, NoteArtifact, NoteType, Question, QuizType};

/// Hours credited for each generated set of notes.
pub const NOTES_STUDY_HOURS: f64 = 0.25;
/// Hours credited for a completed 25-minute focus session.
pub const FOCUS_SESSION_HOURS: f64 = 0.42;
pub const QUIZ_MASTER_PERCENTAGE: u32 = 80;

pub const SAMPLE_NOTES_TEXT: &str = "Machine learning is a subset of artificial intelligence that enables systems to learn and improve from experience without being explicitly programmed. Deep learning uses neural networks with multiple layers to progressively extract higher-level features from raw input. Natural Language Processing allows computers to understand, interpret, and manipulate human language.";

pub const SAMPLE_QUIZ_TEXT: &str = "Machine learning is a subset of artificial intelligence. Neural networks are computing systems inspired by biological neural networks. Deep learning uses multiple layers to extract higher-level features from raw input.";

#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub artifact: T,
    pub leveled_up: bool,
}

pub struct StudySession<S: ProgressStore> {
    progression: Progression,
    quiz: Vec<Question>,
    deck: FlashcardDeck,
    rng: ChaCha8Rng,
    store: S,
}

impl<S: ProgressStore> StudySession<S> {
    /// Loads saved progression from `store`. A seed makes every generated
    /// quiz and shuffle reproducible.
    pub fn open(store: S, seed: Option<u64>) -> Result<Self> {
        let progression = load_progression(&store)?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        log::debug!(
            "Session opened: level {}, {} XP",
            progression.user.level_number,
            progression.user.xp
        );
        Ok(Self {
            progression,
            quiz: Vec::new(),
            deck: FlashcardDeck::default(),
            rng,
            store,
        })
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&mut self) -> Result<()> {
        save_progression(&self.progression, &mut self.store)
    }

    pub fn start_journey(&mut self, name: &str, goal: &str, level: &str) -> Result<()> {
        self.progression.start_journey(name, goal, level)?;
        log::info!("Welcome, {}!", self.progression.user.name);
        self.save()
    }

    pub fn generate_notes(
        &mut self,
        text: &str,
        note_type: NoteType,
    ) -> Result<Generated<NoteArtifact>> {
        let artifact = synthesis::generate_notes(text, note_type);
        let leveled_up = self.progression.record_event(StatEvent::Notes(1));
        self.progression.record_event(StatEvent::StudyTime(NOTES_STUDY_HOURS));
        self.save()?;
        log::info!("Notes generated ({:?})", note_type);
        Ok(Generated { artifact, leveled_up })
    }

    pub fn generate_quiz(
        &mut self,
        text: &str,
        quiz_type: QuizType,
    ) -> Result<Generated<Vec<Question>>> {
        self.quiz = synthesis::generate_quiz(text, quiz_type, &mut self.rng);
        let leveled_up = self.progression.record_event(StatEvent::Quiz(1));
        self.save()?;
        log::info!("Quiz generated: {} questions", self.quiz.len());
        Ok(Generated {
            artifact: self.quiz.clone(),
            leveled_up,
        })
    }

    /// Loads the demo quiz without crediting a generated quiz.
    pub fn load_sample_quiz(&mut self, quiz_type: QuizType) -> &[Question] {
        self.quiz = synthesis::generate_quiz(SAMPLE_QUIZ_TEXT, quiz_type, &mut self.rng);
        &self.quiz
    }

    pub fn quiz(&self) -> &[Question] {
        &self.quiz
    }

    /// Grades the current quiz. An empty quiz grades to 0/0 and is not recorded.
    pub fn submit_quiz(&mut self, answers: &[Option<Answer>]) -> Result<QuizEvaluation> {
        let evaluation = synthesis::evaluate_quiz(&self.quiz, answers);
        if self.quiz.is_empty() {
            return Ok(evaluation);
        }

        self.progression
            .record_event(StatEvent::QuizScore(evaluation.percentage as f64 / 100.0));
        if evaluation.percentage >= QUIZ_MASTER_PERCENTAGE {
            self.progression
                .award("Quiz Master", "Scored 80% or higher!");
        }
        self.save()?;
        log::info!(
            "Quiz score: {}/{} ({}%)",
            evaluation.score,
            evaluation.total,
            evaluation.percentage
        );
        Ok(evaluation)
    }

    pub fn generate_flashcards(&mut self, text: &str) -> Result<Generated<usize>> {
        self.deck = FlashcardDeck::new(synthesis::generate_flashcards(text));
        let count = self.deck.len();
        let leveled_up = self
            .progression
            .record_event(StatEvent::Flashcards(count as u32));
        self.save()?;
        log::info!("{} flashcards created", count);
        Ok(Generated {
            artifact: count,
            leveled_up,
        })
    }

    pub fn deck(&self) -> &FlashcardDeck {
        &self.deck
    }

    /// Navigation and flipping; these do not touch progression.
    pub fn deck_mut(&mut self) -> &mut FlashcardDeck {
        &mut self.deck
    }

    /// "Flashcard Master" is awarded only on the call that completes the deck.
    pub fn mark_known(&mut self) -> Result<Option<KnownOutcome>> {
        let was_complete = self.deck.all_mastered();
        let outcome = self.deck.mark_known();
        if !was_complete && outcome.is_some_and(|o| o.deck_complete) {
            self.progression
                .award("Flashcard Master", "You mastered all flashcards!");
            self.save()?;
        }
        Ok(outcome)
    }

    pub fn shuffle_deck(&mut self) {
        self.deck.shuffle(&mut self.rng);
    }

    pub fn complete_focus_session(&mut self) -> Result<bool> {
        let leveled_up = self
            .progression
            .record_event(StatEvent::StudyTime(FOCUS_SESSION_HOURS));
        self.progression
            .award("Focus Session Complete!", "Great job!");
        self.save()?;
        Ok(leveled_up)
    }

    /// Back to defaults, with the store wiped.
    pub fn reset(&mut self) -> Result<()> {
        self.progression = Progression::new();
        self.quiz.clear();
        self.deck = FlashcardDeck::default();
        self.store.clear()?;
        log::info!("Progress reset");
        Ok(())
    }
}
