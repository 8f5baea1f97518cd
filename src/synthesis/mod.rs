//*** START FILE: src/synthesis/mod.rs ***//
pub mod deck;
pub mod flashcards;
pub mod notes;
pub mod quiz;

// Re-export the entry points the session and front ends call
pub use deck::{FlashcardDeck, KnownOutcome};
pub use flashcards::generate_flashcards;
pub use notes::generate_notes;
pub use quiz::{evaluate_quiz, generate_quiz, QuizEvaluation};
//*** END FILE: src/synthesis/mod.rs ***//
