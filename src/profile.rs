use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};

pub const XP_PER_LEVEL: u64 = 100;
pub const XP_PER_NOTE: u64 = 50;
pub const XP_PER_QUIZ: u64 = 75;
pub const XP_PER_FLASHCARD: u64 = 25;
pub const XP_PER_STUDY_HOUR: f64 = 10.0;
pub const FOCUS_SCORE_STEP: u32 = 2;
pub const MAX_FOCUS_SCORE: u32 = 100;

const DEFAULT_DISPLAY_NAME: &str = "Learner";
const DEFAULT_AVATAR: &str = "JD";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub avatar: String,
    pub goal: String,
    /// Study level chosen at onboarding, e.g. "undergrad".
    pub level: String,
    pub level_number: u32,
    pub xp: u64,
    pub streak: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            name: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            goal: "learn".to_string(),
            level: "undergrad".to_string(),
            level_number: 1,
            xp: 0,
            streak: 0,
        }
    }
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            DEFAULT_DISPLAY_NAME
        } else {
            &self.name
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub notes_created: u32,
    pub quizzes_taken: u32,
    pub flashcards_reviewed: u32,
    /// Hours.
    pub study_time: f64,
    pub focus_score: u32,
    /// Fractions in `0.0..=1.0`.
    pub quiz_scores: Vec<f64>,
}

impl Default for StudyStats {
    fn default() -> Self {
        StudyStats {
            notes_created: 0,
            quizzes_taken: 0,
            flashcards_reviewed: 0,
            study_time: 0.0,
            focus_score: 85,
            quiz_scores: Vec::new(),
        }
    }
}

impl StudyStats {
    pub fn study_minutes(&self) -> u64 {
        (self.study_time * 60.0).floor().max(0.0) as u64
    }

    pub fn tasks_done(&self) -> u32 {
        self.notes_created + self.quizzes_taken
    }

    pub fn average_quiz_score(&self) -> Option<f64> {
        if self.quiz_scores.is_empty() {
            None
        } else {
            Some(self.quiz_scores.iter().sum::<f64>() / self.quiz_scores.len() as f64)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatEvent {
    Notes(u32),
    Quiz(u32),
    Flashcards(u32),
    /// Hours studied.
    StudyTime(f64),
    /// Fraction correct, `percentage / 100`.
    QuizScore(f64),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Progression {
    pub user: UserProfile,
    pub stats: StudyStats,
    pub achievements: Vec<Achievement>,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event and returns whether it caused a level-up.
    ///
    /// The threshold is checked once per call, so a grant spanning several
    /// thresholds still advances a single level.
    pub fn record_event(&mut self, event: StatEvent) -> bool {
        match event {
            StatEvent::Notes(n) => {
                self.stats.notes_created += n;
                self.user.xp += XP_PER_NOTE * n as u64;
            }
            StatEvent::Quiz(n) => {
                self.stats.quizzes_taken += n;
                self.user.xp += XP_PER_QUIZ * n as u64;
            }
            StatEvent::Flashcards(n) => {
                self.stats.flashcards_reviewed += n;
                self.user.xp += XP_PER_FLASHCARD * n as u64;
            }
            StatEvent::StudyTime(hours) => {
                self.stats.study_time += hours;
                self.user.xp += (hours * XP_PER_STUDY_HOUR).floor().max(0.0) as u64;
            }
            StatEvent::QuizScore(score) => {
                self.stats.quiz_scores.push(score);
                self.stats.focus_score =
                    (self.stats.focus_score + FOCUS_SCORE_STEP).min(MAX_FOCUS_SCORE);
            }
        }

        if self.user.xp >= self.user.level_number as u64 * XP_PER_LEVEL {
            self.user.level_number += 1;
            log::info!("Level up: reached level {}", self.user.level_number);
            let description = format!("You reached level {}!", self.user.level_number);
            self.award("Level Up!", &description);
            return true;
        }
        false
    }

    pub fn xp_to_next_level(&self) -> u64 {
        (self.user.level_number as u64 * XP_PER_LEVEL).saturating_sub(self.user.xp)
    }

    pub fn award(&mut self, title: &str, description: &str) {
        self.achievements.push(Achievement {
            title: title.to_string(),
            description: description.to_string(),
            earned_at: Utc::now(),
        });
    }

    /// Onboarding. The avatar is the first two letters of the name, upper-cased.
    pub fn start_journey(&mut self, name: &str, goal: &str, level: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StudyError::InvalidProfile("Please enter your name".to_string()));
        }
        if goal.trim().is_empty() {
            return Err(StudyError::InvalidProfile("Please select a study goal".to_string()));
        }
        if level.trim().is_empty() {
            return Err(StudyError::InvalidProfile("Please select your study level".to_string()));
        }

        self.user.name = name.to_string();
        self.user.avatar = name.chars().take(2).collect::<String>().to_uppercase();
        self.user.goal = goal.trim().to_string();
        self.user.level = level.trim().to_string();
        self.user.streak = 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_event() {
        let mut p = Progression::new();
        assert!(!p.record_event(StatEvent::Notes(1)));
        assert_eq!(p.user.xp, 50);
        assert_eq!(p.stats.notes_created, 1);
        assert!(p.record_event(StatEvent::Notes(1)));
        assert_eq!(p.user.level_number, 2);
        assert_eq!(p.achievements.len(), 1);
        assert_eq!(p.achievements[0].description, "You reached level 2!");
    }

    #[test]
    fn test_single_step_level_up() {
        let mut p = Progression::new();
        // 20 cards = 500 XP, crosses several thresholds at once
        assert!(p.record_event(StatEvent::Flashcards(20)));
        assert_eq!(p.user.xp, 500);
        assert_eq!(p.user.level_number, 2);
        // each further call advances one more level while still above threshold
        assert!(p.record_event(StatEvent::QuizScore(0.5)));
        assert_eq!(p.user.level_number, 3);
    }

    #[test]
    fn test_study_time_floors_xp() {
        let mut p = Progression::new();
        p.record_event(StatEvent::StudyTime(0.25));
        assert_eq!(p.user.xp, 2);
        p.record_event(StatEvent::StudyTime(0.42));
        assert_eq!(p.user.xp, 6);
        assert!((p.stats.study_time - 0.67).abs() < 1e-9);
        assert_eq!(p.stats.study_minutes(), 40);
    }

    #[test]
    fn test_quiz_score_caps_focus() {
        let mut p = Progression::new();
        for _ in 0..10 {
            p.record_event(StatEvent::QuizScore(0.5));
        }
        assert_eq!(p.stats.focus_score, MAX_FOCUS_SCORE);
        assert_eq!(p.stats.quiz_scores.len(), 10);
        assert_eq!(p.user.xp, 0);
        assert_eq!(p.stats.average_quiz_score(), Some(0.5));
    }

    #[test]
    fn test_xp_to_next_level() {
        let mut p = Progression::new();
        p.record_event(StatEvent::Quiz(1));
        assert_eq!(p.xp_to_next_level(), 25);
        assert_eq!(p.stats.tasks_done(), 1);
    }

    #[test]
    fn test_start_journey() {
        let mut p = Progression::new();
        assert_eq!(p.user.display_name(), "Learner");
        assert!(matches!(
            p.start_journey("   ", "learn", "undergrad"),
            Err(StudyError::InvalidProfile(_))
        ));
        p.start_journey(" ada ", "exam", "graduate").unwrap();
        assert_eq!(p.user.name, "ada");
        assert_eq!(p.user.avatar, "AD");
        assert_eq!(p.user.streak, 1);
        assert_eq!(p.user.display_name(), "ada");
    }
}
