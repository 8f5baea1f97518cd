//! Heuristic quiz questions and their grading.
//!
//! Sentence pools and option lists are shuffled with a uniform Fisher–Yates
//! shuffle drawn from the caller's random source.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::parsing::text_extractor::{extract_keywords, segment_sentences, QUIZ_STOP_WORDS};
use crate::types::study_data::{Answer, Question, QuizType};

const MIN_SENTENCE_LEN: usize = 30;
const MAX_SENTENCE_LEN: usize = 200;
const MAX_KEYWORDS: usize = 10;
pub const QUESTIONS_PER_QUIZ: usize = 5;

/// A word must be longer than this to become an MCQ answer.
const MIN_ANSWER_LEN: usize = 5;
const OPTIONS_PER_MCQ: usize = 4;
pub const BLANK: &str = "__________";
pub const FALLBACK_DISTRACTOR: &str = "Concept";
const FALSIFIERS: [&str; 4] = ["never", "always", "not", "rarely"];

/// Short answers longer than this many characters are accepted.
pub const SHORT_ANSWER_MIN_CHARS: usize = 10;
pub const PASS_PERCENTAGE: u32 = 70;

pub fn generate_quiz<R: Rng + ?Sized>(
    text: &str,
    quiz_type: QuizType,
    rng: &mut R,
) -> Vec<Question> {
    let sentences = segment_sentences(text, MIN_SENTENCE_LEN, Some(MAX_SENTENCE_LEN));
    let keywords: Vec<String> = extract_keywords(text, QUIZ_STOP_WORDS)
        .into_iter()
        .take(MAX_KEYWORDS)
        .collect();
    log::debug!(
        "quiz: {} candidate sentences, {} keywords",
        sentences.len(),
        keywords.len()
    );

    match quiz_type {
        QuizType::Mcq => generate_mcq(&sentences, &keywords, QUESTIONS_PER_QUIZ, rng),
        QuizType::TrueFalse => generate_true_false(&sentences, QUESTIONS_PER_QUIZ, rng),
        QuizType::Short => generate_short_answer(&keywords, QUESTIONS_PER_QUIZ),
        QuizType::Mixed => {
            let mut questions = generate_mcq(&sentences, &keywords, 2, rng);
            questions.extend(generate_true_false(&sentences, 2, rng));
            questions.extend(generate_short_answer(&keywords, 1));
            questions
        }
    }
}

/// At most `count` sentences are tried; a sentence with no long word is
/// skipped without being replaced, so fewer questions may come back.
pub fn generate_mcq<R: Rng + ?Sized>(
    sentences: &[String],
    keywords: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = sentences.to_vec();
    pool.shuffle(rng);

    let mut questions = Vec::new();
    for sentence in pool.iter().take(count) {
        let candidates: Vec<&str> = sentence
            .split(' ')
            .filter(|w| w.chars().count() > MIN_ANSWER_LEN)
            .collect();
        let Some(&answer) = candidates.choose(rng) else {
            continue;
        };

        let mut options = pick_distractors(answer, keywords, rng);
        let correct = rng.gen_range(0..=options.len());
        options.insert(correct, answer.to_string());

        questions.push(Question::Mcq {
            text: sentence.replacen(answer, BLANK, 1),
            options,
            correct,
            explanation: format!("The correct answer is \"{}\".", answer),
        });
    }
    questions
}

fn pick_distractors<R: Rng + ?Sized>(
    answer: &str,
    keywords: &[String],
    rng: &mut R,
) -> Vec<String> {
    let wanted = OPTIONS_PER_MCQ - 1;
    let mut pool: Vec<&str> = Vec::new();
    for keyword in keywords {
        if keyword != answer && !pool.contains(&keyword.as_str()) {
            pool.push(keyword);
        }
    }
    if pool.len() < wanted
        && answer != FALLBACK_DISTRACTOR
        && !pool.contains(&FALLBACK_DISTRACTOR)
    {
        pool.push(FALLBACK_DISTRACTOR);
    }
    pool.choose_multiple(rng, wanted)
        .map(|s| s.to_string())
        .collect()
}

pub fn generate_true_false<R: Rng + ?Sized>(
    sentences: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = sentences.to_vec();
    pool.shuffle(rng);

    pool.iter()
        .take(count)
        .map(|sentence| {
            let is_true = rng.gen_bool(0.5);
            let mut statement = sentence.clone();
            if !is_true {
                let mut words: Vec<&str> = sentence.split(' ').collect();
                // Sentences of three words or fewer stay verbatim but are still keyed false.
                if words.len() > 3 {
                    let idx = rng.gen_range(1..=words.len() - 2);
                    words[idx] = FALSIFIERS[rng.gen_range(0..FALSIFIERS.len())];
                    statement = words.join(" ");
                }
            }
            Question::TrueFalse {
                text: statement,
                options: vec!["True".to_string(), "False".to_string()],
                correct: if is_true { 0 } else { 1 },
                explanation: if is_true {
                    "This statement is true.".to_string()
                } else {
                    "This statement is false.".to_string()
                },
            }
        })
        .collect()
}

pub fn generate_short_answer(keywords: &[String], count: usize) -> Vec<Question> {
    keywords
        .iter()
        .take(count)
        .map(|keyword| Question::Short {
            text: format!("Explain the concept of \"{}\".", keyword),
            correct: keyword.clone(),
            explanation: format!(
                "Your answer should include definition, characteristics, and examples of {}.",
                keyword
            ),
        })
        .collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionResult {
    pub index: usize,
    pub correct: bool,
    pub user_answer: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuizEvaluation {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub results: Vec<QuestionResult>,
    pub feedback: String,
}

impl QuizEvaluation {
    pub fn passed(&self) -> bool {
        self.percentage >= PASS_PERCENTAGE
    }
}

/// Grades `answers[i]` against `questions[i]`. Missing answers are wrong.
pub fn evaluate_quiz(questions: &[Question], answers: &[Option<Answer>]) -> QuizEvaluation {
    let results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answer = answers.get(index).and_then(|a| a.as_ref());
            let (correct, user_answer) = grade(question, answer);
            QuestionResult {
                index,
                correct,
                user_answer,
            }
        })
        .collect();

    let score = results.iter().filter(|r| r.correct).count();
    let total = questions.len();
    let percentage = if total == 0 {
        0
    } else {
        (score as f64 / total as f64 * 100.0).round() as u32
    };
    let feedback = if percentage >= PASS_PERCENTAGE {
        "Great job!"
    } else {
        "Keep practicing!"
    };

    QuizEvaluation {
        score,
        total,
        percentage,
        results,
        feedback: feedback.to_string(),
    }
}

fn grade(question: &Question, answer: Option<&Answer>) -> (bool, Option<String>) {
    match (question, answer) {
        (
            Question::Mcq { options, correct, .. } | Question::TrueFalse { options, correct, .. },
            Some(Answer::Choice(chosen)),
        ) => (chosen == correct, options.get(*chosen).cloned()),
        (Question::Short { .. }, Some(Answer::Text(text))) => {
            let text = text.trim();
            let shown = (!text.is_empty()).then(|| text.to_string());
            (text.chars().count() > SHORT_ANSWER_MIN_CHARS, shown)
        }
        _ => (false, None),
    }
}
