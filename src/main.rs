//*** START FILE: src/main.rs ***//
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use studybuddy::config::{load_config_from_file, Config};
use studybuddy::parsing::document::{extract_text, load_document};
use studybuddy::profile_io::FileStore;
use studybuddy::render;
use studybuddy::study_session::{StudySession, SAMPLE_NOTES_TEXT};
use studybuddy::synthesis;
use studybuddy::types::study_data::{Answer, NoteType, Question, QuizType};

const DEFAULT_CONFIG_PATH: &str = "studybuddy.toml";

#[derive(Parser)]
#[command(
    name = "studybuddy",
    about = "Notes, quizzes and flashcards from your study material",
    version
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seed for reproducible quizzes and shuffles (overrides the config)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NoteKind {
    Summary,
    Detailed,
    Bullet,
    Mindmap,
    Plain,
}

impl From<NoteKind> for NoteType {
    fn from(kind: NoteKind) -> Self {
        match kind {
            NoteKind::Summary => NoteType::Summary,
            NoteKind::Detailed => NoteType::Detailed,
            NoteKind::Bullet => NoteType::Bullet,
            NoteKind::Mindmap => NoteType::MindMap,
            NoteKind::Plain => NoteType::Plain,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QuizKind {
    Mcq,
    Truefalse,
    Short,
    Mixed,
}

impl From<QuizKind> for QuizType {
    fn from(kind: QuizKind) -> Self {
        match kind {
            QuizKind::Mcq => QuizType::Mcq,
            QuizKind::Truefalse => QuizType::TrueFalse,
            QuizKind::Short => QuizType::Short,
            QuizKind::Mixed => QuizType::Mixed,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate notes from a document
    Notes {
        /// Text document ("-" reads stdin)
        file: String,
        #[arg(long, value_enum, default_value = "detailed")]
        kind: NoteKind,
        /// Also write the notes to StudyBuddy-Notes-<date>.txt in this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Generate a quiz and grade your answers
    Quiz {
        /// Text document ("-" reads stdin)
        file: String,
        #[arg(long, value_enum, default_value = "mcq")]
        kind: QuizKind,
        /// Comma-separated answers instead of reading them from stdin
        #[arg(long)]
        answers: Option<String>,
    },

    /// Review generated flashcards interactively
    Flashcards {
        /// Text document ("-" reads stdin)
        file: String,
    },

    /// Notes from the built-in sample text
    SampleNotes {
        #[arg(long, value_enum, default_value = "detailed")]
        kind: NoteKind,
    },

    /// Quiz over the built-in sample text
    SampleQuiz {
        #[arg(long, value_enum, default_value = "mcq")]
        kind: QuizKind,
        #[arg(long)]
        answers: Option<String>,
    },

    /// Set up your learner profile
    Onboard {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "learn")]
        goal: String,
        #[arg(long, default_value = "undergrad")]
        level: String,
    },

    /// Record a completed 25-minute focus session
    Focus,

    /// Show progress and achievements
    Stats,

    /// Erase all saved progress
    Reset,
}

/// Stdin cannot carry both the document and the answers.
fn check_answer_source(file: &str, answers: Option<&str>) -> anyhow::Result<()> {
    if file == "-" && answers.is_none() {
        anyhow::bail!("--answers is required when reading the document from stdin");
    }
    Ok(())
}

fn read_source(file: &str, config: &Config) -> anyhow::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    let mut document = load_document(Path::new(file), config)
        .with_context(|| format!("Failed to load {}", file))?;
    let text = extract_text(&mut document, |p| {
        log::info!("Extracting text... page {}/{} ({:.0}%)", p.page, p.total, p.percent);
    })?;
    Ok(text)
}

/// One answer per question. Option questions take a letter or a 1-based number.
fn parse_answer(question: &Question, raw: &str) -> Option<Answer> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match question {
        Question::Short { .. } => Some(Answer::Text(raw.to_string())),
        _ => render::parse_option_letter(raw)
            .or_else(|| raw.parse::<usize>().ok().and_then(|n| n.checked_sub(1)))
            .map(Answer::Choice),
    }
}

fn collect_answers(
    questions: &[Question],
    inline: Option<&str>,
) -> anyhow::Result<Vec<Option<Answer>>> {
    let raw: Vec<String> = match inline {
        Some(list) => list.split(',').map(String::from).collect(),
        None => {
            let stdin = io::stdin();
            let mut lines = Vec::new();
            for question in questions.iter() {
                print!("{}> ", question.type_tag());
                io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                lines.push(line);
            }
            lines
        }
    };
    Ok(questions
        .iter()
        .enumerate()
        .map(|(i, q)| raw.get(i).and_then(|r| parse_answer(q, r)))
        .collect())
}

fn run_quiz(
    session: &mut StudySession<FileStore>,
    questions: Vec<Question>,
    answers: Option<&str>,
) -> anyhow::Result<()> {
    if questions.is_empty() {
        println!("Not enough material to build a quiz.");
        return Ok(());
    }
    for (i, q) in questions.iter().enumerate() {
        println!("{}", render::render_question(i + 1, q));
    }
    let answers = collect_answers(&questions, answers)?;
    let evaluation = session.submit_quiz(&answers)?;
    println!("{}", render::render_evaluation(&questions, &evaluation));
    Ok(())
}

fn review_flashcards(session: &mut StudySession<FileStore>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    loop {
        println!("{}", render::render_card(session.deck()));
        print!("[n]ext [p]rev [f]lip [k]now [u]nknown [s]huffle [q]uit > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "n" => {
                session.deck_mut().advance();
            }
            "p" => {
                session.deck_mut().retreat();
            }
            "f" => {
                session.deck_mut().toggle_flip();
            }
            "k" => {
                if let Some(outcome) = session.mark_known()? {
                    if outcome.deck_complete {
                        println!("Flashcard Master! You mastered all flashcards!");
                    }
                    if let Some(delay) = outcome.auto_advance_after {
                        std::thread::sleep(delay);
                        session.deck_mut().advance();
                    }
                }
            }
            "u" => {
                session.deck_mut().mark_unknown();
            }
            "s" => session.shuffle_deck(),
            "q" => break,
            other => println!("Unknown command '{}'", other),
        }
    }
    Ok(())
}

fn announce_level_up(leveled_up: bool, session: &StudySession<FileStore>) {
    if leveled_up {
        println!("Level Up! You reached level {}!", session.progression().user.level_number);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config_from_file(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    let seed = cli.seed.or(config.seed);
    let store = FileStore::new(config.data_dir.clone());
    let mut session = StudySession::open(store, seed)?;

    match cli.command {
        Command::Notes { file, kind, export } => {
            let text = read_source(&file, &config)?;
            let generated = session.generate_notes(&text, kind.into())?;
            println!("{}", render::render_notes(&generated.artifact));
            announce_level_up(generated.leveled_up, &session);
            if let Some(dir) = export {
                let today = chrono::Local::now().date_naive();
                if let Some(path) = render::export_notes(&generated.artifact, &dir, today)? {
                    println!("Saved {}", path.display());
                }
            }
        }
        Command::Quiz { file, kind, answers } => {
            check_answer_source(&file, answers.as_deref())?;
            let text = read_source(&file, &config)?;
            let generated = session.generate_quiz(&text, kind.into())?;
            announce_level_up(generated.leveled_up, &session);
            run_quiz(&mut session, generated.artifact, answers.as_deref())?;
        }
        Command::Flashcards { file } => {
            let text = read_source(&file, &config)?;
            let generated = session.generate_flashcards(&text)?;
            println!("{} flashcards created", generated.artifact);
            announce_level_up(generated.leveled_up, &session);
            if generated.artifact > 0 {
                review_flashcards(&mut session)?;
            }
        }
        Command::SampleNotes { kind } => {
            let notes = synthesis::generate_notes(SAMPLE_NOTES_TEXT, kind.into());
            println!("{}", render::render_notes(&notes));
        }
        Command::SampleQuiz { kind, answers } => {
            let questions = session.load_sample_quiz(kind.into()).to_vec();
            run_quiz(&mut session, questions, answers.as_deref())?;
        }
        Command::Onboard { name, goal, level } => {
            session.start_journey(&name, &goal, &level)?;
            println!("Welcome, {}!", session.progression().user.display_name());
        }
        Command::Focus => {
            let leveled_up = session.complete_focus_session()?;
            println!("Focus Session Complete! Great job!");
            announce_level_up(leveled_up, &session);
        }
        Command::Stats => {
            print!("{}", render::render_progress(session.progression()));
        }
        Command::Reset => {
            session.reset()?;
            println!("All progress has been reset.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdin_document_needs_inline_answers() {
        assert!(check_answer_source("-", None).is_err());
        assert!(check_answer_source("-", Some("a,b,c")).is_ok());
        assert!(check_answer_source("lecture.txt", None).is_ok());
    }

    #[test]
    fn test_inline_answers_parse_per_question() {
        let questions = vec![
            Question::Mcq {
                text: "Cells store energy as __________".into(),
                options: vec!["ATP".into(), "DNA".into(), "RNA".into(), "Concept".into()],
                correct: 0,
                explanation: String::new(),
            },
            Question::TrueFalse {
                text: "Water is wet".into(),
                options: vec!["True".into(), "False".into()],
                correct: 0,
                explanation: String::new(),
            },
            Question::Short {
                text: "Explain the concept of \"osmosis\".".into(),
                correct: "osmosis".into(),
                explanation: String::new(),
            },
        ];
        let answers = collect_answers(&questions, Some("c,2, water crosses membranes")).unwrap();
        assert_eq!(
            answers,
            vec![
                Some(Answer::Choice(2)),
                Some(Answer::Choice(1)),
                Some(Answer::Text("water crosses membranes".into())),
            ]
        );
        assert_eq!(collect_answers(&questions, Some("")).unwrap(), vec![None, None, None]);
    }
}
//*** END FILE: src/main.rs ***//
