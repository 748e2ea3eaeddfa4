//! Application state and the interactive quiz flow

pub mod command;

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::coach::client::CoachClient;
use crate::coach::models::{GenerateQuiz, QuizMode};
use crate::coach::resilient::ResilientCoach;
use crate::config::Config;
use crate::quiz::model::Topic;
use crate::quiz::score;
use crate::quiz::session::{Advance, QuizSession};
use crate::report::{self, ReportView};
use command::{Command, ParseResult, parse_command};

/// How a session loop ended
enum SessionOutcome {
    /// The learner finished and the report was shown
    Completed,
    /// The learner quit or input ended
    Quit,
}

/// The main application
///
/// Owns the one active session; starting a new quiz replaces it and
/// completing or quitting disposes of it.
pub struct App {
    /// Application configuration
    config: Config,

    /// Resilient access to the coach backend
    coach: ResilientCoach,

    /// Cached topic catalog, replaced wholesale on each reload
    topics: Vec<Topic>,

    /// Whether the cached catalog is built-in data
    catalog_offline: bool,

    /// The active quiz attempt, if any
    session: Option<QuizSession>,

    /// Line input from the terminal
    lines: Lines<BufReader<Stdin>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        let client = CoachClient::new(&config.base_url, config.user_id, config.request_timeout_secs);

        Self {
            config,
            coach: ResilientCoach::new(client),
            topics: Vec::new(),
            catalog_offline: false,
            session: None,
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Run the interactive flow: pick topics, take quizzes, see reports
    pub async fn run(&mut self) -> Result<()> {
        println!("mentor - study with or without a connection");
        self.reload_topics().await;

        loop {
            self.print_topics();

            let Some(topic_ids) = self.choose_topics().await? else { break };
            let Some(mode) = self.choose_mode().await? else { break };

            let request = GenerateQuiz::new(mode)
                .with_topics(topic_ids)
                .with_num_questions(self.config.quiz_length);
            self.take_quiz(request).await?;

            let Some(line) = self.read_line("\nEnter for another quiz, q to quit: ").await? else {
                break;
            };
            if line.trim().eq_ignore_ascii_case("q") {
                break;
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Generate a quiz, drive the session to its end, and report
    pub async fn take_quiz(&mut self, request: GenerateQuiz) -> Result<()> {
        let quiz = self.coach.generate_quiz(&request).await;
        if quiz.is_fallback() {
            println!("[offline] The coach is unreachable; using the built-in quiz.");
        }

        match QuizSession::begin(quiz.value) {
            Ok(session) => self.session = Some(session),
            Err(e) => {
                println!("Cannot start the quiz: {}", e);
                return Ok(());
            }
        }

        print_help();
        self.run_session().await?;
        Ok(())
    }

    /// Fetch and print the learner's per-topic progress
    pub async fn show_progress(&self) {
        let rows = self.coach.progress().await;
        if rows.is_fallback() {
            println!("[offline] Showing built-in sample progress.");
        }

        println!("{:<24} {:>8} {:>9}  Status", "Topic", "Mastery", "Minutes");
        for row in &rows.value {
            let status = if row.is_mastered() {
                "mastered"
            } else if row.needs_attention() {
                "needs attention"
            } else {
                "in progress"
            };
            println!(
                "{:<24} {:>7.0}% {:>9}  {}",
                row.topic_name, row.mastery_level, row.time_spent_minutes, status
            );
        }
    }

    /// Fetch and print the review schedule
    pub async fn show_schedule(&self) {
        let schedule = self.coach.review_schedule(self.config.schedule_days).await;
        if schedule.is_fallback() {
            println!("[offline] Showing the built-in review schedule.");
        }

        for (day, entries) in &schedule.value.schedule {
            if entries.is_empty() {
                println!("{}  -", day);
            } else {
                let names: Vec<&str> = entries.iter().map(|e| e.topic_name.as_str()).collect();
                println!("{}  {}", day, names.join(", "));
            }
        }
    }

    /// Fetch and print the onboarding diagnostic questions
    pub async fn show_diagnostic(&self) {
        use crate::coach::models::DiagnosticKind;

        let questions = self.coach.diagnostic_questions().await;
        if questions.is_fallback() {
            println!("[offline] Showing the built-in diagnostic questions.");
        }

        for question in &questions.value {
            let hint = match question.kind {
                DiagnosticKind::Text => "free text",
                DiagnosticKind::Choice => "choose one",
                DiagnosticKind::Multi => "choose any",
            };
            println!("{}. {} ({})", question.id, question.text, hint);
            if let Some(options) = &question.options {
                for (i, option) in options.iter().enumerate() {
                    println!("   {}. {}", i + 1, option);
                }
            }
        }
    }

    /// Reload and print the topic catalog
    pub async fn show_topics(&mut self) {
        self.reload_topics().await;
        self.print_topics();
    }

    async fn reload_topics(&mut self) {
        let sourced = self.coach.topics().await;
        self.catalog_offline = sourced.is_fallback();
        self.topics = sourced.value;
    }

    fn print_topics(&self) {
        if self.catalog_offline {
            println!("[offline] Showing the built-in topic catalog.");
        }

        println!("\nTopics:");
        for (i, topic) in self.topics.iter().enumerate() {
            println!(
                "  {}. {} [{}] - {} questions",
                i + 1,
                topic.name,
                topic.difficulty_label(),
                topic.question_count
            );
        }
    }

    /// Ask which topics to quiz on; None means quit
    async fn choose_topics(&mut self) -> Result<Option<Vec<String>>> {
        loop {
            let Some(line) = self
                .read_line("\nTopic numbers separated by spaces (empty = all, q = quit): ")
                .await?
            else {
                return Ok(None);
            };

            if line.trim().eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match parse_topic_selection(&line, &self.topics) {
                Some(ids) => return Ok(Some(ids)),
                None => println!("Pick numbers between 1 and {}.", self.topics.len()),
            }
        }
    }

    /// Ask which quiz mode to use; None means quit
    async fn choose_mode(&mut self) -> Result<Option<QuizMode>> {
        loop {
            let Some(line) = self
                .read_line("Mode - practice, diagnostic or review (empty = practice): ")
                .await?
            else {
                return Ok(None);
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(Some(QuizMode::default()));
            }
            if trimmed.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match QuizMode::parse(trimmed) {
                Some(mode) => return Ok(Some(mode)),
                None => println!("Unknown mode {:?}.", trimmed),
            }
        }
    }

    /// Drive the active session until it completes or the learner quits
    async fn run_session(&mut self) -> Result<SessionOutcome> {
        loop {
            self.render_current();

            let Some(line) = self.read_line("> ").await? else {
                self.session = None;
                return Ok(SessionOutcome::Quit);
            };

            match parse_command(&line) {
                ParseResult::Ok(Command::Choose(n)) => self.select_choice(n),
                ParseResult::Ok(Command::Bool(b)) => self.record(if b { "True" } else { "False" }),
                ParseResult::Ok(Command::Answer(text)) => self.record(&text),
                ParseResult::Ok(Command::Next) => {
                    if let Some(outcome) = self.try_advance().await? {
                        return Ok(outcome);
                    }
                }
                ParseResult::Ok(Command::Back) => {
                    if let Some(session) = self.session.as_mut() {
                        session.retreat()?;
                    }
                }
                ParseResult::Ok(Command::Jump(position)) => self.jump(position),
                ParseResult::Ok(Command::Quit) => {
                    self.session = None;
                    println!("Quiz abandoned.");
                    return Ok(SessionOutcome::Quit);
                }
                ParseResult::Ok(Command::Help) => print_help(),
                ParseResult::Ok(Command::Nop) => {}
                ParseResult::UnknownCommand(cmd) => {
                    println!("Unknown command {:?}. Type ? for help.", cmd)
                }
                ParseResult::MissingArgument(cmd) => println!("{} needs an argument.", cmd),
                ParseResult::InvalidArgument(message) => println!("{}", message),
            }
        }
    }

    /// Record the numbered choice as the answer to the current question
    fn select_choice(&mut self, n: usize) {
        let Some(session) = self.session.as_mut() else { return };

        let choices = session.current().question.choices();
        if n > choices.len() {
            println!("This question has {} choices.", choices.len());
            return;
        }

        // record_answer cannot fail while the loop keeps the session open
        if session.record_answer(choices[n - 1].clone()).is_ok() {
            println!("Recorded. Type n to continue.");
        }
    }

    fn record(&mut self, answer: &str) {
        if let Some(session) = self.session.as_mut() {
            if session.record_answer(answer).is_ok() {
                println!("Recorded. Type n to continue.");
            }
        }
    }

    fn jump(&mut self, position: usize) {
        if let Some(session) = self.session.as_mut() {
            if let Err(e) = session.jump_to(position - 1) {
                println!("{}", e);
            }
        }
    }

    /// Advance; on completion submit the results and print the report
    async fn try_advance(&mut self) -> Result<Option<SessionOutcome>> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Some(SessionOutcome::Quit));
        };

        match session.advance() {
            Ok(Advance::Next) => Ok(None),
            Ok(Advance::Completed) => {
                // Disposal point: the session ends with this report.
                let session = self.session.take().context("session vanished mid-advance")?;
                let view = report::submit(&self.coach, &session).await?;
                print_report(&view, &session);
                Ok(Some(SessionOutcome::Completed))
            }
            Err(e) if e.is_recoverable() => {
                println!("{}", e);
                Ok(None)
            }
            Err(e) => {
                tracing::error!("Session state violated: {}", e);
                Err(e.into())
            }
        }
    }

    fn render_current(&self) {
        let Some(session) = &self.session else { return };

        let view = session.current();
        println!("\n[{}/{}] {}", view.position, view.total, view.question.prompt);

        let choices = view.question.choices();
        for (i, choice) in choices.iter().enumerate() {
            let marker = if view.answer.is_some_and(|a| score::answer_is_correct(a, choice)) {
                ">"
            } else {
                " "
            };
            println!(" {} {}. {}", marker, i + 1, choice);
        }

        // A free-text answer matching no choice is still worth showing.
        if let Some(answer) = view.answer {
            if !choices.iter().any(|c| score::answer_is_correct(answer, c)) {
                println!("   (answered: {})", answer);
            }
        }
    }

    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush().context("Failed to flush stdout")?;
        self.lines.next_line().await.context("Failed to read input")
    }
}

/// Parse a topic selection like "1 3" into topic ids
///
/// Empty input selects every topic; any out-of-range or non-numeric entry
/// rejects the whole line.
fn parse_topic_selection(input: &str, topics: &[Topic]) -> Option<Vec<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(topics.iter().map(|t| t.id.clone()).collect());
    }

    let mut ids = Vec::new();
    for part in input.split_whitespace() {
        let number: usize = part.parse().ok()?;
        if number < 1 || number > topics.len() {
            return None;
        }
        ids.push(topics[number - 1].id.clone());
    }
    Some(ids)
}

fn print_help() {
    println!("\nCommands:");
    println!("  1-9       select a choice");
    println!("  t, f      answer true or false");
    println!("  a <text>  free-text answer");
    println!("  n, next   next question (needs an answer)");
    println!("  b, back   previous question");
    println!("  j <k>     jump to question k");
    println!("  ?         this help");
    println!("  q         quit the quiz");
}

/// Print the score, the per-question outcomes and the recommendations
fn print_report(view: &ReportView, session: &QuizSession) {
    println!(
        "\nScore: {}% ({} of {} correct) - {}",
        view.summary.percentage, view.summary.correct, view.summary.total, view.summary.mood.label()
    );

    for (question, record) in session.quiz().questions.iter().zip(&view.records) {
        if score::answer_is_correct(&record.answer, &question.correct_answer) {
            println!("  + {}", question.prompt);
        } else {
            println!("  x {} (correct: {})", question.prompt, question.correct_answer);
            if !question.explanation.is_empty() {
                println!("      {}", question.explanation);
            }
        }
    }

    if view.is_offline() {
        println!("\nRecommendations [offline]:");
    } else {
        println!("\nRecommendations:");
    }
    for recommendation in &view.recommendations {
        println!("  - {}", recommendation);
    }

    if !view.weak_concepts.is_empty() {
        println!("Worth revisiting: {}", view.weak_concepts.join(", "));
    }
}
