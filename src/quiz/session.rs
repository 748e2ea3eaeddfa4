//! The quiz session state machine
//!
//! A session owns one immutable quiz and tracks the cursor, the captured
//! answers and completion. Every operation validates before it mutates, so
//! a failed call leaves the session exactly as it was before the call.

use std::collections::HashMap;

use thiserror::Error;

use super::model::{Question, Quiz};
use super::score::{self, AnswerRecord, ScoreReport, ScoreSummary};

/// Errors raised by session operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A session cannot be started without questions
    #[error("cannot start a session for an empty quiz")]
    EmptyQuiz,

    /// No answer recorded for the current question
    #[error("no answer recorded for question {position}")]
    AnswerRequired {
        /// 1-based position of the unanswered question
        position: usize,
    },

    /// Jump target outside the quiz
    #[error("question index {index} is out of range (quiz has {len} questions)")]
    IndexOutOfRange {
        /// Requested 0-based index
        index: usize,
        /// Number of questions in the quiz
        len: usize,
    },

    /// Navigation or answer capture on a completed session
    #[error("the session is already completed")]
    SessionClosed,

    /// Scoring requested before the session completed
    #[error("the session is not completed yet")]
    NotCompleted,
}

impl SessionError {
    /// Whether this is user-input trouble the UI should prompt about,
    /// rather than a violated state-machine contract
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SessionError::AnswerRequired { .. } | SessionError::IndexOutOfRange { .. })
    }
}

/// Lifecycle status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Questions are being presented and answered
    InProgress,
    /// The last question was advanced past; entered exactly once
    Completed,
}

/// Signal returned by [`QuizSession::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next question
    Next,
    /// The session just completed
    Completed,
}

/// Read-only projection of the current question for the view layer
///
/// Carries the stored raw answer so views highlight the selected choice
/// from it directly instead of re-deriving selection from rendered text.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    /// The question at the cursor
    pub question: &'a Question,
    /// 1-based position for display
    pub position: usize,
    /// Total question count
    pub total: usize,
    /// The learner's stored answer for this question, if any
    pub answer: Option<&'a str>,
}

/// One active quiz attempt
///
/// Created through [`QuizSession::begin`]; replaced wholesale to start over.
/// Holding the previous session is never required: a new `begin` carries no
/// state across.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    index: usize,
    answers: HashMap<usize, String>,
    status: SessionStatus,
}

impl QuizSession {
    /// Start a session over the given quiz at question 1 with no answers
    pub fn begin(quiz: Quiz) -> Result<Self, SessionError> {
        if quiz.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }
        Ok(Self { quiz, index: 0, answers: HashMap::new(), status: SessionStatus::InProgress })
    }

    /// The quiz this session runs over
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Current lifecycle status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether the session has completed
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Current 0-based question index; always within the quiz
    pub fn index(&self) -> usize {
        self.index
    }

    /// The stored raw answer for a question index, if any
    pub fn answer_at(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Number of questions with a stored answer
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Fraction of questions answered so far, in 0.0..=1.0
    pub fn progress_fraction(&self) -> f32 {
        self.answers.len() as f32 / self.quiz.len() as f32
    }

    /// Projection of the current question; a pure read, valid in any status
    pub fn current(&self) -> QuestionView<'_> {
        QuestionView {
            question: &self.quiz.questions[self.index],
            position: self.index + 1,
            total: self.quiz.len(),
            answer: self.answer_at(self.index),
        }
    }

    /// Store the learner's answer for the current question, overwriting any
    /// previous answer there
    ///
    /// Correctness is not checked here; grading happens at [`Self::score`].
    pub fn record_answer(&mut self, answer: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.answers.insert(self.index, answer.into());
        Ok(())
    }

    /// Move to the next question, or complete the session from the last one
    ///
    /// Requires an answer at the current question; without one this fails
    /// with the recoverable [`SessionError::AnswerRequired`] and the session
    /// is unchanged.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.ensure_open()?;
        if !self.answers.contains_key(&self.index) {
            return Err(SessionError::AnswerRequired { position: self.index + 1 });
        }
        if self.index + 1 == self.quiz.len() {
            self.status = SessionStatus::Completed;
            Ok(Advance::Completed)
        } else {
            self.index += 1;
            Ok(Advance::Next)
        }
    }

    /// Move to the previous question; a no-op at the first question
    ///
    /// Never requires an answer to be present.
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.index = self.index.saturating_sub(1);
        Ok(())
    }

    /// Move the cursor to any question in the quiz
    ///
    /// Like [`Self::retreat`] this has no answer requirement; completion
    /// still only happens by advancing past the last question.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_open()?;
        if index >= self.quiz.len() {
            return Err(SessionError::IndexOutOfRange { index, len: self.quiz.len() });
        }
        self.index = index;
        Ok(())
    }

    /// Grade the completed session
    ///
    /// Pure: calling this any number of times yields identical results.
    /// Unanswered questions grade as the empty string. Fails with
    /// [`SessionError::NotCompleted`] while the session is in progress.
    pub fn score(&self) -> Result<ScoreReport, SessionError> {
        if self.status != SessionStatus::Completed {
            return Err(SessionError::NotCompleted);
        }

        let mut correct = 0u32;
        let mut records = Vec::with_capacity(self.quiz.len());
        for (i, question) in self.quiz.questions.iter().enumerate() {
            let answer = self.answer_at(i).unwrap_or("");
            if score::answer_is_correct(answer, &question.correct_answer) {
                correct += 1;
            }
            records.push(AnswerRecord::new(question.id.clone(), answer));
        }

        Ok(ScoreReport {
            summary: ScoreSummary::from_counts(self.quiz.len() as u32, correct),
            records,
        })
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::InProgress => Ok(()),
            SessionStatus::Completed => Err(SessionError::SessionClosed),
        }
    }
}
