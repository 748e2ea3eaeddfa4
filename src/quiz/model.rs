//! Value types for topics, questions and quizzes
//!
//! These mirror the coach service's wire format and are immutable once
//! loaded: a catalog reload or a new quiz always replaces whole objects.

use serde::{Deserialize, Serialize};

/// A learnable topic from the coach's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Category (e.g. "programming", "math")
    #[serde(default)]
    pub category: String,
    /// Difficulty level, 1-3
    #[serde(default = "default_difficulty_level")]
    pub difficulty_level: u8,
    /// Number of questions the coach holds for this topic
    #[serde(default)]
    pub question_count: u32,
}

fn default_difficulty_level() -> u8 {
    1
}

impl Topic {
    /// Human-readable difficulty, matching the coach's level vocabulary
    pub fn difficulty_label(&self) -> &'static str {
        match self.difficulty_level {
            1 => "beginner",
            2 => "intermediate",
            _ => "advanced",
        }
    }
}

/// The two question kinds the client renders and grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one option from a list
    MultipleChoice,
    /// True or False
    TrueFalse,
}

/// A single quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within its quiz
    pub id: String,
    /// Question kind
    #[serde(rename = "question_type")]
    pub kind: QuestionKind,
    /// Prompt text shown to the learner
    #[serde(rename = "question_text")]
    pub prompt: String,
    /// Options for MultipleChoice; the coach sends null for TrueFalse
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// The correct answer, comparable to exactly one rendered choice
    pub correct_answer: String,
    /// Free-form difficulty label, display only
    #[serde(default)]
    pub difficulty: String,
    /// Explanation shown after grading, display only
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// The fixed choice pair rendered for TrueFalse questions
    pub const TRUE_FALSE_CHOICES: [&'static str; 2] = ["True", "False"];

    /// Create a multiple-choice question
    pub fn multiple_choice(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: QuestionKind::MultipleChoice,
            prompt: prompt.into(),
            options: Some(options),
            correct_answer: correct_answer.into(),
            difficulty: difficulty.into(),
            explanation: String::new(),
        }
    }

    /// Create a true/false question
    pub fn true_false(
        id: impl Into<String>,
        prompt: impl Into<String>,
        answer: bool,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: QuestionKind::TrueFalse,
            prompt: prompt.into(),
            options: None,
            correct_answer: if answer { "True" } else { "False" }.to_string(),
            difficulty: difficulty.into(),
            explanation: String::new(),
        }
    }

    /// Attach an explanation
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// The choices rendered for this question, in display order
    pub fn choices(&self) -> Vec<String> {
        match self.kind {
            QuestionKind::MultipleChoice => self.options.clone().unwrap_or_default(),
            QuestionKind::TrueFalse => {
                Self::TRUE_FALSE_CHOICES.iter().map(|s| s.to_string()).collect()
            }
        }
    }

    /// Index of the rendered choice matching the correct answer
    ///
    /// Returns None if no choice matches or the match is ambiguous; a
    /// well-formed question always has exactly one match (case-insensitive).
    pub fn correct_choice_index(&self) -> Option<usize> {
        let correct = self.correct_answer.to_lowercase();
        let mut found = None;
        for (i, choice) in self.choices().iter().enumerate() {
            if choice.to_lowercase() == correct {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        found
    }
}

/// An ordered set of questions generated by the coach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Quiz identifier, referenced on submission
    pub id: String,
    /// Questions in presentation order
    pub questions: Vec<Question>,
    /// Topics this quiz was generated from
    #[serde(default)]
    pub topic_ids: Vec<String>,
    /// Whether this is a diagnostic (placement) quiz
    #[serde(default)]
    pub is_diagnostic: bool,
    /// Optional time limit, display only
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    /// Total points across questions
    #[serde(default)]
    pub total_points: u32,
    /// Creation timestamp as sent by the coach
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Quiz {
    /// Create a quiz with the given questions
    pub fn new(id: impl Into<String>, questions: Vec<Question>) -> Self {
        let total_points = questions.len() as u32;
        Self {
            id: id.into(),
            questions,
            topic_ids: Vec::new(),
            is_diagnostic: false,
            time_limit_minutes: None,
            total_points,
            created_at: None,
        }
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the quiz has no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_choice_deserializes_from_wire() {
        let json = r#"{
            "id": "q1",
            "topic_id": "rust-basics",
            "question_type": "multiple_choice",
            "difficulty": "easy",
            "question_text": "Which keyword declares an immutable binding?",
            "options": ["let", "mut", "static", "const"],
            "correct_answer": "let",
            "explanation": "Bindings are immutable unless marked mut.",
            "concept_tags": ["bindings"],
            "points": 1
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.kind, QuestionKind::MultipleChoice);
        assert_eq!(question.prompt, "Which keyword declares an immutable binding?");
        assert_eq!(question.choices().len(), 4);
        assert_eq!(question.correct_choice_index(), Some(0));
    }

    #[test]
    fn true_false_deserializes_with_null_options() {
        let json = r#"{
            "id": "q2",
            "question_type": "true_false",
            "question_text": "Shadowing rebinds a name.",
            "options": null,
            "correct_answer": "True",
            "difficulty": "easy"
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.kind, QuestionKind::TrueFalse);
        assert_eq!(question.choices(), vec!["True".to_string(), "False".to_string()]);
    }

    #[test]
    fn unsupported_kind_is_rejected() {
        let json = r#"{
            "id": "q3",
            "question_type": "fill_blank",
            "question_text": "Complete the code",
            "correct_answer": "mut"
        }"#;

        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn correct_choice_index_is_case_insensitive() {
        let question = Question::multiple_choice(
            "q1",
            "Pick one",
            vec!["Alpha".into(), "Beta".into()],
            "beta",
            "easy",
        );
        assert_eq!(question.correct_choice_index(), Some(1));
    }

    #[test]
    fn correct_choice_index_rejects_ambiguous_options() {
        let question = Question::multiple_choice(
            "q1",
            "Pick one",
            vec!["Yes".into(), "YES".into()],
            "yes",
            "easy",
        );
        assert_eq!(question.correct_choice_index(), None);
    }

    #[test]
    fn quiz_deserializes_with_minimal_fields() {
        let json = r#"{
            "id": "quiz_12345",
            "questions": [{
                "id": "q1",
                "question_type": "true_false",
                "question_text": "The borrow checker runs at compile time.",
                "correct_answer": "True"
            }]
        }"#;

        let quiz: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.len(), 1);
        assert!(!quiz.is_diagnostic);
        assert!(quiz.created_at.is_none());
    }

    #[test]
    fn topic_difficulty_labels() {
        let mut topic = Topic {
            id: "t1".into(),
            name: "Rust Basics".into(),
            description: String::new(),
            category: "programming".into(),
            difficulty_level: 1,
            question_count: 10,
        };
        assert_eq!(topic.difficulty_label(), "beginner");
        topic.difficulty_level = 2;
        assert_eq!(topic.difficulty_label(), "intermediate");
        topic.difficulty_level = 3;
        assert_eq!(topic.difficulty_label(), "advanced");
    }
}
