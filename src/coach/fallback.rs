//! Built-in fallback datasets
//!
//! Deterministic substitute content served whenever the backend cannot be
//! reached, so every feature stays usable offline. Apart from the review
//! schedule, which is keyed on the current date, two runs against a dead
//! backend produce byte-identical data.

use chrono::{Duration, Local};

use super::models::{
    DiagnosticKind, DiagnosticQuestion, ProgressRow, QuizMode, ReviewEntry, ReviewSchedule,
    SubmitResponse,
};
use crate::quiz::model::{Question, Quiz, Topic};
use crate::quiz::score::ScoreSummary;

/// Version stamp for the built-in datasets
pub const FALLBACK_DATASET_VERSION: &str = "2025.1";

/// The two study recommendations used when the backend cannot provide any
pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Review the explanations for the questions you missed.",
    "Retake this quiz after a short break to reinforce what you learned.",
];

/// Minimal topic catalog covering both categories and all three
/// difficulty levels
pub fn fallback_topics() -> Vec<Topic> {
    vec![
        Topic {
            id: "python-basics".into(),
            name: "Python Basics".into(),
            description: "Variables, control flow and functions in Python.".into(),
            category: "programming".into(),
            difficulty_level: 1,
            question_count: 12,
        },
        Topic {
            id: "data-structures".into(),
            name: "Data Structures".into(),
            description: "Lists, dictionaries, stacks and queues.".into(),
            category: "programming".into(),
            difficulty_level: 2,
            question_count: 10,
        },
        Topic {
            id: "sql-fundamentals".into(),
            name: "SQL Fundamentals".into(),
            description: "Querying and shaping relational data.".into(),
            category: "data".into(),
            difficulty_level: 2,
            question_count: 8,
        },
        Topic {
            id: "machine-learning".into(),
            name: "Machine Learning".into(),
            description: "Core ideas behind models that learn from data.".into(),
            category: "data".into(),
            difficulty_level: 3,
            question_count: 9,
        },
    ]
}

/// The fixed five-question quiz served when generation is unavailable
///
/// The questions are identical for every mode; the mode only shapes the
/// quiz id and the diagnostic flag.
pub fn fallback_quiz(mode: QuizMode) -> Quiz {
    let questions = vec![
        Question::multiple_choice(
            "fb-q1",
            "Which data structure stores key/value pairs in Python?",
            vec!["A list".into(), "A dictionary".into(), "A tuple".into(), "A set".into()],
            "A dictionary",
            "easy",
        )
        .with_explanation("Dictionaries map hashable keys to values."),
        Question::true_false("fb-q2", "In Python, list indexes start at 0.", true, "easy")
            .with_explanation("Python sequences are zero-indexed."),
        Question::multiple_choice(
            "fb-q3",
            "What does the SQL SELECT statement do?",
            vec![
                "Deletes rows".into(),
                "Retrieves rows".into(),
                "Creates a table".into(),
                "Grants permissions".into(),
            ],
            "Retrieves rows",
            "medium",
        )
        .with_explanation("SELECT reads rows; it never modifies the table."),
        Question::true_false(
            "fb-q4",
            "A stack removes elements in first-in, first-out order.",
            false,
            "medium",
        )
        .with_explanation("Stacks are last-in, first-out; queues are first-in, first-out."),
        Question::multiple_choice(
            "fb-q5",
            "Which task is an example of supervised learning?",
            vec![
                "Clustering customers".into(),
                "Classifying email as spam".into(),
                "Reducing dimensionality".into(),
                "Sampling at random".into(),
            ],
            "Classifying email as spam",
            "hard",
        )
        .with_explanation("Spam classification trains on examples with known labels."),
    ];

    let mut quiz = Quiz::new(format!("fb-{}", mode.display_name().to_lowercase()), questions);
    quiz.topic_ids = fallback_topics().into_iter().map(|t| t.id).collect();
    quiz.is_diagnostic = mode == QuizMode::Diagnostic;
    if quiz.is_diagnostic {
        // Matches the backend's two minutes per diagnostic question.
        quiz.time_limit_minutes = Some(quiz.len() as u32 * 2);
    }
    quiz
}

/// Mastery list with one row in each mood tier
pub fn fallback_progress() -> Vec<ProgressRow> {
    vec![
        ProgressRow {
            topic_id: "python-basics".into(),
            topic_name: "Python Basics".into(),
            mastery_level: 92.0,
            time_spent_minutes: 310,
            next_review: None,
            weakness_score: Some(0.05),
        },
        ProgressRow {
            topic_id: "data-structures".into(),
            topic_name: "Data Structures".into(),
            mastery_level: 74.0,
            time_spent_minutes: 205,
            next_review: None,
            weakness_score: Some(0.2),
        },
        ProgressRow {
            topic_id: "sql-fundamentals".into(),
            topic_name: "SQL Fundamentals".into(),
            mastery_level: 55.0,
            time_spent_minutes: 120,
            next_review: None,
            weakness_score: Some(0.45),
        },
        ProgressRow {
            topic_id: "machine-learning".into(),
            topic_name: "Machine Learning".into(),
            mastery_level: 18.0,
            time_spent_minutes: 45,
            next_review: None,
            weakness_score: Some(0.8),
        },
    ]
}

/// The five onboarding questions the backend ships
pub fn fallback_diagnostic_questions() -> Vec<DiagnosticQuestion> {
    vec![
        DiagnosticQuestion {
            id: "d1".into(),
            text: "What is your primary learning goal?".into(),
            kind: DiagnosticKind::Text,
            options: None,
        },
        DiagnosticQuestion {
            id: "d2".into(),
            text: "How much time can you dedicate daily?".into(),
            kind: DiagnosticKind::Choice,
            options: Some(vec!["30 min".into(), "1 hour".into(), "2 hours".into(), "3+ hours".into()]),
        },
        DiagnosticQuestion {
            id: "d3".into(),
            text: "What is your current experience level?".into(),
            kind: DiagnosticKind::Choice,
            options: Some(vec![
                "Complete beginner".into(),
                "Some basics".into(),
                "Intermediate".into(),
                "Advanced".into(),
            ]),
        },
        DiagnosticQuestion {
            id: "d4".into(),
            text: "What topics interest you most?".into(),
            kind: DiagnosticKind::Multi,
            options: Some(vec![
                "Programming".into(),
                "Data Science".into(),
                "Web Dev".into(),
                "AI/ML".into(),
                "Mobile Dev".into(),
            ]),
        },
        DiagnosticQuestion {
            id: "d5".into(),
            text: "Preferred learning style?".into(),
            kind: DiagnosticKind::Choice,
            options: Some(vec!["Videos".into(), "Reading".into(), "Hands-on".into(), "Mixed".into()]),
        },
    ]
}

/// Review schedule over the next `days` days, starting today
///
/// Every day is present like the backend's schedule; the weakest fallback
/// topics land on the earliest days.
pub fn fallback_schedule(days: u32) -> ReviewSchedule {
    let today = Local::now().date_naive();
    let mut schedule = ReviewSchedule { schedule: Default::default() };

    for offset in 0..days {
        let date = (today + Duration::days(offset as i64)).format("%Y-%m-%d").to_string();
        let entries = match offset {
            0 => vec![ReviewEntry {
                topic_id: "machine-learning".into(),
                topic_name: "Machine Learning".into(),
            }],
            1 => vec![ReviewEntry {
                topic_id: "sql-fundamentals".into(),
                topic_name: "SQL Fundamentals".into(),
            }],
            3 => vec![ReviewEntry {
                topic_id: "data-structures".into(),
                topic_name: "Data Structures".into(),
            }],
            _ => Vec::new(),
        };
        schedule.schedule.insert(date, entries);
    }

    schedule
}

/// Grading substitute that echoes the locally computed summary
///
/// The local score stays authoritative; only the recommendations are
/// canned.
pub fn fallback_submit_response(summary: &ScoreSummary) -> SubmitResponse {
    SubmitResponse {
        score: summary.percentage as f32,
        correct: summary.correct,
        total: summary.total,
        weak_concepts: Vec::new(),
        recommendations: FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_span_categories_and_difficulties() {
        let topics = fallback_topics();
        assert_eq!(topics.len(), 4);

        let categories: std::collections::HashSet<&str> =
            topics.iter().map(|t| t.category.as_str()).collect();
        assert!(categories.len() >= 2);

        let levels: std::collections::HashSet<u8> =
            topics.iter().map(|t| t.difficulty_level).collect();
        assert_eq!(levels, [1, 2, 3].into_iter().collect());
    }

    #[test]
    fn quiz_has_five_questions_of_both_kinds() {
        use crate::quiz::model::QuestionKind;

        let quiz = fallback_quiz(QuizMode::Practice);
        assert_eq!(quiz.len(), 5);

        let multiple_choice = quiz
            .questions
            .iter()
            .filter(|q| q.kind == QuestionKind::MultipleChoice)
            .count();
        assert_eq!(multiple_choice, 3);
    }

    #[test]
    fn every_quiz_question_has_exactly_one_matching_choice() {
        for question in fallback_quiz(QuizMode::Practice).questions {
            assert!(
                question.correct_choice_index().is_some(),
                "question {} has no unambiguous correct choice",
                question.id
            );
        }
    }

    #[test]
    fn quiz_mode_shapes_id_and_diagnostic_flag() {
        let diagnostic = fallback_quiz(QuizMode::Diagnostic);
        assert_eq!(diagnostic.id, "fb-diagnostic");
        assert!(diagnostic.is_diagnostic);
        assert_eq!(diagnostic.time_limit_minutes, Some(10));

        let practice = fallback_quiz(QuizMode::Practice);
        assert_eq!(practice.id, "fb-practice");
        assert!(!practice.is_diagnostic);
        assert_eq!(practice.time_limit_minutes, None);
    }

    #[test]
    fn progress_rows_span_all_mood_tiers() {
        use crate::quiz::score::Mood;

        let moods: Vec<Mood> = fallback_progress()
            .iter()
            .map(|row| Mood::from_percentage(row.mastery_level.round() as u8))
            .collect();

        assert_eq!(moods, vec![Mood::Elated, Mood::Pleased, Mood::Neutral, Mood::Discouraged]);
    }

    #[test]
    fn diagnostic_questions_match_the_backend_set() {
        let questions = fallback_diagnostic_questions();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0].id, "d1");
        assert_eq!(questions[0].kind, DiagnosticKind::Text);
        assert_eq!(questions[3].kind, DiagnosticKind::Multi);
        assert!(questions.iter().all(|q| q.kind == DiagnosticKind::Text || q.options.is_some()));
    }

    #[test]
    fn schedule_covers_every_requested_day() {
        let schedule = fallback_schedule(7);
        assert_eq!(schedule.schedule.len(), 7);

        let occupied = schedule.schedule.values().filter(|v| !v.is_empty()).count();
        assert_eq!(occupied, 3);
    }

    #[test]
    fn datasets_are_deterministic_across_calls() {
        assert_eq!(fallback_topics(), fallback_topics());
        assert_eq!(fallback_quiz(QuizMode::Practice), fallback_quiz(QuizMode::Practice));
        assert_eq!(fallback_progress(), fallback_progress());
    }

    #[test]
    fn submit_response_echoes_summary_with_canned_recommendations() {
        let summary = ScoreSummary::from_counts(5, 4);
        let response = fallback_submit_response(&summary);

        assert_eq!(response.score, 80.0);
        assert_eq!(response.correct, 4);
        assert_eq!(response.total, 5);
        assert_eq!(response.recommendations.len(), 2);
        assert!(response.weak_concepts.is_empty());
    }
}
