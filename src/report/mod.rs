//! Quiz result reporting
//!
//! Grades the finished session locally, then offers the results to the
//! coach. The local score is authoritative either way; the backend only
//! contributes recommendations, and a dead backend merely swaps in the
//! canned ones.

use crate::coach::models::{SubmitRequest, SubmitResponse};
use crate::coach::resilient::{DataSource, ResilientCoach, Sourced};
use crate::quiz::score::{AnswerRecord, ScoreReport, ScoreSummary};
use crate::quiz::session::{QuizSession, SessionError};

/// Everything the results screen needs
#[derive(Debug, Clone)]
pub struct ReportView {
    /// Locally computed summary
    pub summary: ScoreSummary,
    /// Per-question answers in question order
    pub records: Vec<AnswerRecord>,
    /// Study recommendations to display
    pub recommendations: Vec<String>,
    /// Concepts the backend flagged as weak; empty offline
    pub weak_concepts: Vec<String>,
    /// Where the recommendations came from
    pub recommendation_source: DataSource,
}

impl ReportView {
    /// Merge the local grading with the coach's submission response
    pub fn compose(report: ScoreReport, response: Sourced<SubmitResponse>) -> Self {
        Self {
            summary: report.summary,
            records: report.records,
            recommendations: response.value.recommendations,
            weak_concepts: response.value.weak_concepts,
            recommendation_source: response.source,
        }
    }

    /// Whether the recommendations are the built-in substitutes
    pub fn is_offline(&self) -> bool {
        self.recommendation_source == DataSource::Fallback
    }
}

/// Grade the completed session and submit it to the coach
///
/// Fails only when the session has not completed; backend trouble never
/// surfaces here.
pub async fn submit(
    coach: &ResilientCoach,
    session: &QuizSession,
) -> Result<ReportView, SessionError> {
    let report = session.score()?;
    let request = SubmitRequest::new(session.quiz().id.clone(), report.records.clone());
    let response = coach.submit_results(&request, &report.summary).await;
    Ok(ReportView::compose(report, response))
}
