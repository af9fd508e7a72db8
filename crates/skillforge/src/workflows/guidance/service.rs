use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::catalog::CareerCatalog;
use super::domain::{CareerMatch, PersonalityProfile, QuizAnswer, StoredAssessment, UserId};
use super::intake::{validate_answers, QuizIntakeError};
use super::matching::MatchingConfig;
use super::profile::score_answers;
use super::ranking::recommend;
use super::repository::{AnswerArchive, ArchiveError};

/// A quiz submission as it arrives on the wire. The user id is
/// optional: anonymous visitors still get recommendations, only
/// authenticated learners have their answers archived.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizSubmission {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub answers: Vec<QuizAnswer>,
}

/// Profile plus ranked recommendations, recomputed per request.
#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    pub personality_profile: PersonalityProfile,
    pub recommendations: Vec<CareerMatch>,
    pub total_careers: usize,
}

/// Service composing intake validation, the scorer, the ranker, and
/// the answer archive.
pub struct GuidanceService<A> {
    catalog: Arc<CareerCatalog>,
    config: Arc<MatchingConfig>,
    archive: Arc<A>,
}

impl<A> GuidanceService<A>
where
    A: AnswerArchive + 'static,
{
    pub fn new(catalog: Arc<CareerCatalog>, config: Arc<MatchingConfig>, archive: Arc<A>) -> Self {
        Self {
            catalog,
            config,
            archive,
        }
    }

    /// Score a submission and rank careers. Archives the raw answers
    /// when the submission names a learner.
    pub fn submit_quiz(&self, submission: QuizSubmission) -> Result<QuizOutcome, GuidanceError> {
        validate_answers(&submission.answers)?;

        let outcome = self.evaluate(&submission.answers);

        if let Some(user_id) = submission.user_id {
            self.archive.store(StoredAssessment {
                user_id,
                answers: submission.answers,
                completed_at: Utc::now(),
            })?;
            tracing::debug!(total_careers = outcome.total_careers, "assessment archived");
        }

        Ok(outcome)
    }

    /// Recompute recommendations from a learner's archived answers.
    pub fn recommendations_for(&self, user_id: &UserId) -> Result<QuizOutcome, GuidanceError> {
        let assessment = self
            .archive
            .fetch(user_id)?
            .ok_or(GuidanceError::QuizNotCompleted)?;

        Ok(self.evaluate(&assessment.answers))
    }

    fn evaluate(&self, answers: &[QuizAnswer]) -> QuizOutcome {
        let profile = score_answers(answers);
        let recommendations = recommend(answers, &profile, &self.catalog, &self.config);

        QuizOutcome {
            personality_profile: profile,
            recommendations,
            total_careers: self.catalog.active().count(),
        }
    }
}

/// Error raised by the guidance service.
#[derive(Debug, thiserror::Error)]
pub enum GuidanceError {
    #[error(transparent)]
    Intake(#[from] QuizIntakeError),
    #[error("complete the quiz first to get personalized recommendations")]
    QuizNotCompleted,
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
