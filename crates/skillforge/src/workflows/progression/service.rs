use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::catalog::ProjectCatalog;
use super::domain::{
    ActorRole, ProjectId, ProjectSubmission, ReviewRequest, SubmissionId, SubmissionRequest,
    SubmissionStatus, UserId, UserProgression,
};
use super::ledger::{LedgerError, ProgressionLedger};
use super::repository::{RepositoryError, SubmissionRepository};

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 100;
const DESCRIPTION_MIN: usize = 10;
const DESCRIPTION_MAX: usize = 1000;
const FEEDBACK_MAX: usize = 2000;
const MENTOR_NOTES_MAX: usize = 1000;
const XP_REASON_MAX: usize = 100;
const QUALIFYING_SCORE: u8 = 70;

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_submission_id() -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("sub-{id:06}"))
}

/// Service composing the project catalog, submission repository, and
/// XP ledger into the learner progression workflow.
pub struct SubmissionWorkflow<S, L> {
    submissions: Arc<S>,
    ledger: Arc<L>,
    projects: Arc<ProjectCatalog>,
}

/// Result of one review call: the stored submission plus the XP that
/// this call (and only this call) awarded.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub submission: ProjectSubmission,
    pub xp_awarded: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progression: Option<UserProgression>,
}

/// Snapshot of a learner's standing for the progress endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    pub user_id: UserId,
    pub total_xp: u32,
    pub level: u32,
    pub submissions: usize,
    pub approved: usize,
    pub in_review: usize,
}

impl<S, L> SubmissionWorkflow<S, L>
where
    S: SubmissionRepository + 'static,
    L: ProgressionLedger + 'static,
{
    pub fn new(submissions: Arc<S>, ledger: Arc<L>, projects: Arc<ProjectCatalog>) -> Self {
        Self {
            submissions,
            ledger,
            projects,
        }
    }

    /// Create a new submission in the `submitted` state.
    ///
    /// The repository enforces the one-live-submission rule
    /// atomically, so two racing creates for the same (student,
    /// project) cannot both land.
    pub fn submit(
        &self,
        project_id: &ProjectId,
        request: SubmissionRequest,
    ) -> Result<ProjectSubmission, WorkflowError> {
        validate_submission(&request)?;

        let project = self
            .projects
            .get(project_id)
            .filter(|project| project.active)
            .ok_or_else(|| WorkflowError::ProjectNotFound(project_id.clone()))?;

        let submission = ProjectSubmission {
            id: next_submission_id(),
            student_id: request.student_id,
            project_id: project.id.clone(),
            title: request.title,
            description: request.description,
            github_url: request.github_url,
            demo_url: request.demo_url,
            files: request.files,
            status: SubmissionStatus::Submitted,
            submitted_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            score: None,
            feedback: None,
            mentor_notes: None,
            quality_metrics: None,
            xp_awarded: 0,
            resubmitted_at: None,
            version: 0,
        };

        let stored = self.submissions.insert(submission)?;
        tracing::info!(
            submission = %stored.id.0,
            project = %stored.project_id.0,
            "submission created"
        );
        Ok(stored)
    }

    /// Move a `submitted` record to `under-review`.
    pub fn begin_review(
        &self,
        id: &SubmissionId,
        reviewer_id: UserId,
        reviewer_role: ActorRole,
    ) -> Result<ProjectSubmission, WorkflowError> {
        if !reviewer_role.can_review() {
            return Err(WorkflowError::Unauthorized {
                role: reviewer_role,
            });
        }

        let submission = self
            .submissions
            .fetch(id)?
            .ok_or_else(|| WorkflowError::SubmissionNotFound(id.clone()))?;

        if submission.status != SubmissionStatus::Submitted {
            return Err(WorkflowError::InvalidTransition {
                from: submission.status,
                to: SubmissionStatus::UnderReview,
            });
        }

        let expected_version = submission.version;
        let mut updated = submission;
        updated.status = SubmissionStatus::UnderReview;
        updated.reviewed_by = Some(reviewer_id);

        Ok(self.submissions.update(updated, expected_version)?)
    }

    /// Apply a mentor's verdict.
    ///
    /// Validation is atomic: any invalid field rejects the call before
    /// state is touched. XP is awarded exactly on the transition into
    /// `approved` with a qualifying score; the submission
    /// compare-and-swap commits first and serves as the
    /// once-per-transition guard, so a re-review of an already
    /// approved submission never re-awards.
    pub fn review(
        &self,
        id: &SubmissionId,
        request: ReviewRequest,
    ) -> Result<ReviewOutcome, WorkflowError> {
        if !request.reviewer_role.can_review() {
            return Err(WorkflowError::Unauthorized {
                role: request.reviewer_role,
            });
        }
        validate_review(&request)?;

        let submission = self
            .submissions
            .fetch(id)?
            .ok_or_else(|| WorkflowError::SubmissionNotFound(id.clone()))?;
        let project = self
            .projects
            .get(&submission.project_id)
            .ok_or_else(|| WorkflowError::ProjectNotFound(submission.project_id.clone()))?;

        let previous_status = submission.status;
        let target_status = request.status.status();
        let qualifies = previous_status != SubmissionStatus::Approved
            && target_status == SubmissionStatus::Approved
            && request.score.is_some_and(|score| score >= QUALIFYING_SCORE);

        let expected_version = submission.version;
        let mut updated = submission;
        updated.status = target_status;
        updated.reviewed_by = Some(request.reviewer_id);
        updated.reviewed_at = Some(Utc::now());
        updated.score = request.score;
        updated.feedback = request.feedback;
        updated.mentor_notes = request.mentor_notes;
        updated.quality_metrics = request.quality_metrics;
        if qualifies {
            updated.xp_awarded = project.xp_reward;
        }

        let stored = self.submissions.update(updated, expected_version)?;

        let (xp_awarded, progression) = if qualifies {
            let progression = self.ledger.award(&stored.student_id, project.xp_reward)?;
            tracing::info!(
                submission = %stored.id.0,
                student = %stored.student_id.0,
                xp = project.xp_reward,
                "review approved, xp awarded"
            );
            (project.xp_reward, Some(progression))
        } else {
            (0, None)
        };

        Ok(ReviewOutcome {
            submission: stored,
            xp_awarded,
            progression,
        })
    }

    /// Direct XP grant outside the submission workflow (manual or
    /// administrative path). Same ledger contract: not idempotent.
    pub fn grant_xp(
        &self,
        user_id: &UserId,
        amount: u32,
        reason: Option<&str>,
    ) -> Result<UserProgression, WorkflowError> {
        if amount == 0 {
            return Err(WorkflowError::Validation(ValidationError {
                field: "amount",
                message: "XP amount must be a positive integer".to_string(),
            }));
        }
        if let Some(reason) = reason {
            if reason.chars().count() > XP_REASON_MAX {
                return Err(WorkflowError::Validation(ValidationError {
                    field: "reason",
                    message: format!("cannot be more than {XP_REASON_MAX} characters"),
                }));
            }
        }

        Ok(self.ledger.award(user_id, amount)?)
    }

    /// Current standing: progression plus submission counts.
    pub fn progress(&self, user_id: &UserId) -> Result<ProgressSummary, WorkflowError> {
        let progression = self.ledger.progression(user_id)?;
        let submissions = self.submissions.for_student(user_id)?;

        let approved = submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Approved)
            .count();
        let in_review = submissions
            .iter()
            .filter(|s| {
                matches!(
                    s.status,
                    SubmissionStatus::Submitted | SubmissionStatus::UnderReview
                )
            })
            .count();

        Ok(ProgressSummary {
            user_id: progression.user_id,
            total_xp: progression.total_xp,
            level: progression.level,
            submissions: submissions.len(),
            approved,
            in_review,
        })
    }

    /// A learner's submissions, newest first.
    pub fn submissions_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ProjectSubmission>, WorkflowError> {
        Ok(self.submissions.for_student(user_id)?)
    }
}

fn validate_submission(request: &SubmissionRequest) -> Result<(), WorkflowError> {
    let title_len = request.title.trim().chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&title_len) {
        return Err(WorkflowError::Validation(ValidationError {
            field: "title",
            message: format!("must be between {TITLE_MIN} and {TITLE_MAX} characters"),
        }));
    }

    let description_len = request.description.trim().chars().count();
    if !(DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&description_len) {
        return Err(WorkflowError::Validation(ValidationError {
            field: "description",
            message: format!("must be between {DESCRIPTION_MIN} and {DESCRIPTION_MAX} characters"),
        }));
    }

    for (field, url) in [
        ("github_url", &request.github_url),
        ("demo_url", &request.demo_url),
    ] {
        if let Some(url) = url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(WorkflowError::Validation(ValidationError {
                    field,
                    message: "must be a valid URL".to_string(),
                }));
            }
        }
    }

    Ok(())
}

fn validate_review(request: &ReviewRequest) -> Result<(), WorkflowError> {
    if let Some(score) = request.score {
        if score > 100 {
            return Err(WorkflowError::Validation(ValidationError {
                field: "score",
                message: "must be between 0 and 100".to_string(),
            }));
        }
    }

    if let Some(feedback) = &request.feedback {
        if feedback.chars().count() > FEEDBACK_MAX {
            return Err(WorkflowError::Validation(ValidationError {
                field: "feedback",
                message: format!("cannot be more than {FEEDBACK_MAX} characters"),
            }));
        }
    }

    if let Some(notes) = &request.mentor_notes {
        if notes.chars().count() > MENTOR_NOTES_MAX {
            return Err(WorkflowError::Validation(ValidationError {
                field: "mentor_notes",
                message: format!("cannot be more than {MENTOR_NOTES_MAX} characters"),
            }));
        }
    }

    if let Some(metrics) = &request.quality_metrics {
        for (field, value) in metrics.entries() {
            if let Some(value) = value {
                if !(1..=5).contains(&value) {
                    return Err(WorkflowError::Validation(ValidationError {
                        field,
                        message: "must be between 1 and 5".to_string(),
                    }));
                }
            }
        }
    }

    Ok(())
}

/// A field-level validation failure, surfaced before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// Error raised by the submission workflow.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{} role cannot review submissions", role.label())]
    Unauthorized { role: ActorRole },
    #[error("project '{}' not found", .0 .0)]
    ProjectNotFound(ProjectId),
    #[error("submission '{}' not found", .0 .0)]
    SubmissionNotFound(SubmissionId),
    #[error("cannot move submission from {} to {}", from.label(), to.label())]
    InvalidTransition {
        from: SubmissionStatus,
        to: SubmissionStatus,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
