use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::workflows::guidance::domain::UserId;

/// Slug identifier for a practice project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Identifier wrapper for project submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Administrator-authored project definition; read-only to the
/// submission workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDefinition {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub difficulty: ProjectDifficulty,
    pub xp_reward: u32,
    pub active: bool,
}

/// Lifecycle of a submission within one review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    NeedsRevision,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::UnderReview => "under-review",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::NeedsRevision => "needs-revision",
        }
    }

    /// A needs-revision submission releases the (student, project)
    /// slot so a fresh cycle can start; every other status holds it.
    pub const fn blocks_resubmission(self) -> bool {
        !matches!(self, SubmissionStatus::NeedsRevision)
    }
}

/// Metadata for an uploaded deliverable. Transport and storage of the
/// bytes is owned by the surrounding request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFile {
    pub filename: String,
    pub size: u64,
    pub content_type: String,
}

/// Mentor-scored quality dimensions, each on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub code_quality: Option<u8>,
    pub documentation: Option<u8>,
    pub creativity: Option<u8>,
    pub problem_solving: Option<u8>,
}

impl QualityMetrics {
    pub(crate) fn entries(&self) -> [(&'static str, Option<u8>); 4] {
        [
            ("code_quality", self.code_quality),
            ("documentation", self.documentation),
            ("creativity", self.creativity),
            ("problem_solving", self.problem_solving),
        ]
    }
}

/// A learner's project deliverable and its review trail.
///
/// Never deleted; terminal outcomes are expressed through `status`.
/// `version` backs the compare-and-swap repository update that keeps
/// review transitions and XP awards from racing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSubmission {
    pub id: SubmissionId,
    pub student_id: UserId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub files: Vec<SubmissionFile>,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub score: Option<u8>,
    pub feedback: Option<String>,
    pub mentor_notes: Option<String>,
    pub quality_metrics: Option<QualityMetrics>,
    pub xp_awarded: u32,
    /// Set on a needs-revision record when a new cycle supersedes it.
    pub resubmitted_at: Option<DateTime<Utc>>,
    pub version: u64,
}

/// Accumulated experience points; level is always derived from
/// `total_xp`, never stored in a way that can drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgression {
    pub user_id: UserId,
    pub total_xp: u32,
    pub level: u32,
}

/// Capability attached to the acting user by the (external) auth
/// layer. Reviews require mentor or admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActorRole {
    Student,
    Mentor,
    Admin,
}

impl ActorRole {
    pub const fn can_review(self) -> bool {
        matches!(self, ActorRole::Mentor | ActorRole::Admin)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActorRole::Student => "student",
            ActorRole::Mentor => "mentor",
            ActorRole::Admin => "admin",
        }
    }
}

/// Terminal disposition a reviewer can hand down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewDisposition {
    Approved,
    Rejected,
    NeedsRevision,
}

impl ReviewDisposition {
    pub const fn status(self) -> SubmissionStatus {
        match self {
            ReviewDisposition::Approved => SubmissionStatus::Approved,
            ReviewDisposition::Rejected => SubmissionStatus::Rejected,
            ReviewDisposition::NeedsRevision => SubmissionStatus::NeedsRevision,
        }
    }
}

/// Intake payload for a new submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub student_id: UserId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub files: Vec<SubmissionFile>,
}

/// A mentor's review verdict and supporting fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub reviewer_id: UserId,
    pub reviewer_role: ActorRole,
    pub status: ReviewDisposition,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub mentor_notes: Option<String>,
    #[serde(default)]
    pub quality_metrics: Option<QualityMetrics>,
}
