use super::domain::{StoredAssessment, UserId};

/// Storage abstraction for archived assessments so the service can be
/// exercised in isolation.
pub trait AnswerArchive: Send + Sync {
    /// Store (or replace) a learner's completed assessment.
    fn store(&self, assessment: StoredAssessment) -> Result<(), ArchiveError>;
    fn fetch(&self, user_id: &UserId) -> Result<Option<StoredAssessment>, ArchiveError>;
}

/// Error enumeration for archive failures.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("archive unavailable: {0}")]
    Unavailable(String),
}
