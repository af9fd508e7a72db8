use super::domain::{ProjectSubmission, SubmissionId, UserId};

/// Storage abstraction for project submissions.
///
/// Implementations own the two serialization points the workflow
/// depends on: `insert` must check the one-live-submission-per
/// (student, project) rule and insert in a single atomic step, and
/// `update` must be a compare-and-swap on `version`.
pub trait SubmissionRepository: Send + Sync {
    /// Insert a new submission. Fails with [`RepositoryError::Duplicate`]
    /// when the student already holds the slot for this project with a
    /// status other than needs-revision. When a needs-revision record
    /// is superseded, the implementation stamps its `resubmitted_at`
    /// as part of the same atomic operation.
    fn insert(&self, submission: ProjectSubmission)
        -> Result<ProjectSubmission, RepositoryError>;

    /// Compare-and-swap update: applies `submission` only when the
    /// stored record still carries `expected_version`, then bumps the
    /// version. Returns the stored record.
    fn update(
        &self,
        submission: ProjectSubmission,
        expected_version: u64,
    ) -> Result<ProjectSubmission, RepositoryError>;

    fn fetch(&self, id: &SubmissionId) -> Result<Option<ProjectSubmission>, RepositoryError>;

    /// All submissions by one student, newest first.
    fn for_student(&self, student_id: &UserId) -> Result<Vec<ProjectSubmission>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("a submission for this project already exists")]
    Duplicate,
    #[error("record not found")]
    NotFound,
    #[error("record was modified concurrently")]
    VersionConflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
