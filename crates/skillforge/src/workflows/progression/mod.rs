//! Project submission workflow and the experience-point ledger.
//!
//! The submission lifecycle is `submitted -> under-review -> one of
//! {approved, rejected, needs-revision}`. Reviews and XP awards are
//! serialized through a version compare-and-swap on the submission
//! record so a qualifying approval awards XP exactly once.

pub mod catalog;
pub mod domain;
pub mod ledger;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::ProjectCatalog;
pub use domain::{
    ActorRole, ProjectDefinition, ProjectDifficulty, ProjectId, ProjectSubmission,
    QualityMetrics, ReviewDisposition, ReviewRequest, SubmissionFile, SubmissionId,
    SubmissionRequest, SubmissionStatus, UserId, UserProgression,
};
pub use ledger::{level_for_xp, LedgerError, ProgressionLedger, XP_PER_LEVEL};
pub use repository::{RepositoryError, SubmissionRepository};
pub use router::progression_router;
pub use service::{
    ProgressSummary, ReviewOutcome, SubmissionWorkflow, ValidationError, WorkflowError,
};
