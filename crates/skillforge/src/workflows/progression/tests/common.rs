use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::workflows::progression::catalog::ProjectCatalog;
use crate::workflows::progression::domain::{
    ActorRole, ProjectId, ProjectSubmission, QualityMetrics, ReviewDisposition, ReviewRequest,
    SubmissionId, SubmissionRequest, UserId, UserProgression,
};
use crate::workflows::progression::ledger::{level_for_xp, LedgerError, ProgressionLedger};
use crate::workflows::progression::repository::{RepositoryError, SubmissionRepository};
use crate::workflows::progression::service::SubmissionWorkflow;

#[derive(Default)]
pub(super) struct MemorySubmissions {
    records: Mutex<Vec<ProjectSubmission>>,
}

impl SubmissionRepository for MemorySubmissions {
    fn insert(
        &self,
        mut submission: ProjectSubmission,
    ) -> Result<ProjectSubmission, RepositoryError> {
        let mut guard = self.records.lock().expect("submission mutex poisoned");
        if guard.iter().any(|record| {
            record.student_id == submission.student_id
                && record.project_id == submission.project_id
                && record.status.blocks_resubmission()
        }) {
            return Err(RepositoryError::Duplicate);
        }

        for record in guard.iter_mut().filter(|record| {
            record.student_id == submission.student_id
                && record.project_id == submission.project_id
                && record.resubmitted_at.is_none()
        }) {
            record.resubmitted_at = Some(Utc::now());
        }

        submission.version = 0;
        guard.push(submission.clone());
        Ok(submission)
    }

    fn update(
        &self,
        mut submission: ProjectSubmission,
        expected_version: u64,
    ) -> Result<ProjectSubmission, RepositoryError> {
        let mut guard = self.records.lock().expect("submission mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| record.id == submission.id)
            .ok_or(RepositoryError::NotFound)?;

        if record.version != expected_version {
            return Err(RepositoryError::VersionConflict);
        }

        submission.version = expected_version + 1;
        *record = submission.clone();
        Ok(submission)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<ProjectSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("submission mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn for_student(&self, student_id: &UserId) -> Result<Vec<ProjectSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("submission mutex poisoned");
        let mut records: Vec<ProjectSubmission> = guard
            .iter()
            .filter(|record| &record.student_id == student_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(records)
    }
}

#[derive(Default)]
pub(super) struct MemoryLedger {
    totals: Mutex<HashMap<UserId, u32>>,
}

impl MemoryLedger {
    pub(super) fn total_for(&self, user_id: &UserId) -> u32 {
        let guard = self.totals.lock().expect("ledger mutex poisoned");
        guard.get(user_id).copied().unwrap_or(0)
    }
}

impl ProgressionLedger for MemoryLedger {
    fn award(&self, user_id: &UserId, amount: u32) -> Result<UserProgression, LedgerError> {
        let mut guard = self.totals.lock().expect("ledger mutex poisoned");
        let total = guard.entry(user_id.clone()).or_insert(0);
        *total += amount;
        Ok(UserProgression {
            user_id: user_id.clone(),
            total_xp: *total,
            level: level_for_xp(*total),
        })
    }

    fn progression(&self, user_id: &UserId) -> Result<UserProgression, LedgerError> {
        let guard = self.totals.lock().expect("ledger mutex poisoned");
        let total = guard.get(user_id).copied().unwrap_or(0);
        Ok(UserProgression {
            user_id: user_id.clone(),
            total_xp: total,
            level: level_for_xp(total),
        })
    }
}

pub(super) fn workflow() -> (
    Arc<SubmissionWorkflow<MemorySubmissions, MemoryLedger>>,
    Arc<MemorySubmissions>,
    Arc<MemoryLedger>,
) {
    let submissions = Arc::new(MemorySubmissions::default());
    let ledger = Arc::new(MemoryLedger::default());
    let service = Arc::new(SubmissionWorkflow::new(
        submissions.clone(),
        ledger.clone(),
        Arc::new(ProjectCatalog::standard()),
    ));
    (service, submissions, ledger)
}

pub(super) fn student() -> UserId {
    UserId("student-1".to_string())
}

pub(super) fn mentor() -> UserId {
    UserId("mentor-1".to_string())
}

pub(super) fn project() -> ProjectId {
    ProjectId("basic-analysis".to_string())
}

pub(super) fn submission_request() -> SubmissionRequest {
    SubmissionRequest {
        student_id: student(),
        title: "Exploring the city bikeshare dataset".to_string(),
        description: "Three findings about weekday commute patterns.".to_string(),
        github_url: Some("https://github.com/student-1/bikeshare".to_string()),
        demo_url: None,
        files: Vec::new(),
    }
}

pub(super) fn review(disposition: ReviewDisposition, score: Option<u8>) -> ReviewRequest {
    ReviewRequest {
        reviewer_id: mentor(),
        reviewer_role: ActorRole::Mentor,
        status: disposition,
        score,
        feedback: Some("Solid work".to_string()),
        mentor_notes: None,
        quality_metrics: Some(QualityMetrics {
            code_quality: Some(4),
            documentation: Some(3),
            creativity: Some(4),
            problem_solving: Some(5),
        }),
    }
}
