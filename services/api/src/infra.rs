use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs::File;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use skillforge::config::{AppConfig, ConfigError};
use skillforge::workflows::guidance::{
    AnswerArchive, ArchiveError, MatchingConfig, StoredAssessment, UserId,
};
use skillforge::workflows::progression::{
    LedgerError, ProgressionLedger, ProjectSubmission, RepositoryError, SubmissionId,
    SubmissionRepository, UserProgression,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryAnswerArchive {
    assessments: Mutex<HashMap<UserId, StoredAssessment>>,
}

impl AnswerArchive for InMemoryAnswerArchive {
    fn store(&self, assessment: StoredAssessment) -> Result<(), ArchiveError> {
        let mut guard = self.assessments.lock().expect("archive mutex poisoned");
        guard.insert(assessment.user_id.clone(), assessment);
        Ok(())
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<StoredAssessment>, ArchiveError> {
        let guard = self.assessments.lock().expect("archive mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySubmissionRepository {
    records: Mutex<Vec<ProjectSubmission>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(
        &self,
        mut submission: ProjectSubmission,
    ) -> Result<ProjectSubmission, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let blocked = guard.iter().any(|record| {
            record.student_id == submission.student_id
                && record.project_id == submission.project_id
                && record.status.blocks_resubmission()
        });
        if blocked {
            return Err(RepositoryError::Duplicate);
        }

        let now = Utc::now();
        for record in guard.iter_mut() {
            if record.student_id == submission.student_id
                && record.project_id == submission.project_id
                && record.resubmitted_at.is_none()
            {
                record.resubmitted_at = Some(now);
            }
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
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn for_student(&self, student_id: &UserId) -> Result<Vec<ProjectSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
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
pub(crate) struct InMemoryProgressionLedger {
    totals: Mutex<HashMap<UserId, u32>>,
}

impl ProgressionLedger for InMemoryProgressionLedger {
    fn award(&self, user_id: &UserId, amount: u32) -> Result<UserProgression, LedgerError> {
        let mut guard = self.totals.lock().expect("ledger mutex poisoned");
        let total = guard.entry(user_id.clone()).or_insert(0);
        *total += amount;
        Ok(UserProgression {
            user_id: user_id.clone(),
            total_xp: *total,
            level: skillforge::workflows::progression::level_for_xp(*total),
        })
    }

    fn progression(&self, user_id: &UserId) -> Result<UserProgression, LedgerError> {
        let guard = self.totals.lock().expect("ledger mutex poisoned");
        let total = guard.get(user_id).copied().unwrap_or(0);
        Ok(UserProgression {
            user_id: user_id.clone(),
            total_xp: total,
            level: skillforge::workflows::progression::level_for_xp(total),
        })
    }
}

/// Built-in matcher tables, overridable through
/// `SKILLFORGE_MATCHING_CONFIG`.
pub(crate) fn load_matching_config(config: &AppConfig) -> Result<MatchingConfig, ConfigError> {
    match &config.matching_tables {
        Some(path) => {
            let file = File::open(path).map_err(|err| ConfigError::MatchingTables {
                path: path.clone(),
                detail: err.to_string(),
            })?;
            MatchingConfig::from_json_reader(file).map_err(|err| ConfigError::MatchingTables {
                path: path.clone(),
                detail: err.to_string(),
            })
        }
        None => Ok(MatchingConfig::standard()),
    }
}
