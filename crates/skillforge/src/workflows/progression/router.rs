use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ActorRole, ProjectId, ReviewRequest, SubmissionId, SubmissionRequest, UserId,
};
use super::ledger::ProgressionLedger;
use super::repository::{RepositoryError, SubmissionRepository};
use super::service::{SubmissionWorkflow, WorkflowError};

/// Router builder exposing the submission and progression endpoints.
pub fn progression_router<S, L>(service: Arc<SubmissionWorkflow<S, L>>) -> Router
where
    S: SubmissionRepository + 'static,
    L: ProgressionLedger + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects/:project_id/submissions",
            post(submit_handler::<S, L>),
        )
        .route(
            "/api/v1/submissions/:submission_id/begin-review",
            post(begin_review_handler::<S, L>),
        )
        .route(
            "/api/v1/submissions/:submission_id/review",
            put(review_handler::<S, L>),
        )
        .route("/api/v1/users/:user_id/xp", post(grant_xp_handler::<S, L>))
        .route(
            "/api/v1/users/:user_id/progress",
            get(progress_handler::<S, L>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S, L>(
    State(service): State<Arc<SubmissionWorkflow<S, L>>>,
    Path(project_id): Path<String>,
    axum::Json(request): axum::Json<SubmissionRequest>,
) -> Response
where
    S: SubmissionRepository + 'static,
    L: ProgressionLedger + 'static,
{
    match service.submit(&ProjectId(project_id), request) {
        Ok(submission) => (StatusCode::CREATED, axum::Json(submission)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BeginReviewRequest {
    pub(crate) reviewer_id: UserId,
    pub(crate) reviewer_role: ActorRole,
}

pub(crate) async fn begin_review_handler<S, L>(
    State(service): State<Arc<SubmissionWorkflow<S, L>>>,
    Path(submission_id): Path<String>,
    axum::Json(request): axum::Json<BeginReviewRequest>,
) -> Response
where
    S: SubmissionRepository + 'static,
    L: ProgressionLedger + 'static,
{
    match service.begin_review(
        &SubmissionId(submission_id),
        request.reviewer_id,
        request.reviewer_role,
    ) {
        Ok(submission) => (StatusCode::OK, axum::Json(submission)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

pub(crate) async fn review_handler<S, L>(
    State(service): State<Arc<SubmissionWorkflow<S, L>>>,
    Path(submission_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    S: SubmissionRepository + 'static,
    L: ProgressionLedger + 'static,
{
    match service.review(&SubmissionId(submission_id), request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GrantXpRequest {
    pub(crate) amount: u32,
    #[serde(default)]
    pub(crate) reason: Option<String>,
}

pub(crate) async fn grant_xp_handler<S, L>(
    State(service): State<Arc<SubmissionWorkflow<S, L>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<GrantXpRequest>,
) -> Response
where
    S: SubmissionRepository + 'static,
    L: ProgressionLedger + 'static,
{
    match service.grant_xp(
        &UserId(user_id),
        request.amount,
        request.reason.as_deref(),
    ) {
        Ok(progression) => (StatusCode::OK, axum::Json(progression)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

pub(crate) async fn progress_handler<S, L>(
    State(service): State<Arc<SubmissionWorkflow<S, L>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: SubmissionRepository + 'static,
    L: ProgressionLedger + 'static,
{
    match service.progress(&UserId(user_id)) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

fn workflow_error_response(err: WorkflowError) -> Response {
    let status = match &err {
        WorkflowError::Validation(_) | WorkflowError::InvalidTransition { .. } => {
            StatusCode::BAD_REQUEST
        }
        WorkflowError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        WorkflowError::ProjectNotFound(_) | WorkflowError::SubmissionNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        WorkflowError::Repository(RepositoryError::Duplicate)
        | WorkflowError::Repository(RepositoryError::VersionConflict) => StatusCode::CONFLICT,
        WorkflowError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        WorkflowError::Repository(RepositoryError::Unavailable(_))
        | WorkflowError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
