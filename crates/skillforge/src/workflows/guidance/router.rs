use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::UserId;
use super::repository::AnswerArchive;
use super::service::{GuidanceError, GuidanceService, QuizSubmission};

/// Router builder exposing the quiz and recommendation endpoints.
pub fn guidance_router<A>(service: Arc<GuidanceService<A>>) -> Router
where
    A: AnswerArchive + 'static,
{
    Router::new()
        .route("/api/v1/quiz/submissions", post(submit_quiz_handler::<A>))
        .route(
            "/api/v1/users/:user_id/recommendations",
            get(recommendations_handler::<A>),
        )
        .with_state(service)
}

pub(crate) async fn submit_quiz_handler<A>(
    State(service): State<Arc<GuidanceService<A>>>,
    axum::Json(submission): axum::Json<QuizSubmission>,
) -> Response
where
    A: AnswerArchive + 'static,
{
    match service.submit_quiz(submission) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => guidance_error_response(err),
    }
}

pub(crate) async fn recommendations_handler<A>(
    State(service): State<Arc<GuidanceService<A>>>,
    Path(user_id): Path<String>,
) -> Response
where
    A: AnswerArchive + 'static,
{
    match service.recommendations_for(&UserId(user_id)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => guidance_error_response(err),
    }
}

fn guidance_error_response(err: GuidanceError) -> Response {
    let status = match &err {
        GuidanceError::Intake(_) | GuidanceError::QuizNotCompleted => StatusCode::BAD_REQUEST,
        GuidanceError::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
