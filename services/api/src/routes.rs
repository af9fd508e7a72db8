use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use skillforge::workflows::guidance::{guidance_router, AnswerArchive, GuidanceService};
use skillforge::workflows::progression::{
    progression_router, ProgressionLedger, SubmissionRepository, SubmissionWorkflow,
};
use std::sync::Arc;

pub(crate) fn with_service_routes<A, S, L>(
    guidance: Arc<GuidanceService<A>>,
    progression: Arc<SubmissionWorkflow<S, L>>,
) -> axum::Router
where
    A: AnswerArchive + 'static,
    S: SubmissionRepository + 'static,
    L: ProgressionLedger + 'static,
{
    guidance_router(guidance)
        .merge(progression_router(progression))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
