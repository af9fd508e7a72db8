use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::guidance::GuidanceError;
use crate::workflows::progression::{RepositoryError, WorkflowError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Guidance(GuidanceError),
    Workflow(WorkflowError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Guidance(err) => write!(f, "guidance error: {}", err),
            AppError::Workflow(err) => write!(f, "workflow error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Guidance(err) => Some(err),
            AppError::Workflow(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Guidance(GuidanceError::Intake(_))
            | AppError::Guidance(GuidanceError::QuizNotCompleted)
            | AppError::Workflow(WorkflowError::Validation(_))
            | AppError::Workflow(WorkflowError::InvalidTransition { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Workflow(WorkflowError::Unauthorized { .. }) => StatusCode::FORBIDDEN,
            AppError::Workflow(WorkflowError::ProjectNotFound(_))
            | AppError::Workflow(WorkflowError::SubmissionNotFound(_))
            | AppError::Workflow(WorkflowError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Workflow(WorkflowError::Repository(RepositoryError::Duplicate))
            | AppError::Workflow(WorkflowError::Repository(
                RepositoryError::VersionConflict,
            )) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<GuidanceError> for AppError {
    fn from(value: GuidanceError) -> Self {
        Self::Guidance(value)
    }
}

impl From<WorkflowError> for AppError {
    fn from(value: WorkflowError) -> Self {
        Self::Workflow(value)
    }
}
