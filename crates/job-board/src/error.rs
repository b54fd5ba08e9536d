use crate::board::lifecycle::LifecycleError;
use crate::board::seed::SeedError;
use crate::board::store::StoreError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failures that end a process run or an HTTP request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("seeding error: {0}")]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Board(#[from] LifecycleError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Board(LifecycleError::Store(StoreError::Unavailable(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Board(
                LifecycleError::VacancyNotFound
                | LifecycleError::NotFoundOrForbidden
                | LifecycleError::ApplicationNotFound
                | LifecycleError::ResumeNotFound
                | LifecycleError::Store(StoreError::NotFound),
            ) => StatusCode::NOT_FOUND,
            AppError::Board(
                LifecycleError::NoResume
                | LifecycleError::DuplicateApplication
                | LifecycleError::InvalidTransition { .. }
                | LifecycleError::Store(StoreError::Conflict),
            ) => StatusCode::CONFLICT,
            AppError::Seed(SeedError::Csv(_)) => StatusCode::BAD_REQUEST,
            AppError::Seed(_) | AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
