use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use planboard_model::ModelError;
use planboard_workbook::WorkbookError;
use serde_json::json;

/// API-level failure, rendered as a JSON error body with a matching
/// status code. Nothing fails silently into an empty dataset.
#[derive(Debug)]
pub enum ApiError {
    /// Route addressed a record that does not exist.
    NotFound(String),
    /// Request payload failed validation.
    Invalid(String),
    /// Workbook reload failed.
    Load(WorkbookError),
    /// Reload requested but the server has no workbook source.
    NoSource,
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::StoreNotFound { .. } | ModelError::SkuNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            ModelError::DuplicateStoreId { .. }
            | ModelError::DuplicateSkuId { .. }
            | ModelError::MissingField { .. } => Self::Invalid(err.to_string()),
        }
    }
}

impl From<WorkbookError> for ApiError {
    fn from(err: WorkbookError) -> Self {
        Self::Load(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Invalid(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Load(err) => {
                tracing::error!(error = %err, "workbook reload failed");
                let status = match &err {
                    WorkbookError::Fetch(_) | WorkbookError::Io(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            Self::NoSource => (
                StatusCode::BAD_REQUEST,
                "no workbook source configured".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
