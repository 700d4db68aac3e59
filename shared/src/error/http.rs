//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use super::types::{ApiResponse, AppError};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::RecordNotFound
            | Self::WorkerNotFound
            | Self::AreaNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::StaleStage
            | Self::RecordTerminal
            | Self::AlreadyAtInitialStage
            | Self::VersionConflict
            | Self::DuplicateRecord
            | Self::DuplicateWorker
            | Self::AreaNameExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::UnknownActor | Self::AccountDisabled => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleStageMismatch
            | Self::AdminRequired
            | Self::ScopeDenied
            | Self::NationalityRestricted
            | Self::ReadOnlyRole => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::AuditDegraded => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, "request failed: {}", self.message);
        }
        let body = axum::Json(ApiResponse::<()>::error(&self));
        (status, body).into_response()
    }
}
