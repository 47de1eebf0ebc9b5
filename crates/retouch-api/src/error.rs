//! HTTP error response conversion
//!
//! **Handler pattern:** return `Result<impl IntoResponse, HttpAppError>` and let `?`
//! convert `AppError` (and anything that converts into it) so every JSON
//! endpoint renders the same status, body and log line.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use retouch_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    pub fn from_app_error(app_error: &AppError, hide_details: bool) -> Self {
        let (details, error_type) = if hide_details || app_error.is_sensitive() {
            (None, None)
        } else {
            (
                Some(app_error.detailed_message()),
                Some(app_error.error_type().to_string()),
            )
        };

        Self {
            error: app_error.client_message(),
            details,
            error_type,
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }

    /// Same response without the internal error chain.
    pub fn redacted(self) -> Self {
        Self {
            details: None,
            error_type: None,
            ..self
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: IntoResponse and AppError both live in other crates)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl<E> From<E> for HttpAppError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        HttpAppError(err.into())
    }
}

pub(crate) fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

pub(crate) fn status_of(error: &AppError) -> StatusCode {
    StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Renders the full error body and keeps a copy in the response extensions,
/// where [`crate::middleware::redact_error_details`] picks it up in production.
impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        log_error(app_error);

        let body = ErrorResponse::from_app_error(app_error, false);
        let mut response = (status_of(app_error), Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_processing::{ProcessingError, ValidationError};

    #[test]
    fn test_from_validation_error_file_too_large() {
        let HttpAppError(app_err) = ValidationError::FileTooLarge {
            size: 1000,
            max: 500,
        }
        .into();
        match app_err {
            AppError::PayloadTooLarge(msg) => {
                assert!(msg.contains("1000"));
                assert!(msg.contains("500"));
            }
            _ => panic!("Expected PayloadTooLarge variant"),
        }
    }

    #[test]
    fn test_from_processing_error_invalid_parameter() {
        let HttpAppError(app_err) = ProcessingError::InvalidParameter {
            name: "contrast_value",
            value: "x".to_string(),
        }
        .into();
        assert!(matches!(app_err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_into_response_status() {
        let response = HttpAppError(AppError::MissingFile).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = HttpAppError(AppError::Internal("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_sensitive_errors_hide_details() {
        let body = ErrorResponse::from_app_error(&AppError::Internal("secret".to_string()), false);
        assert_eq!(body.error, "Internal server error");
        assert!(body.details.is_none());

        let body = ErrorResponse::from_app_error(&AppError::EmptyFilename, false);
        assert_eq!(body.error, "No file selected");
        assert_eq!(body.error_type.as_deref(), Some("EmptyFilename"));

        let body = ErrorResponse::from_app_error(&AppError::EmptyFilename, true);
        assert!(body.details.is_none());
    }

    #[test]
    fn test_redacted_drops_details_only() {
        let body = ErrorResponse::from_app_error(
            &AppError::InvalidInput("File type not allowed: 'bmp'".to_string()),
            false,
        );
        assert!(body.details.is_some());

        let redacted = body.redacted();
        assert!(redacted.details.is_none());
        assert!(redacted.error_type.is_none());
        assert_eq!(redacted.code, "INVALID_INPUT");
        assert_eq!(redacted.error, "File type not allowed: 'bmp'");
    }

    #[test]
    fn test_into_response_keeps_body_extension() {
        let response = HttpAppError(AppError::EmptyFilename).into_response();
        let body = response
            .extensions()
            .get::<ErrorResponse>()
            .expect("error body extension");
        assert_eq!(body.code, "EMPTY_FILENAME");
    }

    /// Serialized ErrorResponse has "error", "code", "recoverable" and
    /// optionally "details" / "error_type" / "suggested_action".
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::from_app_error(&AppError::MissingFile, true);
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["error"], "No file uploaded");
        assert_eq!(json["code"], "MISSING_FILE");
        assert_eq!(json["recoverable"], false);
        assert!(json.get("details").is_none());
    }
}
