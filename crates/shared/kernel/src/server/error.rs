use super::state::ApiStateError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use castellan_derive::api_model;
use std::borrow::Cow;
use tracing::{error, warn};

pub type ApiResult<T> = Result<T, ApiError>;

/// One failing input field.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Field name as submitted (`checkIn`, `email`, ...)
    pub field: String,
    /// Machine-readable rule that failed (`required`, `min`, `email`, ...)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

/// Error detail.
#[api_model]
pub struct ErrorDetail {
    /// Stable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Per-field failures (validation errors only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldIssue>,
}

/// Error envelope returned by every endpoint.
#[api_model]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// HTTP-facing error: a status plus the `{ "error": { .. } }` envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: Cow<'static, str>,
    message: String,
    fields: Vec<FieldIssue>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self { status, code: code.into(), message: message.into(), fields: Vec::new() }
    }

    pub fn bad_request(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn not_found(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    /// 422 carrying every failing field.
    pub fn unprocessable(message: impl Into<String>, fields: Vec<FieldIssue>) -> Self {
        Self { fields, ..Self::new(StatusCode::UNPROCESSABLE_ENTITY, "validation", message) }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldIssue] {
        &self.fields
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiStateError> for ApiError {
    fn from(err: ApiStateError) -> Self {
        Self::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = %self.code, "{}", self.message);
        } else {
            warn!(status = %self.status, code = %self.code, fields = self.fields.len(), "{}", self.message);
        }

        let body = ErrorBody {
            error: ErrorDetail { code: self.code.into_owned(), message: self.message, fields: self.fields },
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn renders_envelope_with_fields() {
        let issue = FieldIssue {
            field: "guests".to_owned(),
            code: "min".to_owned(),
            message: "At least 1 guest".to_owned(),
        };
        let response = ApiError::unprocessable("Form has invalid fields", vec![issue]).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["code"], "validation");
        assert_eq!(json["error"]["fields"][0]["field"], "guests");
    }

    #[tokio::test]
    async fn omits_empty_field_list() {
        let response = ApiError::not_found("unknown_form", "No form named moat").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["message"], "No form named moat");
        assert!(json["error"].get("fields").is_none());
    }

    #[test]
    fn missing_slice_maps_to_internal() {
        let err: ApiError =
            ApiStateError::MissingSlice { message: "Catalog".into(), context: None }.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "internal");
    }
}
