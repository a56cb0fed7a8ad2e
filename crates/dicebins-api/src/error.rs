//! Error handling for the dicebins API
//!
//! Calculator errors arrive as an [`ErrorSet`]; this module turns the reported
//! subset into an HTTP status plus either a JSON or a plain-text body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use dicebins_calculator::{BinError, ErrorSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: String,
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        kind: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self { kind: kind.into(), field: field.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Request fields failed validation (400 Bad Request)
    #[error("Validation error: {message}")]
    Validation { message: String, errors: Vec<FieldError> },

    /// More precincts than the dice can cover (422 Unprocessable Entity)
    #[error("Insufficient range: {message}")]
    InsufficientRange { message: String },

    /// Internal server errors (500 Internal Server Error)
    #[error("Internal server error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::InsufficientRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::InsufficientRange { .. } => "INSUFFICIENT_RANGE",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Human-readable notices, one per line of a plain-text body.
    pub fn notices(&self) -> Vec<String> {
        match self {
            ApiError::Validation { errors, .. } => {
                errors.iter().map(|e| e.message.clone()).collect()
            }
            ApiError::InsufficientRange { message } => vec![message.clone()],
            other => vec![other.to_string()],
        }
    }

    pub fn to_response(&self) -> ApiErrorResponse {
        let details = match self {
            ApiError::Validation { errors, .. } => Some(serde_json::json!({ "errors": errors })),
            ApiError::Internal { source: Some(source_err), .. } => {
                Some(serde_json::json!({ "source": source_err.to_string() }))
            }
            _ => None,
        };

        ApiErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details,
            timestamp: Utc::now(),
        }
    }

    /// Plain-text variant of the error, for the text rendering endpoint.
    pub fn into_text_response(self) -> Response {
        let mut body = self.notices().join("\n");
        body.push('\n');
        (self.status_code(), body).into_response()
    }
}

/// JSON-serializable error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}

/// Convenience constructors for common error scenarios
impl ApiError {
    pub fn validation_field(
        kind: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let error = FieldError::new(kind, field, message);
        Self::Validation { message: error.message.clone(), errors: vec![error] }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), source: None }
    }
}

/// Maps the reported subset of a calculator error set. Field validation
/// errors win; `InsufficientRange` only surfaces on its own.
impl From<ErrorSet> for ApiError {
    fn from(errors: ErrorSet) -> Self {
        let reported = errors.reported();
        let field_errors: Vec<FieldError> = reported
            .iter()
            .filter_map(|e| e.field().map(|field| FieldError::new(e.kind(), field, e.to_string())))
            .collect();

        if !field_errors.is_empty() {
            let message = field_errors
                .iter()
                .map(|e| e.kind.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return ApiError::Validation { message, errors: field_errors };
        }

        if reported.contains(&BinError::InsufficientRange) {
            return ApiError::InsufficientRange {
                message: BinError::InsufficientRange.to_string(),
            };
        }

        ApiError::internal("calculation failed without a reported error")
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_map_to_bad_request() {
        let mut errors = ErrorSet::new();
        errors.extend([
            BinError::InvalidDiceCount,
            BinError::InvalidPrecinctCount,
            BinError::InsufficientRange,
        ]);
        let api_error = ApiError::from(errors);

        assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error_code(), "VALIDATION_ERROR");
        match &api_error {
            ApiError::Validation { errors, .. } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["numdice", "numprec"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn lone_insufficient_range_is_unprocessable() {
        let api_error = ApiError::from(ErrorSet::from(BinError::InsufficientRange));
        assert_eq!(api_error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.notices().len(), 1);
        assert!(api_error.notices()[0].contains("increase the number of dice"));
    }

    #[test]
    fn validation_details_list_every_field() {
        let mut errors = ErrorSet::new();
        errors.extend([BinError::InvalidPrecinctCount, BinError::InvalidPasteFlag]);
        let response = ApiError::from(errors).to_response();

        let details = response.details.unwrap();
        assert_eq!(details["errors"][0]["kind"], "InvalidPrecinctCount");
        assert_eq!(details["errors"][1]["field"], "csv");
    }

    #[test]
    fn dice_limit_is_a_numdice_field_error() {
        let api_error = ApiError::from(ErrorSet::from(BinError::TooManyDice));
        assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
        let details = api_error.to_response().details.unwrap();
        assert_eq!(details["errors"][0]["kind"], "TooManyDice");
        assert_eq!(details["errors"][0]["field"], "numdice");
    }
}
