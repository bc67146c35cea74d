use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::{
    DraftEditError, FeatureValueError, PersistenceError, PlanValidationErrors, SubmitError,
};
use serde::Serialize;
use shared::jwt::JwtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Well-formed request whose fields break plan rules (422).
    #[error("Unprocessable: {message}")]
    Unprocessable {
        message: String,
        details: Vec<ValidationDetail>,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg, None)
            }
            ApiError::Unprocessable { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_plan",
                message,
                Some(details),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                    None,
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg,
                None,
            ),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

fn summary(details: &[ValidationDetail]) -> String {
    if details.len() == 1 {
        details[0].message.clone()
    } else {
        format!("{} validation errors", details.len())
    }
}

impl From<PlanValidationErrors> for ApiError {
    fn from(errors: PlanValidationErrors) -> Self {
        let details: Vec<ValidationDetail> = errors
            .iter()
            .map(|(field, message)| ValidationDetail {
                field: field.to_string(),
                message: message.to_string(),
            })
            .collect();

        ApiError::Unprocessable {
            message: summary(&details),
            details,
        }
    }
}

impl From<FeatureValueError> for ApiError {
    fn from(err: FeatureValueError) -> Self {
        let feature_id = match &err {
            FeatureValueError::KindMismatch { feature_id, .. } => feature_id.clone(),
            FeatureValueError::NotAssignable(feature_id) => feature_id.clone(),
        };

        ApiError::Unprocessable {
            message: err.to_string(),
            details: vec![ValidationDetail {
                field: format!("featureValues.{}", feature_id),
                message: err.to_string(),
            }],
        }
    }
}

impl From<DraftEditError> for ApiError {
    fn from(err: DraftEditError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(id) => {
                ApiError::NotFound(format!("Subscription plan {} not found", id))
            }
            PersistenceError::Conflict(msg) => ApiError::Conflict(msg),
            PersistenceError::Store(msg) => ApiError::Internal(format!("Plan store error: {}", msg)),
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => errors.into(),
            SubmitError::Persistence(err) => err.into(),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => ApiError::Unauthorized("Token has expired".into()),
            JwtError::EncodingError(msg) | JwtError::InvalidKey(msg) => {
                ApiError::Internal(format!("JWT configuration error: {}", msg))
            }
            JwtError::SigningUnavailable => {
                ApiError::Internal("JWT signing key not configured".into())
            }
            JwtError::DecodingError(_) | JwtError::InvalidToken => {
                ApiError::Unauthorized("Invalid token".into())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: field.to_string(),
                    message: e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                })
            })
            .collect();

        ApiError::Validation(summary(&details))
    }
}
