use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use socialytics_types::ErrorResponse;

use crate::db::{BenchmarkError, QueryError, SchemaError, StoreError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", Some(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", Some(msg)),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some("An unexpected error occurred".to_string()),
                )
            }
        };

        let error_response = ErrorResponse {
            error: message.to_string(),
            details,
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidLimit(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Invalid(msg) => ApiError::BadRequest(msg),
            StoreError::ConstraintViolation(msg) => ApiError::Conflict(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<BenchmarkError> for ApiError {
    fn from(err: BenchmarkError) -> Self {
        match err {
            BenchmarkError::Query(err) => err.into(),
            BenchmarkError::Schema(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(QueryError::InvalidLimit(0)), StatusCode::BAD_REQUEST),
            (ApiError::from(StoreError::not_found("User", 7)), StatusCode::NOT_FOUND),
            (
                ApiError::from(StoreError::ConstraintViolation("UNIQUE".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(StoreError::Invalid("blank".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(SchemaError::MissingColumn {
                    table: "Users".to_string(),
                    column: "email".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_benchmark_errors_unwrap_to_their_source() {
        let err = ApiError::from(BenchmarkError::Query(QueryError::InvalidLimit(-1)));
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
