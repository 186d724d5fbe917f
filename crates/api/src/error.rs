//! HTTP error mapping

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("session {0} not found")]
    SessionNotFound(Uuid),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("a recommendation request is already running for session {0}")]
    RecommendationInFlight(Uuid),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::InvalidPath(_) | AppError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::RecommendationInFlight(_) => StatusCode::CONFLICT,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::SessionNotFound(_) => "not_found",
            AppError::BadRequest(_) | AppError::InvalidPath(_) | AppError::InvalidBody(_) => {
                "bad_request"
            }
            AppError::RecommendationInFlight(_) => "conflict",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
