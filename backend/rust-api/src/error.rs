use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Engine and boundary failures, translated to `{"error": "..."}` bodies at
/// the HTTP edge. Every operation is all-or-nothing: an error means no state
/// changed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("officer not found")]
    OfficerNotFound,
    #[error("subject not found")]
    SubjectNotFound,
    #[error("no tests found for officer")]
    NoTestsForOfficer,
    #[error("test not found")]
    TestNotFound,
    #[error("test already started")]
    AlreadyStarted,
    #[error("test has not been started yet")]
    NotStarted,
    #[error("test has already been submitted")]
    AlreadySubmitted,
    #[error("test time has expired")]
    Expired,
    #[error("subject does not have enough questions for test")]
    NoQuota,
    #[error("not enough questions in chapter {0}")]
    InsufficientQuestions(String),
    #[error("answers cannot be empty")]
    EmptyAnswers,
    #[error("test has no questions to score")]
    EmptyTest,
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::OfficerNotFound
            | Self::SubjectNotFound
            | Self::NoTestsForOfficer
            | Self::TestNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyStarted | Self::NotStarted | Self::AlreadySubmitted => {
                StatusCode::CONFLICT
            }
            Self::Expired => StatusCode::GONE,
            Self::EmptyAnswers | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            // Quota violations mean the loaded catalog is inconsistent.
            Self::NoQuota | Self::InsufficientQuestions(_) | Self::EmptyTest | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
