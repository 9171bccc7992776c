//! Server error types and handling

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use leakward_core::error::{LocalDeployError, RemoteError};
use serde::Serialize;

/// Server result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Missing or malformed input; nothing was processed.
    #[error("{0}")]
    BadRequest(String),

    /// The hosting API answered with a non-success status.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ServerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServerError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) | ServerError::Upstream(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RemoteError> for ServerError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Status { .. } | RemoteError::InvalidRepository(_) => {
                ServerError::Upstream(err.to_string())
            }
            RemoteError::Network(_) | RemoteError::Decode { .. } => {
                ServerError::Internal(err.to_string())
            }
        }
    }
}

impl From<LocalDeployError> for ServerError {
    fn from(err: LocalDeployError) -> Self {
        match err {
            LocalDeployError::NotFound(_) => {
                ServerError::BadRequest("Project path does not exist".to_string())
            }
            LocalDeployError::Io { .. } => ServerError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

/// Convert any error to ServerError
impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("Background task failed: {}", err))
    }
}
