use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Message;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error response rendered as `{"message": ..., "detail": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: Message,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        let body = Message { message: message.into(), detail };
        Self { status, body }
    }

    /// Map a service failure; `failed` names the operation for 500 bodies, e.g. `"Create Failed"`.
    pub fn from_service(e: ServiceError, not_found: &str, failed: &str) -> Self {
        match e {
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, not_found, None),
            ServiceError::Db(_) | ServiceError::Model(_) => {
                error!(err = %e, op = failed, "datastore failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failed, Some(e.to_string()))
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
