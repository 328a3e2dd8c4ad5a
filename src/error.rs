use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered, but reported a failure (non-2xx or `success: false`).
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed.
    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl Error {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }

    /// Failures raised before any request was sent.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Error::BadRequest(_) | Error::Validation(_) | Error::Multipart(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let client_side = self.is_client_side();
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Api { status, message } => {
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, message)
            }
            Error::Transport(err) => (
                StatusCode::BAD_GATEWAY,
                format!("Backend unreachable: {}", err),
            ),
            Error::Json(err) => (
                StatusCode::BAD_GATEWAY,
                format!("Unexpected backend payload: {}", err),
            ),
            Error::Multipart(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Anyhow(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        if client_side {
            tracing::debug!(status = %status, "Rejected request: {}", error_message);
        } else {
            tracing::warn!(status = %status, "{}", error_message);
        }
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
