use crate::errors::error::{DEFAULT_ERROR_MESSAGE, ErrorResponse};
use http::StatusCode;
use thiserror::Error;

/// A non-2xx answer from the backend, classified by status code.
///
/// The message is the user-visible text derived from the response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("HTTP {status}: {message}")]
    Other { status: u16, message: String },
}

impl HttpError {
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::BAD_REQUEST => HttpError::BadRequest(message),
            StatusCode::UNAUTHORIZED => HttpError::Unauthorized(message),
            StatusCode::FORBIDDEN => HttpError::Forbidden(message),
            StatusCode::NOT_FOUND => HttpError::NotFound(message),
            StatusCode::CONFLICT => HttpError::Conflict(message),
            StatusCode::SERVICE_UNAVAILABLE => HttpError::ServiceUnavailable(message),
            StatusCode::INTERNAL_SERVER_ERROR => HttpError::Internal(message),
            other => HttpError::Other {
                status: other.as_u16(),
                message,
            },
        }
    }

    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = ErrorResponse::from_body(body).message_or(DEFAULT_ERROR_MESSAGE);
        Self::from_status(status, message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Other { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::Forbidden(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::Internal(msg) => msg,
            HttpError::Other { message, .. } => message,
        }
    }

    /// True when the body carried no recognizable error field.
    pub fn is_generic(&self) -> bool {
        self.message() == DEFAULT_ERROR_MESSAGE
    }
}
