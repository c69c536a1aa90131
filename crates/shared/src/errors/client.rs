use crate::errors::http::HttpError;
use http::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Authentication required: {0}")]
    AuthenticationRequired(String),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        ClientError::Transport(err.into())
    }

    pub fn is_authentication_required(&self) -> bool {
        matches!(self, ClientError::AuthenticationRequired(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(err) => Some(err.status()),
            ClientError::AuthenticationRequired(_) => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    /// Text a view shows for this failure; `fallback` covers errors that
    /// carry nothing the operator can act on.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(messages) if !messages.is_empty() => messages.join("; "),
            ClientError::AuthenticationRequired(_) => SESSION_EXPIRED_MESSAGE.to_string(),
            ClientError::Http(err) if !err.is_generic() => err.message().to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                messages.push(message);
            }
        }
        messages.sort();
        ClientError::Validation(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DEFAULT_ERROR_MESSAGE;

    #[test]
    fn http_message_is_surfaced_verbatim() {
        let err = ClientError::from(HttpError::NotFound("company not found".into()));
        assert_eq!(err.user_message("Operation failed"), "company not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn generic_http_error_uses_caller_fallback() {
        let err = ClientError::from(HttpError::Internal(DEFAULT_ERROR_MESSAGE.into()));
        assert_eq!(err.user_message("Failed to fetch companies"), "Failed to fetch companies");
    }

    #[test]
    fn auth_required_asks_for_login() {
        let err = ClientError::AuthenticationRequired("refresh failed".into());
        assert!(err.is_authentication_required());
        assert_eq!(err.user_message("ignored"), SESSION_EXPIRED_MESSAGE);
    }

    #[test]
    fn validation_messages_are_joined() {
        let err = ClientError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.user_message("ignored"), "a; b");
    }
}
