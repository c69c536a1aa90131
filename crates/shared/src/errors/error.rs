use serde::{Deserialize, Serialize};

pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Error envelope returned by the backend.
///
/// Handlers answer either `{"error": "..."}` or `{"message": "..."}`; both are
/// optional so that any JSON object (or a non-JSON body) still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn user_message(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|msg| !msg.is_empty())
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.user_message().unwrap_or(fallback).to_string()
    }
}
