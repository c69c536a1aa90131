use std::fmt;

/// Authentication state changes published by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    TokensRefreshed,
    SignedOut,
    /// The session was cleared and the user has to log in again.
    LoginRequired(LoginRequiredReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRequiredReason {
    MissingRefreshToken,
    RefreshRejected,
}

impl fmt::Display for LoginRequiredReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginRequiredReason::MissingRefreshToken => write!(f, "no refresh token available"),
            LoginRequiredReason::RefreshRejected => write!(f, "token refresh was rejected"),
        }
    }
}
