use thiserror::Error;

/// Failure states a backend call can end in. A refetch that no longer
/// contains a locally selected record is not represented here: that case
/// keeps prior local state and is handled where pages are applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected by server: {0}")]
    ServerRejected(String),

    #[error("Session expired")]
    AuthExpired,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Line shown to the person driving the client, mirroring what the
    /// backend sent where one exists.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::ServerRejected(msg) => msg.clone(),
            ApiError::AuthExpired => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Transport(_) => "Could not reach the server. Please try again.".to_string(),
            ApiError::Decode(_) => "The server returned an unexpected response.".to_string(),
        }
    }

    /// Notice text for a failed operation: the server-provided reason when
    /// there is one, the operation's own fallback when the failure never
    /// left this process.
    pub fn reason_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(reason)
            | ApiError::NotFound(reason)
            | ApiError::ServerRejected(reason) => reason.clone(),
            ApiError::AuthExpired => self.user_message(),
            ApiError::Transport(_) | ApiError::Decode(_) => fallback.to_string(),
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }
}
