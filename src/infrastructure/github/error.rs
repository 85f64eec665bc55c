use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the GitHub REST API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Authentication failed due to an invalid or missing token
    #[error("GitHub authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Repository or alert does not exist (or the token cannot see it)
    #[error("GitHub resource not found: {0}")]
    NotFound(String),

    /// Secondary rate limit or abuse detection triggered
    #[error("GitHub rate limit exceeded")]
    RateLimited,

    /// GitHub rejected a state transition, e.g. reopening a fixed alert
    #[error("GitHub rejected the state transition: {0}")]
    IllegalTransition(String),

    /// GitHub server error (5xx)
    #[error("GitHub server error: {0}")]
    ServerError(String),

    /// Network error during the request
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GitHubError {
    /// Classify an error HTTP status plus response body.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::AuthenticationFailed(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::IllegalTransition(body)
            }
            s if s.is_server_error() => Self::ServerError(format!("{status}: {body}")),
            _ => Self::ServerError(format!("unexpected status {status}: {body}")),
        }
    }
}
