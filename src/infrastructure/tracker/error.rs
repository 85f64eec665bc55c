use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the tracker's task API.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("tracker resource not found: {0}")]
    NotFound(String),

    #[error("tracker rate limit exceeded")]
    RateLimited,

    #[error("tracker rejected the request: {0}")]
    InvalidRequest(String),

    #[error("tracker server error: {0}")]
    ServerError(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode tracker response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TrackerError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::AuthenticationFailed(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::InvalidRequest(body)
            }
            s if s.is_server_error() => Self::ServerError(format!("{status}: {body}")),
            _ => Self::ServerError(format!("unexpected status {status}: {body}")),
        }
    }
}
