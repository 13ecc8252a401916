/// Unified error handling module
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("External API error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream responded with status {0}")]
    Upstream(StatusCode),

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Stable diagnostic code recorded alongside a failed fetch
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Network(e) => match e.status() {
                Some(status) => status_code(status),
                None if e.is_timeout() => "UPSTREAM_TIMEOUT",
                None => "UPSTREAM_ERROR",
            },
            ApiError::Upstream(status) => status_code(*status),
            ApiError::Decode(_) => "DECODE_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Terminal(_) => "TERMINAL_ERROR",
            ApiError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the failure means "no such record" rather than a transport problem
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::NotFound(_) => true,
            ApiError::Upstream(status) => *status == StatusCode::NOT_FOUND,
            _ => false,
        }
    }
}

fn status_code(status: StatusCode) -> &'static str {
    match status.as_u16() {
        403 => "UPSTREAM_403",
        404 => "UPSTREAM_404",
        429 => "UPSTREAM_429",
        500..=599 => "UPSTREAM_5XX",
        _ => "UPSTREAM_ERROR",
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
