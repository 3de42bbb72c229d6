use reqwest::StatusCode;

use crate::config::MAX_ID;

/// Per-identifier failure. Every variant fails only the identifier that
/// produced it; the runner decides whether the range goes on.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("structure mismatch: {0}")]
    StructureMismatch(String),
    #[error("field `{field}` has malformed value {raw:?}")]
    FieldFormat { field: &'static str, raw: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}")]
    Status { status: StatusCode },
}

impl ScrapeError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::StructureMismatch(what.into())
    }

    /// Whether another attempt at the same URL could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::StructureMismatch(_) | Self::FieldFormat { .. } => false,
        }
    }
}

/// Rejected before any network activity.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("identifier {0} is not supported yet (must be below {max})", max = MAX_ID)]
    TooLarge(u16),
    #[error("identifiers start at 1")]
    Zero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_server_side_statuses_are_retried() {
        assert!(ScrapeError::Status { status: StatusCode::SERVICE_UNAVAILABLE }.is_retryable());
        assert!(ScrapeError::Status { status: StatusCode::TOO_MANY_REQUESTS }.is_retryable());
        assert!(!ScrapeError::Status { status: StatusCode::NOT_FOUND }.is_retryable());
        assert!(!ScrapeError::missing("panel").is_retryable());
        assert!(!ScrapeError::FieldFormat { field: "speed", raw: "??".into() }.is_retryable());
    }
}
