use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("GitHub API rate limit exceeded. Set GITHUB_TOKEN in your environment or .env file")]
    RateLimited { retry_after: Option<u64> },

    #[error("GitHub API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Internal error")]
    Internal,

    #[error("Failed to decode README: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited { .. } | Error::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// HTTP-style status a caller should report for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::RateLimited { .. } => 429,
            Error::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// Applied at operation boundaries: classified upstream errors pass
    /// through, everything else is logged here and replaced by `Internal`.
    pub fn surface(self, context: &str) -> Self {
        match self {
            Error::NotFound(_) | Error::RateLimited { .. } | Error::Upstream { .. } => self,
            Error::Internal => Error::Internal,
            other => {
                tracing::error!(error = ?other, "{}: {}", context, other);
                Error::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_errors_pass_through_boundary() {
        let err = Error::NotFound("octocat".to_string()).surface("analyze");
        assert!(err.is_not_found());

        let err = Error::RateLimited { retry_after: Some(30) }.surface("analyze");
        assert_eq!(err.status_code(), 429);
        assert!(err.is_retryable());

        let err = Error::Upstream {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .surface("analyze");
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn unexpected_errors_become_opaque() {
        let err = Error::Decode("invalid base64".to_string()).surface("analyze");
        assert!(matches!(err, Error::Internal));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Internal error");
    }

    #[test]
    fn rate_limit_message_mentions_token() {
        let err = Error::RateLimited { retry_after: None };
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }
}
