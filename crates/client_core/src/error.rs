use shared::error::{ErrorCode, ProblemDetail};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-2xx status.
    #[error("{}", .problem.message())]
    Api { status: u16, problem: ProblemDetail },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid server url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn api(status: u16, problem: ProblemDetail) -> Self {
        Self::Api { status, problem }
    }

    /// Text shown to the user in an error notification.
    pub fn detail(&self) -> String {
        match self {
            Self::Api { problem, .. } => problem.message().to_string(),
            other => other.to_string(),
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { status, problem } => {
                Some(problem.code.unwrap_or_else(|| ErrorCode::from_status(*status)))
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. }) || self.code() == Some(ErrorCode::NotFound)
    }

    pub fn problem(&self) -> Option<&ProblemDetail> {
        match self {
            Self::Api { problem, .. } => Some(problem),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_backend_detail_verbatim() {
        let err = ClientError::api(400, ProblemDetail::new(400, "Address required"));
        assert_eq!(err.to_string(), "Address required");
        assert_eq!(err.detail(), "Address required");
        assert_eq!(err.code(), Some(ErrorCode::BadRequest));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_recognised_from_status() {
        let err = ClientError::api(404, ProblemDetail::default());
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some(ErrorCode::NotFound));
    }

    #[test]
    fn backend_code_wins_over_status() {
        let problem: ProblemDetail =
            serde_json::from_str(r#"{"status":400,"detail":"taken","code":"CONFLICT"}"#)
                .expect("problem");
        let err = ClientError::api(400, problem);
        assert_eq!(err.code(), Some(ErrorCode::Conflict));
        assert!(!err.is_not_found());
    }
}
