use std::fmt;
use std::time::Duration;

use serde_json::Value;

/// Errors raised while talking to the Bungie API.
///
/// Every failure on the call path is one of these three kinds. The
/// `response` carried in [`ErrorDetails`] is the raw envelope or body the
/// remote returned, kept for diagnostics.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Generic(ErrorDetails),

    #[error("{details}")]
    RateLimit {
        details: ErrorDetails,
        retry_after: Duration,
    },

    // not raised by the client itself, see `ApiError::maintenance`
    #[error("{0}")]
    Maintenance(ErrorDetails),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Generic,
    RateLimit,
    Maintenance,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub code: Option<i64>,
    pub response: Option<Value>,
}

impl ErrorDetails {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            response: None,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ApiError {
    pub fn generic(details: ErrorDetails) -> Self {
        Self::Generic(details)
    }

    pub fn rate_limit(retry_after: Duration, response: Option<Value>) -> Self {
        let details = ErrorDetails {
            message: format!(
                "Rate limit exceeded. Try again after {} seconds.",
                retry_after.as_secs()
            ),
            code: Some(429),
            response,
        };
        Self::RateLimit {
            details,
            retry_after,
        }
    }

    /// For callers that recognise a maintenance window in a payload; the
    /// client never produces this on its own.
    pub fn maintenance(details: ErrorDetails) -> Self {
        Self::Maintenance(details)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Generic(_) => ErrorKind::Generic,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Maintenance(_) => ErrorKind::Maintenance,
        }
    }

    pub fn details(&self) -> &ErrorDetails {
        match self {
            Self::Generic(details) | Self::Maintenance(details) => details,
            Self::RateLimit { details, .. } => details,
        }
    }

    pub fn message(&self) -> &str {
        &self.details().message
    }

    pub fn code(&self) -> Option<i64> {
        self.details().code
    }

    pub fn response(&self) -> Option<&Value> {
        self.details().response.as_ref()
    }
}

/// Errors raised while setting a client up, plus [`ApiError`] so
/// applications can carry one error type through `?`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    EnvVar(#[from] EnvVarError),

    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid timeout {value:?} in {var}")]
    InvalidTimeout { var: String, value: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({var})")]
pub struct EnvVarError {
    var: String,
    #[source]
    source: std::env::VarError,
}

impl EnvVarError {
    pub fn new(var: &str, source: std::env::VarError) -> Self {
        Self {
            var: var.into(),
            source,
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_rate_limit_message_mentions_delay() {
        let err = ApiError::rate_limit(Duration::from_secs(45), None);
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded. Try again after 45 seconds."
        );
        assert_eq!(err.code(), Some(429));
    }

    #[test]
    fn test_maintenance_is_constructible() {
        let err = ApiError::maintenance(
            ErrorDetails::new("SystemDisabled: down for maintenance")
                .with_code(5)
                .with_response(json!({"ErrorCode": 5})),
        );
        assert_eq!(err.kind(), ErrorKind::Maintenance);
        assert_eq!(err.message(), "SystemDisabled: down for maintenance");
        assert_eq!(err.code(), Some(5));
        assert_eq!(err.response(), Some(&json!({"ErrorCode": 5})));
    }

    #[test]
    fn test_api_error_converts_into_error() {
        let err: Error = ApiError::generic(ErrorDetails::new("boom")).into();
        assert!(matches!(err, Error::Api(ApiError::Generic(_))));
        assert_eq!(err.to_string(), "boom");
    }
}
