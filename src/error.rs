use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub type Result<T> = std::result::Result<T, OpsError>;

/// Error kinds for categorizing operation failures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    #[serde(rename = "EXT_8001")]
    ConnectionFailed,
    #[serde(rename = "RES_4001")]
    NotFound,
    #[serde(rename = "AUTH_1001")]
    Unauthorized,
    #[serde(rename = "VAL_3003")]
    MalformedResponse,
}

impl ErrorKind {
    /// Get numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorKind::ConnectionFailed => 8001,
            ErrorKind::NotFound => 4001,
            ErrorKind::Unauthorized => 1001,
            ErrorKind::MalformedResponse => 3003,
        }
    }

    /// Get operator-facing message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::ConnectionFailed => "Could not reach the remote service",
            ErrorKind::NotFound => "The requested record was not found",
            ErrorKind::Unauthorized => "The service rejected the credentials",
            ErrorKind::MalformedResponse => "The service returned an unexpected response",
        }
    }
}

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl OpsError {
    /// Helper: Record not found
    pub fn not_found(resource: &str) -> Self {
        OpsError::NotFound(format!("{} not found", resource))
    }

    /// Helper: Request rejected by the API
    pub fn unauthorized(status: u16, body: impl Into<String>) -> Self {
        OpsError::Unauthorized {
            status,
            body: body.into(),
        }
    }

    /// Get error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpsError::ConnectionFailed(_) => ErrorKind::ConnectionFailed,
            OpsError::NotFound(_) => ErrorKind::NotFound,
            OpsError::Unauthorized { .. } => ErrorKind::Unauthorized,
            OpsError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    /// Log error with its kind attached
    pub fn log(&self, operation: &str) {
        let kind = self.kind();
        warn!(
            operation = %operation,
            kind = ?kind,
            code = kind.code(),
            hint = kind.message(),
            error = %self,
            "Operation failed"
        );
    }
}

impl From<reqwest::Error> for OpsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            OpsError::MalformedResponse(err.to_string())
        } else {
            OpsError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<sqlx::Error> for OpsError {
    fn from(err: sqlx::Error) -> Self {
        OpsError::ConnectionFailed(err.to_string())
    }
}

impl From<mongodb::error::Error> for OpsError {
    fn from(err: mongodb::error::Error) -> Self {
        OpsError::ConnectionFailed(err.to_string())
    }
}
