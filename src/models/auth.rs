//! Auth Types Module
//!
//! Request/response bodies exchanged with the Pet Wellness auth API.

use serde::{Deserialize, Serialize};

use crate::config::DemoProfile;
use crate::error::{OpsError, Result};

// ============================================================================
// Requests
// ============================================================================

/// Registration Request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
}

impl From<&DemoProfile> for RegisterRequest {
    fn from(profile: &DemoProfile) -> Self {
        Self {
            username: profile.username.clone(),
            email: profile.email.clone(),
            password: profile.password.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            phone_number: profile.phone_number.clone(),
            address: profile.address.clone(),
        }
    }
}

/// Login Request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_or_username: String,
    pub password: String,
}

impl From<&DemoProfile> for LoginRequest {
    fn from(profile: &DemoProfile) -> Self {
        Self {
            email_or_username: profile.username.clone(),
            password: profile.password.clone(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Auth Response (Token)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic message body returned by register and verify-email
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: bool,
}

/// Raw status and body of one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The API signals success with a plain 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Best-effort parse of a `{message, success}` body
    pub fn message(&self) -> Option<MessageResponse> {
        serde_json::from_str(&self.body).ok()
    }

    /// Interpret this reply as a login response and pull out the bearer token.
    ///
    /// Anything other than a 200 carrying a non-empty string `token` is an error;
    /// an empty or malformed body never panics.
    pub fn bearer_token(&self) -> Result<String> {
        match self.status {
            200 => {}
            404 => return Err(OpsError::NotFound(format!("login endpoint: {}", self.body))),
            status => return Err(OpsError::unauthorized(status, self.body.clone())),
        }

        if self.body.trim().is_empty() {
            return Err(OpsError::MalformedResponse(
                "login response body is empty".to_string(),
            ));
        }

        let auth: AuthResponse = serde_json::from_str(&self.body).map_err(|e| {
            OpsError::MalformedResponse(format!("failed to parse login response: {}", e))
        })?;

        match auth.token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(OpsError::MalformedResponse(
                "login response did not contain a token".to_string(),
            )),
        }
    }
}
