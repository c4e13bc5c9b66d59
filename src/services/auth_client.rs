//! HTTP client for the Pet Wellness auth API.

use reqwest::{Client, RequestBuilder, Url};
use tracing::debug;

use crate::error::Result;
use crate::models::{ApiReply, LoginRequest, RegisterRequest};

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const VERIFY_EMAIL_PATH: &str = "/api/auth/verify-email";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const PROFILE_PATH: &str = "/api/users/profile";

/// Thin client over the auth endpoints.
///
/// Every call returns the raw status and body; HTTP error statuses are not
/// raised. Only transport failures become errors. No retries, and the
/// client's default timeouts apply.
#[derive(Clone)]
pub struct AuthApiClient {
    http: Client,
    base_url: String,
}

impl AuthApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder().build().unwrap_or_default();
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL the verify-email request goes to, with the token query-encoded
    pub fn verification_url(&self, token: &str) -> String {
        let endpoint = self.url(VERIFY_EMAIL_PATH);
        match Url::parse(&endpoint) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("token", token);
                url.into()
            }
            // Unparseable base; the request itself fails with a builder error
            Err(_) => format!("{}?token={}", endpoint, token),
        }
    }

    /// Verification URL with a literal placeholder, for operator instructions
    pub fn verification_url_template(&self, placeholder: &str) -> String {
        format!("{}?token={}", self.url(VERIFY_EMAIL_PATH), placeholder)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiReply> {
        let url = self.url(REGISTER_PATH);
        debug!(url = %url, username = %request.username, "Registering user");
        self.execute(self.http.post(&url).json(request)).await
    }

    pub async fn verify_email(&self, token: &str) -> Result<ApiReply> {
        let url = self.verification_url(token);
        debug!(url = %url, "Verifying email");
        self.execute(self.http.get(&url)).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<ApiReply> {
        let url = self.url(LOGIN_PATH);
        debug!(url = %url, identity = %request.email_or_username, "Attempting login");
        self.execute(self.http.post(&url).json(request)).await
    }

    /// Fetch the profile of the user the bearer token belongs to
    pub async fn fetch_profile(&self, token: &str) -> Result<ApiReply> {
        let url = self.url(PROFILE_PATH);
        debug!(url = %url, "Fetching profile");
        self.execute(self.http.get(&url).bearer_auth(token)).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<ApiReply> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiReply { status, body })
    }
}
