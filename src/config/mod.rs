use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

pub const DEFAULT_DATABASE_NAME: &str = "PetWellnessDB";
pub const DEFAULT_USERS_COLLECTION: &str = "users";
pub const DEFAULT_TARGET_USERNAME: &str = "demo_user";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Settings for the demo-account approval tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Full connection URI, credentials included. Never logged verbatim.
    pub database_url: String,
    pub database_name: String,
    pub users_collection: String,
    pub target_username: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL environment variable is required"))?;

        Ok(StoreConfig {
            database_url,
            database_name: lookup("DATABASE_NAME")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            users_collection: lookup("USERS_COLLECTION")
                .unwrap_or_else(|| DEFAULT_USERS_COLLECTION.to_string()),
            target_username: lookup("TARGET_USERNAME")
                .unwrap_or_else(|| DEFAULT_TARGET_USERNAME.to_string()),
        })
    }

    /// Connection target with user info stripped, safe to print
    pub fn redacted_url(&self) -> String {
        crate::utils::redact_credentials(&self.database_url)
    }
}

/// Fixed account used by the smoke test
#[derive(Clone, Serialize, Deserialize)]
pub struct DemoProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
}

impl Default for DemoProfile {
    fn default() -> Self {
        Self {
            username: DEFAULT_TARGET_USERNAME.to_string(),
            email: "demo@example.com".to_string(),
            password: "demo1234".to_string(),
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
            phone_number: "1234567890".to_string(),
            address: "Demo Address".to_string(),
        }
    }
}

impl fmt::Debug for DemoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoProfile")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone_number", &self.phone_number)
            .field("address", &self.address)
            .finish()
    }
}

/// Settings for the auth API smoke test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub profile: DemoProfile,
    /// Skip step 1 when the demo account already exists
    pub skip_registration: bool,
    /// Token copied from the server console by the operator
    pub verification_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            profile: DemoProfile::default(),
            skip_registration: false,
            verification_token: None,
        }
    }
}

/// Command-line values that take the place of their environment variables
#[derive(Debug, Clone, Default)]
pub struct ApiOverrides {
    pub base_url: Option<String>,
    pub skip_registration: bool,
    pub verification_token: Option<String>,
}

impl ApiOverrides {
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "API_BASE_URL" => self.base_url.clone(),
            "SMOKE_SKIP_REGISTRATION" if self.skip_registration => Some("true".to_string()),
            "VERIFICATION_TOKEN" => self.verification_token.clone(),
            _ => None,
        }
    }
}

impl ApiConfig {
    /// Load from the environment with flag values winning
    pub fn from_env_with(overrides: &ApiOverrides) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup_with(overrides, |key| env::var(key).ok())
    }

    /// Overrides are consulted before `lookup`, so a replaced variable is
    /// never parsed or validated.
    pub fn from_lookup_with<F>(overrides: &ApiOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| overrides.lookup(key).or_else(|| lookup(key)))
    }

    /// Build from an arbitrary variable source, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("API_BASE_URL") {
            config.base_url = url;
        }
        config.validate_base_url()?;

        let profile = &mut config.profile;
        let overrides: [(&str, &mut String); 7] = [
            ("DEMO_USERNAME", &mut profile.username),
            ("DEMO_EMAIL", &mut profile.email),
            ("DEMO_PASSWORD", &mut profile.password),
            ("DEMO_FIRST_NAME", &mut profile.first_name),
            ("DEMO_LAST_NAME", &mut profile.last_name),
            ("DEMO_PHONE_NUMBER", &mut profile.phone_number),
            ("DEMO_ADDRESS", &mut profile.address),
        ];
        for (key, slot) in overrides {
            if let Some(value) = lookup(key) {
                *slot = value;
            }
        }

        if let Some(val) = lookup("SMOKE_SKIP_REGISTRATION") {
            config.skip_registration = val.trim().parse().map_err(|_| {
                anyhow!("SMOKE_SKIP_REGISTRATION must be true or false, got '{}'", val)
            })?;
        }

        config.verification_token = lookup("VERIFICATION_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(config)
    }

    /// Reject base URLs reqwest could not build requests from
    pub fn validate_base_url(&self) -> Result<()> {
        let parsed = reqwest::Url::parse(&self.base_url)
            .map_err(|e| anyhow!("Invalid API base URL '{}': {}", self.base_url, e))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(anyhow!(
                "API base URL must use http or https, got '{}'",
                other
            )),
        }
    }
}
