//! Smoke test for the auth API: register, verify email, log in, fetch profile.
//!
//! Usage:
//!   cargo run --bin verify-api -- [OPTIONS]
//!
//! Options:
//!   --base-url <url>              API root (defaults to API_BASE_URL, then http://localhost:8080)
//!   --skip-register               Skip step 1 when the demo user already exists
//!   --verification-token <token>  Token copied from the server console

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tracing::info;

use petwellness_ops::config::{ApiConfig, ApiOverrides};
use petwellness_ops::services::SmokeTest;
use petwellness_ops::utils::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "verify-api")]
#[command(about = "Run the auth API smoke test against a running server")]
struct Args {
    /// API base URL (defaults to API_BASE_URL env var)
    #[arg(long)]
    base_url: Option<String>,

    /// Skip registration (demo user already exists)
    #[arg(long)]
    skip_register: bool,

    /// Email verification token taken from the server log
    #[arg(long)]
    verification_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("petwellness_ops=info,verify_api=info");

    let args = Args::parse();

    // Flags win over environment
    let config = ApiConfig::from_env_with(&ApiOverrides {
        base_url: args.base_url,
        skip_registration: args.skip_register,
        verification_token: args.verification_token,
    })?;

    info!(base_url = %config.base_url, username = %config.profile.username, "Starting auth smoke test");

    let smoke_test = SmokeTest::from_config(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = smoke_test.run(&mut out).await?;
    out.flush()?;

    info!(
        registered = report.registration.succeeded(),
        token_obtained = report.login.token().is_some(),
        profile_ok = report.profile.succeeded(),
        "Smoke test finished"
    );

    Ok(())
}
