//! Mark the seeded demo account as email-verified and approved.
//!
//! Usage:
//!   cargo run --bin approve-demo-user -- [OPTIONS]
//!
//! Options:
//!   --database-url <uri>    Connection URI (defaults to DATABASE_URL env var)
//!   --database-name <name>  Database holding the users collection
//!   --collection <name>     Users collection name
//!   --username <name>       Account to approve (default: demo_user)

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use petwellness_ops::config::StoreConfig;
use petwellness_ops::database::{connect_user_store, UserStore};
use petwellness_ops::error::OpsError;
use petwellness_ops::services::DemoAccountApproval;
use petwellness_ops::utils::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "approve-demo-user")]
#[command(about = "Mark the demo account as email-verified and approved")]
struct Args {
    /// Database URL (defaults to DATABASE_URL env var)
    #[arg(long)]
    database_url: Option<String>,

    /// Database name (defaults to DATABASE_NAME env var, then PetWellnessDB)
    #[arg(long)]
    database_name: Option<String>,

    /// Users collection (defaults to USERS_COLLECTION env var, then users)
    #[arg(long)]
    collection: Option<String>,

    /// Username to approve (defaults to TARGET_USERNAME env var, then demo_user)
    #[arg(short, long)]
    username: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("petwellness_ops=info,approve_demo_user=info");

    let args = Args::parse();

    // Flags win over environment
    let mut config = match args.database_url {
        Some(url) => StoreConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some(url.clone()),
            _ => std::env::var(key).ok(),
        })?,
        None => StoreConfig::from_env()?,
    };
    if let Some(name) = args.database_name {
        config.database_name = name;
    }
    if let Some(collection) = args.collection {
        config.users_collection = collection;
    }
    if let Some(username) = args.username {
        config.target_username = username;
    }

    info!(target_db = %config.redacted_url(), username = %config.target_username, "Approving demo account");

    let store: Arc<dyn UserStore> = match connect_user_store(&config).await {
        Ok(store) => Arc::from(store),
        Err(e) => {
            e.log("connect");
            println!("Error: {}", e);
            return Ok(());
        }
    };

    let approval = DemoAccountApproval::new(store.clone(), config.target_username.clone());
    match approval.approve().await {
        Ok(report) if report.was_already_approved() => {
            println!(
                "Successfully verified and approved {} (no changes needed).",
                report.username
            );
        }
        Ok(report) => {
            println!("Successfully verified and approved {}.", report.username);
        }
        Err(OpsError::NotFound(_)) => {
            println!("User {} not found.", approval.username());
        }
        Err(e) => {
            error!(error = %e, "Approval failed");
            println!("Error: {}", e);
        }
    }

    store.close().await;
    Ok(())
}
