use std::sync::Arc;
use tracing::info;

use crate::database::UserStore;
use crate::error::{OpsError, Result};

/// What the approval run changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalReport {
    pub username: String,
    pub matched: u64,
    pub modified: u64,
}

impl ApprovalReport {
    /// True when the account was already verified and approved before this run
    pub fn was_already_approved(&self) -> bool {
        self.modified == 0
    }
}

/// Marks one seeded account as email-verified and approved
#[derive(Clone)]
pub struct DemoAccountApproval {
    store: Arc<dyn UserStore>,
    username: String,
}

impl DemoAccountApproval {
    pub fn new(store: Arc<dyn UserStore>, username: impl Into<String>) -> Self {
        Self {
            store,
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Run the single conditional update. Safe to repeat.
    pub async fn approve(&self) -> Result<ApprovalReport> {
        let outcome = self
            .store
            .mark_verified_and_approved(&self.username)
            .await?;

        if outcome.matched == 0 {
            return Err(OpsError::not_found(&format!("User {}", self.username)));
        }

        info!(
            username = %self.username,
            backend = self.store.backend(),
            matched = outcome.matched,
            modified = outcome.modified,
            "Demo account verified and approved"
        );

        Ok(ApprovalReport {
            username: self.username.clone(),
            matched: outcome.matched,
            modified: outcome.modified,
        })
    }
}
