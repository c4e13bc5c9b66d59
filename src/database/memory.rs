use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{UpdateOutcome, UserStore};
use crate::error::Result;

/// Approval flags of one stored user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFlags {
    pub is_email_verified: bool,
    pub is_approved: bool,
}

/// In-process users store keyed by username
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<String, UserFlags>,
    writes: AtomicU64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user with the given flags
    pub fn insert(&self, username: impl Into<String>, flags: UserFlags) {
        self.users.insert(username.into(), flags);
    }

    pub fn get(&self, username: &str) -> Option<UserFlags> {
        self.users.get(username).map(|entry| *entry)
    }

    /// Number of writes performed through the store
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn mark_verified_and_approved(&self, username: &str) -> Result<UpdateOutcome> {
        let Some(mut entry) = self.users.get_mut(username) else {
            return Ok(UpdateOutcome::default());
        };

        let approved = UserFlags {
            is_email_verified: true,
            is_approved: true,
        };
        let modified = if *entry == approved {
            0
        } else {
            *entry = approved;
            self.writes.fetch_add(1, Ordering::SeqCst);
            1
        };

        Ok(UpdateOutcome {
            matched: 1,
            modified,
        })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn close(&self) {}
}
