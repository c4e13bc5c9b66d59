use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};
use tracing::{debug, info};

use super::{UpdateOutcome, UserStore};
use crate::error::Result;

/// Document users store on MongoDB
#[derive(Clone)]
pub struct MongoUserStore {
    client: Client,
    users: Collection<Document>,
}

impl MongoUserStore {
    /// Build a client for `uri` and bind the users collection.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let users = client.database(database).collection::<Document>(collection);

        info!(database = %database, collection = %collection, "MongoDB client ready");
        Ok(Self { client, users })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn mark_verified_and_approved(&self, username: &str) -> Result<UpdateOutcome> {
        debug!(username = %username, "Updating users document");

        let result = self
            .users
            .update_one(
                doc! { "username": username },
                doc! { "$set": { "isEmailVerified": true, "isApproved": true } },
            )
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}
