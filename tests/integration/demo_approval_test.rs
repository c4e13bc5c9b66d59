//! Demo-account approval against in-memory and live stores.
//!
//! Live tests are ignored by default; run them with `cargo test -- --ignored`
//! after pointing TEST_DATABASE_URL / TEST_MONGODB_URI at a disposable database.

use petwellness_ops::database::memory::UserFlags;
use petwellness_ops::database::{MemoryUserStore, UserStore};
use petwellness_ops::error::ErrorKind;
use petwellness_ops::services::DemoAccountApproval;
use std::sync::Arc;

fn approval_for(store: Arc<MemoryUserStore>, username: &str) -> DemoAccountApproval {
    DemoAccountApproval::new(store, username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_existing_user_is_verified_and_approved() {
        let store = Arc::new(MemoryUserStore::new());
        store.insert("demo_user", UserFlags::default());

        let report = approval_for(store.clone(), "demo_user").approve().await.unwrap();

        assert_eq!(report.username, "demo_user");
        assert_eq!(report.matched, 1);
        assert_eq!(report.modified, 1);
        let flags = store.get("demo_user").unwrap();
        assert!(flags.is_email_verified);
        assert!(flags.is_approved);
    }

    #[tokio::test]
    async fn test_partially_approved_user_is_completed() {
        let store = Arc::new(MemoryUserStore::new());
        store.insert(
            "demo_user",
            UserFlags {
                is_email_verified: true,
                is_approved: false,
            },
        );

        approval_for(store.clone(), "demo_user").approve().await.unwrap();

        assert!(store.get("demo_user").unwrap().is_approved);
    }

    #[tokio::test]
    async fn test_running_twice_is_idempotent() {
        let store = Arc::new(MemoryUserStore::new());
        store.insert("demo_user", UserFlags::default());
        let approval = approval_for(store.clone(), "demo_user");

        let first = approval.approve().await.unwrap();
        let after_first = store.get("demo_user");
        let second = approval.approve().await.unwrap();

        assert!(!first.was_already_approved());
        assert!(second.was_already_approved());
        assert_eq!(second.matched, 1);
        assert_eq!(store.get("demo_user"), after_first);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_missing_user_reports_not_found_without_writing() {
        let store = Arc::new(MemoryUserStore::new());
        store.insert("someone_else", UserFlags::default());

        let err = approval_for(store.clone(), "demo_user")
            .approve()
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("demo_user"));
        assert_eq!(store.writes(), 0);
        assert_eq!(store.get("someone_else"), Some(UserFlags::default()));
    }

    #[tokio::test]
    async fn test_other_users_untouched() {
        let store = Arc::new(MemoryUserStore::new());
        store.insert("demo_user", UserFlags::default());
        store.insert("vet_admin", UserFlags::default());

        approval_for(store.clone(), "demo_user").approve().await.unwrap();

        assert_eq!(store.get("vet_admin"), Some(UserFlags::default()));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL pointing at a disposable PostgreSQL database"]
    async fn test_postgres_store_round_trip() {
        use petwellness_ops::database::PgUserStore;
        use sqlx::PgPool;

        let database_url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
        let pool = PgPool::connect(&database_url).await.expect("Failed to connect to test database");

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                is_email_verified BOOLEAN,
                is_approved BOOLEAN
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        let username = format!("demo_user_{}", std::process::id());
        sqlx::query("INSERT INTO users (username, is_email_verified, is_approved) VALUES ($1, FALSE, NULL)")
            .bind(&username)
            .execute(&pool)
            .await
            .unwrap();

        let store: Arc<dyn UserStore> = Arc::new(PgUserStore::from_pool(pool.clone()));
        let approval = DemoAccountApproval::new(store.clone(), username.clone());

        let first = approval.approve().await.unwrap();
        let second = approval.approve().await.unwrap();
        assert_eq!((first.matched, first.modified), (1, 1));
        assert_eq!((second.matched, second.modified), (1, 0));

        let missing = DemoAccountApproval::new(store.clone(), format!("{}_missing", username))
            .approve()
            .await
            .unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let (verified, approved): (bool, bool) =
            sqlx::query_as("SELECT is_email_verified, is_approved FROM users WHERE username = $1")
                .bind(&username)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(verified && approved);

        let _ = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(&username)
            .execute(&pool)
            .await;
        store.close().await;
    }

    #[tokio::test]
    #[ignore = "requires TEST_MONGODB_URI pointing at a disposable MongoDB deployment"]
    async fn test_mongo_store_round_trip() {
        use mongodb::bson::{doc, Document};
        use petwellness_ops::database::MongoUserStore;

        let uri = std::env::var("TEST_MONGODB_URI").expect("TEST_MONGODB_URI must be set");
        let username = format!("demo_user_{}", std::process::id());

        let client = mongodb::Client::with_uri_str(&uri).await.unwrap();
        let users = client
            .database("PetWellnessTest")
            .collection::<Document>("users");
        users
            .insert_one(doc! { "username": username.as_str(), "isEmailVerified": false, "isApproved": false })
            .await
            .unwrap();

        let store: Arc<dyn UserStore> = Arc::new(
            MongoUserStore::connect(&uri, "PetWellnessTest", "users")
                .await
                .unwrap(),
        );
        let approval = DemoAccountApproval::new(store.clone(), username.clone());

        let first = approval.approve().await.unwrap();
        let second = approval.approve().await.unwrap();
        assert_eq!((first.matched, first.modified), (1, 1));
        assert_eq!((second.matched, second.modified), (1, 0));

        let stored = users
            .find_one(doc! { "username": username.as_str() })
            .await
            .unwrap()
            .unwrap();
        assert!(stored.get_bool("isEmailVerified").unwrap());
        assert!(stored.get_bool("isApproved").unwrap());

        let _ = users.delete_one(doc! { "username": username.as_str() }).await;
        store.close().await;
    }
}
