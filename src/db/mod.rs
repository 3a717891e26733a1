//! Data access for users, sessions and tasks.
//!
//! `Database` is the only type that issues SQL. Its methods are grouped by
//! table in the submodules; every task and session mutation takes the owning
//! user's id and filters on it.

mod sessions;
mod tasks;
mod users;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Handle to the relational store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the database at `url`. Foreign keys are on.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// A private in-memory database with the schema applied.
    ///
    /// Each SQLite in-memory connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn connect_in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Applies the embedded migrations under `migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes every connection; later queries fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;

    #[actix_rt::test]
    async fn test_schema_rejects_unknown_priority() {
        let db = Database::connect_in_memory().await.unwrap();
        let user = db
            .create_user("alice", "alice@example.com", "digest")
            .await
            .unwrap();

        let result = sqlx::query(
            "INSERT INTO tasks (user_id, title, priority, created_at, updated_at)
             VALUES (?, 'bad', 'urgent', '2024-01-01', '2024-01-01')",
        )
        .bind(user.id)
        .execute(&db.pool)
        .await;
        assert!(result.is_err());

        let task = db
            .insert_task(user.id, "ok", None, TaskPriority::Low)
            .await
            .unwrap();
        assert_eq!(task.priority, TaskPriority::Low);
    }

    #[actix_rt::test]
    async fn test_task_and_session_require_existing_user() {
        let db = Database::connect_in_memory().await.unwrap();

        let result = db.insert_task(42, "orphan", None, TaskPriority::Medium).await;
        assert!(result.is_err());

        let result = db
            .insert_session(42, "orphan-token", chrono::Utc::now())
            .await;
        assert!(result.is_err());
    }

    #[actix_rt::test]
    async fn test_deleting_user_cascades() {
        let db = Database::connect_in_memory().await.unwrap();
        let user = db
            .create_user("bob", "bob@example.com", "digest")
            .await
            .unwrap();
        db.insert_task(user.id, "one", None, TaskPriority::High)
            .await
            .unwrap();
        db.insert_session(
            user.id,
            "bob-token",
            chrono::Utc::now() + chrono::Duration::days(1),
        )
        .await
        .unwrap();

        assert!(db.delete_user(user.id).await.unwrap());

        assert!(db.list_tasks(user.id).await.unwrap().is_empty());
        assert!(db.find_session("bob-token").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_closed_pool_reports_errors() {
        let db = Database::connect_in_memory().await.unwrap();
        db.close().await;

        let result = db.find_user_by_id(1).await;
        assert!(matches!(result, Err(sqlx::Error::PoolClosed)));
    }
}
