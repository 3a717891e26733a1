use chrono::Utc;

use super::Database;
use crate::models::{User, UserRecord};

impl Database {
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, username, email, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// Includes the password digest, for credential checks.
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, username, email, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Removes the account; its sessions and tasks go with it via `ON DELETE CASCADE`.
    pub async fn delete_user(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_create_and_find_user() {
        let db = Database::connect_in_memory().await.unwrap();
        let user = db
            .create_user("alice", "alice@example.com", "digest")
            .await
            .unwrap();

        let by_name = db.find_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        assert_eq!(by_name.password_hash, "digest");

        let by_email = db.find_user_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email, Some(user.clone()));

        let by_id = db.find_user_by_id(user.id).await.unwrap();
        assert_eq!(by_id, Some(user));

        assert!(db.find_user_by_username("nobody").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_username_and_email_are_unique() {
        let db = Database::connect_in_memory().await.unwrap();
        db.create_user("alice", "alice@example.com", "digest")
            .await
            .unwrap();

        let same_name = db
            .create_user("alice", "other@example.com", "digest")
            .await
            .unwrap_err();
        assert!(same_name
            .as_database_error()
            .is_some_and(|e| e.is_unique_violation()));

        let same_email = db
            .create_user("other", "alice@example.com", "digest")
            .await
            .unwrap_err();
        assert!(same_email
            .as_database_error()
            .is_some_and(|e| e.is_unique_violation()));
    }
}
