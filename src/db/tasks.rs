use chrono::Utc;

use super::Database;
use crate::models::{Task, TaskPriority};

const TASK_COLUMNS: &str =
    "id, user_id, title, description, completed, priority, created_at, updated_at";

impl Database {
    pub async fn insert_task(
        &self,
        user_id: i64,
        title: &str,
        description: Option<&str>,
        priority: TaskPriority,
    ) -> Result<Task, sqlx::Error> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO tasks (user_id, title, description, completed, priority, created_at, updated_at)
             VALUES (?, ?, ?, FALSE, ?, ?, ?)
             RETURNING {}",
            TASK_COLUMNS
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .bind(title)
            .bind(description)
            .bind(priority)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
    }

    /// All tasks owned by `user_id`, newest first.
    pub async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            TASK_COLUMNS
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Returns `false` when no task with this id belongs to `user_id`.
    pub async fn set_task_completion(
        &self,
        task_id: i64,
        user_id: i64,
        completed: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET completed = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(completed)
        .bind(Utc::now())
        .bind(task_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no task with this id belongs to `user_id`.
    pub async fn delete_task(&self, task_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
