use crate::{models::TaskRecord, Error, Result};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use todo_core::{NewTask, Task, TaskStore, TaskUpdate};

const TASK_COLUMNS: &str = "id, title, description, completed, created_at";

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create new database connection pool. The database file is created if missing.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        if is_private_memory_url(database_url) {
            return Self::in_memory().await;
        }
        if database_url.contains("mode=memory") {
            return Err(Error::Connection(format!(
                "named in-memory databases are not supported ({database_url}); use sqlite::memory:"
            )));
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| Error::Connection(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::debug!("Connected to {}", database_url);

        Ok(Self { pool })
    }

    /// Private in-memory database. Each SQLite connection to `:memory:` sees
    /// its own database, so the pool is pinned to a single connection that
    /// never expires.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { pool })
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT DEFAULT '',
                completed BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Schema(e.to_string()))?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================================================================
    // Task Operations
    // ========================================================================
    //
    // Each operation holds one pooled connection for its duration; the
    // connection returns to the pool when `conn` drops.

    /// Insert task. `id` and `created_at` come from the database.
    pub async fn insert_task(&self, new_task: &NewTask) -> Result<TaskRecord> {
        let mut conn = self.pool.acquire().await?;

        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            "INSERT INTO tasks (title, description, completed) VALUES (?1, ?2, ?3) RETURNING {TASK_COLUMNS}"
        ))
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(new_task.completed)
        .fetch_one(&mut *conn)
        .await?;

        Ok(record)
    }

    /// List tasks in insertion order
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        let mut conn = self.pool.acquire().await?;

        let records = sqlx::query_as::<_, TaskRecord>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY id ASC"
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(records)
    }

    /// Get task by ID
    pub async fn fetch_task(&self, task_id: i64) -> Result<Option<TaskRecord>> {
        let mut conn = self.pool.acquire().await?;

        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"
        ))
        .bind(task_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(record)
    }

    /// Apply a partial update in one statement. NULL parameters keep the
    /// current column value.
    pub async fn update_task(&self, task_id: i64, changes: &TaskUpdate) -> Result<Option<TaskRecord>> {
        if changes.is_empty() {
            return self.fetch_task(task_id).await;
        }

        let mut conn = self.pool.acquire().await?;

        let record = sqlx::query_as::<_, TaskRecord>(&format!(
            r#"
            UPDATE tasks SET
                title = COALESCE(?1, title),
                description = COALESCE(?2, description),
                completed = COALESCE(?3, completed)
            WHERE id = ?4
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.completed)
        .bind(task_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(record)
    }

    /// Delete task, returning whether a row was removed
    pub async fn delete_task(&self, task_id: i64) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(task_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for Database {
    async fn create(&self, new_task: NewTask) -> todo_core::Result<Task> {
        let record = self.insert_task(&new_task).await?;
        tracing::debug!("Inserted task {}", record.id);
        Ok(record.into())
    }

    async fn get_all(&self) -> todo_core::Result<Vec<Task>> {
        let records = self.list_tasks().await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> todo_core::Result<Option<Task>> {
        Ok(self.fetch_task(id).await?.map(Task::from))
    }

    async fn update(&self, id: i64, changes: TaskUpdate) -> todo_core::Result<Option<Task>> {
        let record = self.update_task(id, &changes).await?;
        if record.is_some() {
            tracing::debug!("Updated task {}", id);
        }
        Ok(record.map(Task::from))
    }

    async fn delete(&self, id: i64) -> todo_core::Result<bool> {
        Ok(self.delete_task(id).await?)
    }
}

fn is_private_memory_url(database_url: &str) -> bool {
    database_url
        .trim_start_matches("sqlite:")
        .trim_start_matches("//")
        == ":memory:"
}
