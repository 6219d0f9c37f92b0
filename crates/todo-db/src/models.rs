use chrono::{DateTime, Utc};
use sqlx::FromRow;
use todo_core::Task;

#[derive(Debug, Clone, FromRow)]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Task {
            id: record.id,
            title: record.title,
            description: record.description,
            completed: record.completed,
            created_at: record.created_at,
        }
    }
}
