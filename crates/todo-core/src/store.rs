use crate::{NewTask, Result, Task, TaskUpdate};
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Persistence boundary for tasks.
///
/// Lookups that miss return `None`/`false`; only storage failures are errors.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task, assigning its id and creation timestamp.
    async fn create(&self, new_task: NewTask) -> Result<Task>;

    /// All tasks in ascending id order.
    async fn get_all(&self) -> Result<Vec<Task>>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Task>>;

    /// Apply a partial update and return the resulting task.
    async fn update(&self, id: i64, changes: TaskUpdate) -> Result<Option<Task>>;

    /// Remove a task, reporting whether it existed.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[derive(Default)]
struct Inner {
    tasks: BTreeMap<i64, Task>,
    last_id: i64,
}

/// Process-local store. Ids are never reused, matching an AUTOINCREMENT table.
#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, new_task: NewTask) -> Result<Task> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let task = Task {
            id: inner.last_id,
            title: new_task.title,
            description: Some(new_task.description),
            completed: new_task.completed,
            // Same resolution as the SQL column default
            created_at: Utc::now().trunc_subsecs(3),
        };
        inner.tasks.insert(task.id, task.clone());

        tracing::debug!("Created task: {} ({})", task.title, task.id);

        Ok(task)
    }

    async fn get_all(&self) -> Result<Vec<Task>> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: TaskUpdate) -> Result<Option<Task>> {
        let mut inner = self.inner.write().await;

        let Some(task) = inner.tasks.get_mut(&id) else {
            return Ok(None);
        };
        *task = changes.apply(task);

        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.tasks.remove(&id).is_some())
    }
}
