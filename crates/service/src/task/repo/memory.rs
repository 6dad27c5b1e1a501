use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use models::task::{NewTask, TaskChanges};
use tokio::sync::Mutex;

use crate::errors::ServiceError;
use crate::task::domain::Task;
use crate::task::repository::TaskRepository;

struct TaskTable {
    tasks: BTreeMap<i32, Task>,
    next_id: i32,
}

impl Default for TaskTable {
    fn default() -> Self {
        Self { tasks: BTreeMap::new(), next_id: 1 }
    }
}

/// Process-local task store.
///
/// The table and the id counter sit behind one mutex, so ids stay unique
/// under concurrent creates.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    inner: Mutex<TaskTable>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self, user_id: i32) -> Result<Vec<Task>, ServiceError> {
        let table = self.inner.lock().await;
        Ok(table.tasks.values().filter(|t| t.user_id == user_id).cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Task>, ServiceError> {
        let table = self.inner.lock().await;
        Ok(table.tasks.get(&id).cloned())
    }

    async fn create(&self, new: NewTask) -> Result<Task, ServiceError> {
        let mut table = self.inner.lock().await;
        let id = table.next_id;
        table.next_id += 1;

        let now = Utc::now();
        let task = Task {
            id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            completed: new.completed,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };
        table.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: i32, changes: TaskChanges) -> Result<Task, ServiceError> {
        let mut table = self.inner.lock().await;
        let task = table.tasks.get_mut(&id).ok_or_else(|| ServiceError::not_found("task"))?;

        if let Some(title) = changes.title { task.title = title; }
        if let Some(description) = changes.description { task.description = description; }
        if let Some(due_date) = changes.due_date { task.due_date = Some(due_date); }
        if let Some(completed) = changes.completed { task.completed = completed; }
        task.updated_at = Utc::now().max(task.created_at);
        Ok(task.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let mut table = self.inner.lock().await;
        Ok(table.tasks.remove(&id).is_some())
    }
}
