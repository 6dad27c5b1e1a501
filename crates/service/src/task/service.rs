use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{CreateTaskInput, Task, UpdateTaskInput, DEFAULT_USER_ID};
use super::repository::TaskRepository;
use crate::errors::ServiceError;

/// Task business service, independent of the web framework and of the store.
///
/// `userId` is taken from the request as-is; nothing ties it to the caller.
pub struct TaskService<R: TaskRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: TaskRepository + ?Sized> TaskService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Tasks of `user_id`, defaulting to user 1.
    pub async fn list(&self, user_id: Option<i32>) -> Result<Vec<Task>, ServiceError> {
        self.repo.list(user_id.unwrap_or(DEFAULT_USER_ID)).await
    }

    pub async fn get(&self, id: i32) -> Result<Task, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("task"))
    }

    #[instrument(skip(self, input), fields(user_id = ?input.user_id))]
    pub async fn create(&self, input: CreateTaskInput) -> Result<Task, ServiceError> {
        let new = input.into_new_task()?;
        let task = self.repo.create(new).await?;
        info!(task_id = task.id, user_id = task.user_id, "task_created");
        Ok(task)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateTaskInput) -> Result<Task, ServiceError> {
        let changes = input.into_changes()?;
        let task = self.repo.update(id, changes).await?;
        info!(task_id = task.id, completed = task.completed, "task_updated");
        Ok(task)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? {
            info!(task_id = id, "task_deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found("task"))
        }
    }
}
