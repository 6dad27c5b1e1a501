use async_trait::async_trait;
use models::task::{NewTask, TaskChanges};

use super::domain::Task;
use crate::errors::ServiceError;

/// Storage abstraction behind the task endpoints.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks owned by `user_id`, oldest first.
    async fn list(&self, user_id: i32) -> Result<Vec<Task>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Task>, ServiceError>;
    /// Assigns the id and sets `created_at == updated_at`.
    async fn create(&self, new: NewTask) -> Result<Task, ServiceError>;
    /// Fails with [`ServiceError::NotFound`] when `id` is unknown.
    async fn update(&self, id: i32, changes: TaskChanges) -> Result<Task, ServiceError>;
    /// Returns whether the task existed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}
