use async_trait::async_trait;
use models::errors::ModelError;
use models::task::{NewTask, TaskChanges};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::task::domain::Task;
use crate::task::repository::TaskRepository;

/// SeaORM-backed repository over the `task` table.
pub struct SeaOrmTaskRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl TaskRepository for SeaOrmTaskRepository {
    async fn list(&self, user_id: i32) -> Result<Vec<Task>, ServiceError> {
        let rows = models::task::list_by_user(&self.db, user_id).await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Task>, ServiceError> {
        Ok(models::task::find(&self.db, id).await?.map(Task::from))
    }

    async fn create(&self, new: NewTask) -> Result<Task, ServiceError> {
        Ok(models::task::create(&self.db, new).await?.into())
    }

    async fn update(&self, id: i32, changes: TaskChanges) -> Result<Task, ServiceError> {
        match models::task::update(&self.db, id, changes).await {
            Ok(m) => Ok(m.into()),
            Err(ModelError::NotFound(_)) => Err(ServiceError::not_found("task")),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::task::delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn task_crud_through_repository() -> Result<(), anyhow::Error> {
        let repo = SeaOrmTaskRepository::new(get_db().await?);

        let created = repo
            .create(NewTask { title: "persist me".into(), description: "d".into(), due_date: None, completed: false, user_id: 3 })
            .await?;
        assert_eq!(created.created_at, created.updated_at);

        let listed = repo.list(3).await?;
        assert_eq!(listed, vec![created.clone()]);

        let updated = repo.update(created.id, TaskChanges { title: Some("renamed".into()), ..Default::default() }).await?;
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.description, "d");

        assert!(repo.delete(created.id).await?);
        assert!(repo.get(created.id).await?.is_none());
        assert!(matches!(repo.update(created.id, TaskChanges::default()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
