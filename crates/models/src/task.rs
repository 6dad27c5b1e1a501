use chrono::{NaiveDate, Utc};
use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub due_date: Option<Date>,
    pub completed: bool,
    pub user_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new row; id and timestamps are filled in by [`create`].
#[derive(Clone, Debug)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub user_id: i32,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Clone, Debug, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

pub async fn create(db: &DatabaseConnection, new: NewTask) -> Result<Model, ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        title: Set(new.title),
        description: Set(new.description),
        due_date: Set(new.due_date),
        completed: Set(new.completed),
        user_id: Set(new.user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Tasks owned by `user_id`, in id order.
pub async fn list_by_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn update(db: &DatabaseConnection, id: i32, changes: TaskChanges) -> Result<Model, ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound("task".into()))?;

    let created_at = found.created_at;
    let mut am: ActiveModel = found.into();
    if let Some(title) = changes.title { am.title = Set(title); }
    if let Some(description) = changes.description { am.description = Set(description); }
    if let Some(due_date) = changes.due_date { am.due_date = Set(Some(due_date)); }
    if let Some(completed) = changes.completed { am.completed = Set(completed); }

    let now: DateTimeWithTimeZone = Utc::now().into();
    am.updated_at = Set(now.max(created_at));
    Ok(am.update(db).await?)
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
