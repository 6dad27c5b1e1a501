//! Create `task` table.
//!
//! Integer ids are assigned by the database; `user_id` is a plain column, no FK.
//! `title` is unbounded text so every store accepts the same titles.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

pub(crate) fn task_table() -> TableCreateStatement {
    Table::create()
        .table(Task::Table)
        .if_not_exists()
        .col(pk_auto(Task::Id))
        .col(text(Task::Title).not_null())
        .col(text(Task::Description).not_null())
        .col(ColumnDef::new(Task::DueDate).date().null())
        .col(boolean(Task::Completed).not_null())
        .col(integer(Task::UserId).not_null())
        .col(timestamp_with_time_zone(Task::CreatedAt).not_null())
        .col(timestamp_with_time_zone(Task::UpdatedAt).not_null())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(task_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Task::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Task { Table, Id, Title, Description, DueDate, Completed, UserId, CreatedAt, UpdatedAt }
