//! Create `stats` table; `order` drives display order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stats::Table)
                    .if_not_exists()
                    .col(uuid(Stats::Id).primary_key())
                    .col(string_len(Stats::Value, 64).not_null())
                    .col(text(Stats::Description).not_null())
                    .col(integer(Stats::Order).not_null().default(0))
                    .col(boolean(Stats::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(Stats::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Stats::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Stats::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Stats { Table, Id, Value, Description, Order, IsActive, CreatedAt, UpdatedAt }
