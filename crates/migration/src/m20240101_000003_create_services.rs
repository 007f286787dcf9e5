//! Create `services` table. `key_features` is a JSON string list.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(uuid(Services::Id).primary_key())
                    .col(string_len(Services::Slug, 255).unique_key().not_null())
                    .col(text(Services::Title).not_null())
                    .col(text(Services::Description).not_null())
                    .col(ColumnDef::new(Services::LongDescription).text().null())
                    .col(ColumnDef::new(Services::KeyFeatures).json().null())
                    .col(boolean(Services::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(Services::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Services::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Services::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Slug,
    Title,
    Description,
    LongDescription,
    KeyFeatures,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
