//! Create `leads` table. Unknown submitted fields land in `metadata`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(uuid(Leads::Id).primary_key())
                    .col(ColumnDef::new(Leads::Name).string_len(255).null())
                    .col(string_len(Leads::Email, 320).not_null())
                    .col(ColumnDef::new(Leads::Company).string_len(255).null())
                    .col(ColumnDef::new(Leads::Service).string_len(255).null())
                    .col(ColumnDef::new(Leads::Budget).string_len(128).null())
                    .col(ColumnDef::new(Leads::Message).text().null())
                    .col(string_len(Leads::FormType, 32).not_null())
                    .col(ColumnDef::new(Leads::Resource).string_len(255).null())
                    .col(ColumnDef::new(Leads::Metadata).json().null())
                    .col(timestamp_with_time_zone(Leads::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Leads::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    Name,
    Email,
    Company,
    Service,
    Budget,
    Message,
    FormType,
    Resource,
    Metadata,
    CreatedAt,
}
