//! Create `case_studies` table. `results` holds `[{value, metric}]` as JSON.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseStudies::Table)
                    .if_not_exists()
                    .col(uuid(CaseStudies::Id).primary_key())
                    .col(string_len(CaseStudies::Slug, 255).unique_key().not_null())
                    .col(text(CaseStudies::Title).not_null())
                    .col(text(CaseStudies::Description).not_null())
                    .col(string_len(CaseStudies::Category, 128).not_null())
                    .col(string_len(CaseStudies::Date, 64).not_null())
                    .col(ColumnDef::new(CaseStudies::Results).json().null())
                    .col(ColumnDef::new(CaseStudies::Challenge).text().null())
                    .col(ColumnDef::new(CaseStudies::Solution).text().null())
                    .col(ColumnDef::new(CaseStudies::Outcome).text().null())
                    .col(boolean(CaseStudies::IsPublished).not_null().default(true))
                    .col(timestamp_with_time_zone(CaseStudies::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(CaseStudies::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CaseStudies::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CaseStudies {
    Table,
    Id,
    Slug,
    Title,
    Description,
    Category,
    Date,
    Results,
    Challenge,
    Solution,
    Outcome,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}
