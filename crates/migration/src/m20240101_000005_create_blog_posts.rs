//! Create `blog_posts` table; drafts by default.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(uuid(BlogPosts::Id).primary_key())
                    .col(string_len(BlogPosts::Slug, 255).unique_key().not_null())
                    .col(text(BlogPosts::Title).not_null())
                    .col(text(BlogPosts::Excerpt).not_null())
                    .col(text(BlogPosts::Content).not_null())
                    .col(string_len(BlogPosts::Category, 128).not_null())
                    .col(ColumnDef::new(BlogPosts::Tags).json().null())
                    .col(ColumnDef::new(BlogPosts::ReadTime).string_len(64).null())
                    .col(boolean(BlogPosts::IsPublished).not_null().default(false))
                    .col(
                        ColumnDef::new(BlogPosts::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(BlogPosts::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(BlogPosts::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BlogPosts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Slug,
    Title,
    Excerpt,
    Content,
    Category,
    Tags,
    ReadTime,
    IsPublished,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
