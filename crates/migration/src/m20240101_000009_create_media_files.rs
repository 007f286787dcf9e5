//! Create `media_files` table describing files stored in the upload directory.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaFiles::Table)
                    .if_not_exists()
                    .col(uuid(MediaFiles::Id).primary_key())
                    .col(string_len(MediaFiles::FileName, 255).unique_key().not_null())
                    .col(string_len(MediaFiles::OriginalName, 255).not_null())
                    .col(string_len(MediaFiles::MimeType, 128).not_null())
                    .col(big_integer(MediaFiles::Size).not_null())
                    .col(string_len(MediaFiles::Url, 512).not_null())
                    .col(timestamp_with_time_zone(MediaFiles::UploadedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MediaFiles::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MediaFiles { Table, Id, FileName, OriginalName, MimeType, Size, Url, UploadedAt }
