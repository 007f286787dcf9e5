use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Leads: admin listing filters by form type
        manager
            .create_index(
                Index::create()
                    .name("idx_leads_form_type")
                    .table(Leads::Table)
                    .col(Leads::FormType)
                    .to_owned(),
            )
            .await?;

        // BlogPosts: public listing filters on is_published
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_published")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::IsPublished)
                    .to_owned(),
            )
            .await?;

        // Stats: ordered listing
        manager
            .create_index(
                Index::create()
                    .name("idx_stats_order")
                    .table(Stats::Table)
                    .col(Stats::Order)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_leads_form_type").table(Leads::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_blog_posts_published").table(BlogPosts::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_stats_order").table(Stats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Leads { Table, FormType }

#[derive(DeriveIden)]
enum BlogPosts { Table, IsPublished }

#[derive(DeriveIden)]
enum Stats { Table, Order }
