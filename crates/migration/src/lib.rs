//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_user_credentials;
mod m20240101_000003_create_services;
mod m20240101_000004_create_case_studies;
mod m20240101_000005_create_blog_posts;
mod m20240101_000006_create_testimonials;
mod m20240101_000007_create_leads;
mod m20240101_000008_create_stats;
mod m20240101_000009_create_media_files;
mod m20240101_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_user_credentials::Migration),
            Box::new(m20240101_000003_create_services::Migration),
            Box::new(m20240101_000004_create_case_studies::Migration),
            Box::new(m20240101_000005_create_blog_posts::Migration),
            Box::new(m20240101_000006_create_testimonials::Migration),
            Box::new(m20240101_000007_create_leads::Migration),
            Box::new(m20240101_000008_create_stats::Migration),
            Box::new(m20240101_000009_create_media_files::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000010_add_indexes::Migration),
        ]
    }
}
