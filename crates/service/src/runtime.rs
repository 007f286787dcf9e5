//! Runtime environment helpers
//!
//! Thin wrappers so binaries can prepare directories and the database through
//! `service::runtime` without depending directly on `common` or `migration`.

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Ensure the upload directory exists; warn on a missing public directory.
pub async fn ensure_env(public_dir: &str, upload_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(public_dir, upload_dir).await
}

/// Apply pending schema migrations.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    migration::Migrator::up(db, None).await?;
    Ok(())
}

/// Connect with the configured pool settings and bring the schema up to date.
pub async fn connect_and_migrate(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = models::db::connect_with_config(cfg).await?;
    migrate(&db).await?;
    info!(service = "db", event = "migrated", "database schema up to date");
    Ok(db)
}
