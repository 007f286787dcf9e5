
/// Payload parsing and validation of the write inputs
pub mod input_tests;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with every migration applied.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::db::connect_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
