#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with all migrations applied. Each call is an
/// isolated database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_memory().await?;
    crate::runtime::migrate(&db).await?;
    Ok(db)
}
