use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::media::MediaStore;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub media: Arc<MediaStore>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: AuthConfig, media: MediaStore) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        Self { db, auth: Arc::new(AuthService::new(repo, auth)), media: Arc::new(media) }
    }
}
