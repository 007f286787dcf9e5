use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness payload for `/api/health`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok".into(), timestamp: Utc::now() }
    }
}

/// Store reachability payload for `/api/health/database`.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub status: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseHealth {
    pub fn connected(services_count: u64) -> Self {
        Self { status: "ok".into(), database: "connected".into(), services_count: Some(services_count), error: None }
    }

    pub fn disconnected() -> Self {
        Self {
            status: "error".into(),
            database: "disconnected".into(),
            services_count: None,
            error: Some("Database connection failed".into()),
        }
    }
}
