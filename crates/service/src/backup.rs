//! Content export used by the admin backup download.

use chrono::{DateTime, Utc};
use models::{blog_posts, case_studies, services, stats, testimonials};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::content::{self, BlogPosts, CaseStudies, Scope, Services, Stats, Testimonials};
use crate::errors::ServiceError;

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub services: Vec<services::Model>,
    pub case_studies: Vec<case_studies::Model>,
    pub blog_posts: Vec<blog_posts::Model>,
    pub testimonials: Vec<testimonials::Model>,
    pub stats: Vec<stats::Model>,
}

#[derive(Debug, Serialize)]
pub struct ContentExport {
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub data: ExportData,
}

/// Snapshot of every content record, visible or not.
pub async fn export(db: &DatabaseConnection) -> Result<ContentExport, ServiceError> {
    let data = ExportData {
        services: content::list::<Services>(db, Scope::Admin).await?,
        case_studies: content::list::<CaseStudies>(db, Scope::Admin).await?,
        blog_posts: content::list::<BlogPosts>(db, Scope::Admin).await?,
        testimonials: content::list::<Testimonials>(db, Scope::Admin).await?,
        stats: content::list::<Stats>(db, Scope::Admin).await?,
    };
    Ok(ContentExport { timestamp: Utc::now(), version: EXPORT_VERSION, data })
}
