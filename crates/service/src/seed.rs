//! Bulk load of starter content from a JSON document.
//!
//! Slug-keyed records already present are skipped; testimonials and stats are
//! only loaded into an empty table, so running a seed twice is harmless.

use models::validation::Field;
use models::{case_studies::CaseStudyInput, services::ServiceInput, stats::StatInput, testimonials::TestimonialInput};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::content::{self, CaseStudies, Resource, Scope, Services, Stats, Testimonials};
use crate::errors::ServiceError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedDocument {
    pub services: Vec<ServiceInput>,
    pub case_studies: Vec<CaseStudyInput>,
    pub testimonials: Vec<TestimonialInput>,
    pub stats: Vec<StatInput>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedCount {
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub services: SeedCount,
    pub case_studies: SeedCount,
    pub testimonials: SeedCount,
    pub stats: SeedCount,
}

async fn seed_keyed<R: Resource>(db: &DatabaseConnection, items: Vec<R::Input>) -> Result<SeedCount, ServiceError> {
    let mut count = SeedCount::default();
    for item in items {
        if let Some(key) = R::new_key(&item) {
            if content::find::<R>(db, &key, Scope::Admin).await?.is_some() {
                count.skipped += 1;
                continue;
            }
        }
        match content::create::<R>(db, item).await {
            Ok(_) => count.inserted += 1,
            Err(ServiceError::Conflict(msg)) => {
                warn!(service = "seed", entity = R::NAME, %msg, "skipping duplicate");
                count.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(count)
}

async fn seed_if_empty<R: Resource>(db: &DatabaseConnection, items: Vec<R::Input>) -> Result<SeedCount, ServiceError> {
    if content::count::<R>(db).await? > 0 {
        return Ok(SeedCount { inserted: 0, skipped: items.len() });
    }
    let mut count = SeedCount::default();
    for item in items {
        content::create::<R>(db, item).await?;
        count.inserted += 1;
    }
    Ok(count)
}

/// Load `doc` through the regular create path so every record is validated.
pub async fn seed(db: &DatabaseConnection, doc: SeedDocument) -> Result<SeedReport, ServiceError> {
    let stats = doc
        .stats
        .into_iter()
        .enumerate()
        .map(|(i, mut s)| {
            if s.order.is_missing() {
                s.order = Field::Value(i as i32);
            }
            s
        })
        .collect();

    let report = SeedReport {
        services: seed_keyed::<Services>(db, doc.services).await?,
        case_studies: seed_keyed::<CaseStudies>(db, doc.case_studies).await?,
        testimonials: seed_if_empty::<Testimonials>(db, doc.testimonials).await?,
        stats: seed_if_empty::<Stats>(db, stats).await?,
    };
    info!(service = "seed", event = "done", report = ?report);
    Ok(report)
}
