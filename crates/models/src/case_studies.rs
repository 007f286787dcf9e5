//! Client case studies with headline result metrics.

use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};
use crate::types::{ResultMetric, ResultMetrics};
use crate::validation::{effective_slug, Checker, Field, Validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "case_studies")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Display date as entered, e.g. "2024" or "March 2024".
    pub date: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub results: Option<ResultMetrics>,
    #[sea_orm(column_type = "Text", nullable)]
    pub challenge: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub solution: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub outcome: Option<String>,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseStudyInput {
    pub slug: Field<String>,
    pub title: Field<String>,
    pub description: Field<String>,
    pub category: Field<String>,
    pub date: Field<String>,
    pub results: Field<Vec<ResultMetric>>,
    pub challenge: Field<String>,
    pub solution: Field<String>,
    pub outcome: Field<String>,
    pub is_published: Field<bool>,
}

impl CaseStudyInput {
    fn check_results(&self, checker: &mut Checker) {
        if let Some(results) = self.results.value() {
            if results.iter().any(|r| r.value.trim().is_empty() || r.metric.trim().is_empty()) {
                checker.push("results", "every result needs a value and a metric");
            }
        }
    }

    pub fn slug(&self) -> Option<String> {
        effective_slug(&self.slug, &self.title)
    }

    pub fn into_active_model(self, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        let slug = self.slug().ok_or_else(|| ModelError::Validation("slug required".into()))?;
        Ok(ActiveModel {
            id: Set(Uuid::new_v4()),
            slug: Set(slug),
            title: Set(self.title.require("title")?),
            description: Set(self.description.require("description")?),
            category: Set(self.category.require("category")?),
            date: Set(self.date.require("date")?),
            results: Set(self.results.into_option().map(ResultMetrics)),
            challenge: Set(self.challenge.into_option()),
            solution: Set(self.solution.into_option()),
            outcome: Set(self.outcome.into_option()),
            is_published: Set(self.is_published.into_option().unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    pub fn apply_to(self, am: &mut ActiveModel, now: DateTimeWithTimeZone) {
        self.slug.apply(&mut am.slug);
        self.title.apply(&mut am.title);
        self.description.apply(&mut am.description);
        self.category.apply(&mut am.category);
        self.date.apply(&mut am.date);
        self.results.map(ResultMetrics).apply_nullable(&mut am.results);
        self.challenge.apply_nullable(&mut am.challenge);
        self.solution.apply_nullable(&mut am.solution);
        self.outcome.apply_nullable(&mut am.outcome);
        self.is_published.apply(&mut am.is_published);
        am.updated_at = Set(now);
    }
}

impl Validate for CaseStudyInput {
    fn validate_create(&self) -> Vec<FieldError> {
        let mut c = Checker::creating();
        c.slug("slug", &self.slug)
            .derivable_slug(&self.slug, &self.title)
            .text("title", &self.title)
            .text("description", &self.description)
            .text("category", &self.category)
            .text("date", &self.date)
            .max_len("category", &self.category, 128)
            .max_len("date", &self.date, 64)
            .not_null("isPublished", &self.is_published);
        self.check_results(&mut c);
        c.finish()
    }

    fn validate_patch(&self) -> Vec<FieldError> {
        let mut c = Checker::patching();
        c.slug("slug", &self.slug)
            .text("title", &self.title)
            .text("description", &self.description)
            .text("category", &self.category)
            .text("date", &self.date)
            .max_len("category", &self.category, 128)
            .max_len("date", &self.date, 64)
            .not_null("isPublished", &self.is_published);
        self.check_results(&mut c);
        c.finish()
    }
}
