//! Consultancy service offerings, addressed by slug.

use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};
use crate::types::StringList;
use crate::validation::{effective_slug, Checker, Field, Validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub long_description: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub key_features: Option<StringList>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create/update payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceInput {
    pub slug: Field<String>,
    pub title: Field<String>,
    pub description: Field<String>,
    pub long_description: Field<String>,
    pub key_features: Field<Vec<String>>,
    pub is_active: Field<bool>,
}

impl Validate for ServiceInput {
    fn validate_create(&self) -> Vec<FieldError> {
        Checker::creating()
            .slug("slug", &self.slug)
            .derivable_slug(&self.slug, &self.title)
            .text("title", &self.title)
            .text("description", &self.description)
            .not_null("isActive", &self.is_active)
            .finish()
    }

    fn validate_patch(&self) -> Vec<FieldError> {
        Checker::patching()
            .slug("slug", &self.slug)
            .text("title", &self.title)
            .text("description", &self.description)
            .not_null("isActive", &self.is_active)
            .finish()
    }
}

impl ServiceInput {
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
            long_description: Set(self.long_description.into_option()),
            key_features: Set(self.key_features.into_option().map(StringList)),
            is_active: Set(self.is_active.into_option().unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    pub fn apply_to(self, am: &mut ActiveModel, now: DateTimeWithTimeZone) {
        self.slug.apply(&mut am.slug);
        self.title.apply(&mut am.title);
        self.description.apply(&mut am.description);
        self.long_description.apply_nullable(&mut am.long_description);
        self.key_features.map(StringList).apply_nullable(&mut am.key_features);
        self.is_active.apply(&mut am.is_active);
        am.updated_at = Set(now);
    }
}
