//! Blog posts. Drafts by default; publishing stamps `published_at` once.

use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};
use crate::types::StringList;
use crate::validation::{effective_slug, Checker, Field, Validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_posts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub tags: Option<StringList>,
    pub read_time: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPostInput {
    pub slug: Field<String>,
    pub title: Field<String>,
    pub excerpt: Field<String>,
    pub content: Field<String>,
    pub category: Field<String>,
    pub tags: Field<Vec<String>>,
    pub read_time: Field<String>,
    pub is_published: Field<bool>,
    pub published_at: Field<DateTimeWithTimeZone>,
}

impl Validate for BlogPostInput {
    fn validate_create(&self) -> Vec<FieldError> {
        Checker::creating()
            .slug("slug", &self.slug)
            .derivable_slug(&self.slug, &self.title)
            .text("title", &self.title)
            .text("excerpt", &self.excerpt)
            .text("content", &self.content)
            .text("category", &self.category)
            .max_len("category", &self.category, 128)
            .max_len("readTime", &self.read_time, 64)
            .not_null("isPublished", &self.is_published)
            .finish()
    }

    fn validate_patch(&self) -> Vec<FieldError> {
        Checker::patching()
            .slug("slug", &self.slug)
            .text("title", &self.title)
            .text("excerpt", &self.excerpt)
            .text("content", &self.content)
            .text("category", &self.category)
            .max_len("category", &self.category, 128)
            .max_len("readTime", &self.read_time, 64)
            .not_null("isPublished", &self.is_published)
            .finish()
    }
}

impl BlogPostInput {
    pub fn slug(&self) -> Option<String> {
        effective_slug(&self.slug, &self.title)
    }

    pub fn into_active_model(self, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        let slug = self.slug().ok_or_else(|| ModelError::Validation("slug required".into()))?;
        let is_published = self.is_published.into_option().unwrap_or(false);
        let published_at = match self.published_at.into_option() {
            Some(at) => Some(at),
            None if is_published => Some(now),
            None => None,
        };
        Ok(ActiveModel {
            id: Set(Uuid::new_v4()),
            slug: Set(slug),
            title: Set(self.title.require("title")?),
            excerpt: Set(self.excerpt.require("excerpt")?),
            content: Set(self.content.require("content")?),
            category: Set(self.category.require("category")?),
            tags: Set(self.tags.into_option().map(StringList)),
            read_time: Set(self.read_time.into_option()),
            is_published: Set(is_published),
            published_at: Set(published_at),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    /// `current` is the stored row; publishing a post that never had a
    /// `published_at` stamps it unless the payload carries one.
    pub fn apply_to(self, am: &mut ActiveModel, current: &Model, now: DateTimeWithTimeZone) {
        let publishing = self.is_published.value() == Some(&true);
        let stamp = publishing && self.published_at.is_missing() && current.published_at.is_none();

        self.slug.apply(&mut am.slug);
        self.title.apply(&mut am.title);
        self.excerpt.apply(&mut am.excerpt);
        self.content.apply(&mut am.content);
        self.category.apply(&mut am.category);
        self.tags.map(StringList).apply_nullable(&mut am.tags);
        self.read_time.apply_nullable(&mut am.read_time);
        self.is_published.apply(&mut am.is_published);
        self.published_at.apply_nullable(&mut am.published_at);
        if stamp {
            am.published_at = Set(Some(now));
        }
        am.updated_at = Set(now);
    }
}
