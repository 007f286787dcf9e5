use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};
use crate::validation::{Checker, Field, Validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonials")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Role of the person quoted.
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub quote: String,
    pub company: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialInput {
    pub name: Field<String>,
    pub title: Field<String>,
    pub quote: Field<String>,
    pub company: Field<String>,
    pub is_active: Field<bool>,
}

impl Validate for TestimonialInput {
    fn validate_create(&self) -> Vec<FieldError> {
        Checker::creating()
            .text("name", &self.name)
            .text("title", &self.title)
            .text("quote", &self.quote)
            .max_len("name", &self.name, 255)
            .max_len("title", &self.title, 255)
            .max_len("company", &self.company, 255)
            .not_null("isActive", &self.is_active)
            .finish()
    }

    fn validate_patch(&self) -> Vec<FieldError> {
        Checker::patching()
            .text("name", &self.name)
            .text("title", &self.title)
            .text("quote", &self.quote)
            .max_len("name", &self.name, 255)
            .max_len("title", &self.title, 255)
            .max_len("company", &self.company, 255)
            .not_null("isActive", &self.is_active)
            .finish()
    }
}

impl TestimonialInput {
    pub fn into_active_model(self, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        Ok(ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name.require("name")?),
            title: Set(self.title.require("title")?),
            quote: Set(self.quote.require("quote")?),
            company: Set(self.company.into_option()),
            is_active: Set(self.is_active.into_option().unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    pub fn apply_to(self, am: &mut ActiveModel, now: DateTimeWithTimeZone) {
        self.name.apply(&mut am.name);
        self.title.apply(&mut am.title);
        self.quote.apply(&mut am.quote);
        self.company.apply_nullable(&mut am.company);
        self.is_active.apply(&mut am.is_active);
        am.updated_at = Set(now);
    }
}
