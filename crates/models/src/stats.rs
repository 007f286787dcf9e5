//! Headline figures ("150+ brands launched"), shown in `order`.

use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};
use crate::validation::{lenient_i32, Checker, Field, Validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stats")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub value: String,
    pub description: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatInput {
    pub value: Field<String>,
    pub description: Field<String>,
    #[serde(deserialize_with = "lenient_i32")]
    pub order: Field<i32>,
    pub is_active: Field<bool>,
}

impl Validate for StatInput {
    fn validate_create(&self) -> Vec<FieldError> {
        Checker::creating()
            .text("value", &self.value)
            .text("description", &self.description)
            .max_len("value", &self.value, 64)
            .not_null("order", &self.order)
            .not_null("isActive", &self.is_active)
            .finish()
    }

    fn validate_patch(&self) -> Vec<FieldError> {
        Checker::patching()
            .text("value", &self.value)
            .text("description", &self.description)
            .max_len("value", &self.value, 64)
            .not_null("order", &self.order)
            .not_null("isActive", &self.is_active)
            .finish()
    }
}

impl StatInput {
    pub fn into_active_model(self, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        Ok(ActiveModel {
            id: Set(Uuid::new_v4()),
            value: Set(self.value.require("value")?),
            description: Set(self.description.require("description")?),
            order: Set(self.order.into_option().unwrap_or(0)),
            is_active: Set(self.is_active.into_option().unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    pub fn apply_to(self, am: &mut ActiveModel, now: DateTimeWithTimeZone) {
        self.value.apply(&mut am.value);
        self.description.apply(&mut am.description);
        self.order.apply(&mut am.order);
        self.is_active.apply(&mut am.is_active);
        am.updated_at = Set(now);
    }
}
