//! Lead-form submissions. Known fields map to columns, anything else the
//! form sends is kept in `metadata`.

use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::FieldError;
use crate::validation::{Checker, Validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leads")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub company: Option<String>,
    pub service: Option<String>,
    pub budget: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub form_type: String,
    pub resource: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Which public form produced the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormType {
    Contact,
    Newsletter,
    LeadMagnet,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Contact => "contact",
            FormType::Newsletter => "newsletter",
            FormType::LeadMagnet => "lead_magnet",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contact" => Ok(FormType::Contact),
            "newsletter" => Ok(FormType::Newsletter),
            "lead_magnet" | "lead-magnet" => Ok(FormType::LeadMagnet),
            other => Err(format!("unknown form type: {other}")),
        }
    }
}

/// Lead submission as posted by the public forms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub form_type: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Non-empty local part and domain around a single `@`, no whitespace.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl Validate for LeadInput {
    fn validate_create(&self) -> Vec<FieldError> {
        let mut c = Checker::creating();
        match self.email.as_deref().map(str::trim) {
            None | Some("") => c.push("email", "is required"),
            Some(e) if !is_plausible_email(e) => c.push("email", "must be a valid email address"),
            _ => {}
        }
        match self.form_type.as_deref() {
            None => c.push("formType", "is required"),
            Some(t) if t.parse::<FormType>().is_err() => {
                c.push("formType", "must be one of contact, newsletter, lead_magnet")
            }
            _ => {}
        }
        c.max_len_opt("email", self.email.as_deref(), 320)
            .max_len_opt("name", self.name.as_deref(), 255)
            .max_len_opt("company", self.company.as_deref(), 255)
            .max_len_opt("service", self.service.as_deref(), 255)
            .max_len_opt("budget", self.budget.as_deref(), 128)
            .max_len_opt("resource", self.resource.as_deref(), 255);
        c.finish()
    }

    /// Leads are never updated.
    fn validate_patch(&self) -> Vec<FieldError> {
        Vec::new()
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl LeadInput {
    pub fn form_type(&self) -> Option<FormType> {
        self.form_type.as_deref().and_then(|t| t.parse().ok())
    }

    /// Call after [`Validate::validate_create`] passed.
    pub fn into_active_model(self, form_type: FormType, now: DateTimeWithTimeZone) -> ActiveModel {
        let metadata = if self.extra.is_empty() { None } else { Some(Value::Object(self.extra)) };
        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(non_blank(self.name)),
            email: Set(self.email.unwrap_or_default().trim().to_string()),
            company: Set(non_blank(self.company)),
            service: Set(non_blank(self.service)),
            budget: Set(non_blank(self.budget)),
            message: Set(non_blank(self.message)),
            form_type: Set(form_type.as_str().to_string()),
            resource: Set(non_blank(self.resource)),
            metadata: Set(metadata),
            created_at: Set(now),
        }
    }
}
