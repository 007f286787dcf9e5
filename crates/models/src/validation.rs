//! Input validation shared by every content entity.
//!
//! Write payloads are partial: each field is either absent, explicitly `null`
//! or carries a value. [`Field`] keeps those three states apart so updates
//! only touch what the client actually sent.

use sea_orm::ActiveValue::{self, Set};
use serde::{Deserialize, Deserializer};

use crate::errors::{FieldError, ModelError};

/// A field of a write payload. Use with `#[serde(default)]` so absent keys
/// become [`Field::Missing`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(d)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Missing => Field::Missing,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)),
        }
    }

    /// Required value for an insert; validation has already rejected absence.
    pub fn require(self, field: &str) -> Result<T, ModelError> {
        self.into_option()
            .ok_or_else(|| ModelError::Invalid(vec![FieldError::new(field, "is required")]))
    }
}

impl<T> Field<T>
where
    T: Into<sea_orm::Value>,
{
    /// Overwrite a NOT NULL column when a value was sent.
    pub fn apply(self, target: &mut ActiveValue<T>) {
        if let Field::Value(v) = self {
            *target = Set(v);
        }
    }
}

impl<T> Field<T>
where
    T: Into<sea_orm::Value> + sea_orm::sea_query::Nullable,
{
    /// Overwrite a nullable column: a value sets it, an explicit null clears it.
    pub fn apply_nullable(self, target: &mut ActiveValue<Option<T>>) {
        match self {
            Field::Missing => {}
            Field::Null => *target = Set(None),
            Field::Value(v) => *target = Set(Some(v)),
        }
    }
}

/// Integer field that also accepts a numeric string (`"3"`), as older admin
/// clients sent display order as text.
pub fn lenient_i32<'de, D: Deserializer<'de>>(d: D) -> Result<Field<i32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrText {
        Int(i32),
        Text(String),
    }
    match Option::<IntOrText>::deserialize(d)? {
        None => Ok(Field::Null),
        Some(IntOrText::Int(n)) => Ok(Field::Value(n)),
        Some(IntOrText::Text(s)) => s
            .trim()
            .parse::<i32>()
            .map(Field::Value)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: {s:?}"))),
    }
}

/// Validation of a write payload, once for creation and once for a patch.
pub trait Validate {
    fn validate_create(&self) -> Vec<FieldError>;
    fn validate_patch(&self) -> Vec<FieldError>;

    fn check(&self, creating: bool) -> Result<(), ModelError> {
        let errors = if creating { self.validate_create() } else { self.validate_patch() };
        if errors.is_empty() { Ok(()) } else { Err(ModelError::Invalid(errors)) }
    }
}

/// Width of the varchar slug columns.
pub const SLUG_MAX_LEN: usize = 255;

/// Accumulates field errors so a client sees every problem at once.
#[derive(Debug)]
pub struct Checker {
    creating: bool,
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn creating() -> Self {
        Self { creating: true, errors: Vec::new() }
    }

    pub fn patching() -> Self {
        Self { creating: false, errors: Vec::new() }
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    /// NOT NULL text column: must be present on create, never null, never blank.
    pub fn text(&mut self, field: &str, value: &Field<String>) -> &mut Self {
        match value {
            Field::Missing if self.creating => self.push(field, "is required"),
            Field::Null => self.push(field, "must not be null"),
            Field::Value(v) if v.trim().is_empty() => self.push(field, "must not be blank"),
            _ => {}
        }
        self
    }

    /// Column with a default: may be omitted but never null.
    pub fn not_null<T>(&mut self, field: &str, value: &Field<T>) -> &mut Self {
        if matches!(value, Field::Null) {
            self.push(field, "must not be null");
        }
        self
    }

    /// Slug when sent; on create a missing slug is derived by the caller.
    pub fn slug(&mut self, field: &str, value: &Field<String>) -> &mut Self {
        match value {
            Field::Null if !self.creating => self.push(field, "must not be null"),
            Field::Value(v) if !is_valid_slug(v) => {
                self.push(field, "must be lowercase letters, digits and single hyphens")
            }
            _ => {}
        }
        self.max_len(field, value, SLUG_MAX_LEN)
    }

    /// Bounded column: a sent value may not exceed `max` characters.
    pub fn max_len(&mut self, field: &str, value: &Field<String>, max: usize) -> &mut Self {
        self.max_len_opt(field, value.value().map(String::as_str), max)
    }

    pub fn max_len_opt(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.push(field, &format!("must be at most {max} characters"));
        }
        self
    }

    /// Create-time check that a slug can be obtained from `slug` or `title`.
    pub fn derivable_slug(&mut self, slug: &Field<String>, title: &Field<String>) -> &mut Self {
        if self.creating && slug.value().is_none() {
            if let Some(t) = title.value().filter(|t| !t.trim().is_empty()) {
                let derived = slugify(t);
                if derived.is_empty() {
                    self.push("slug", "could not be derived from title");
                } else if derived.chars().count() > SLUG_MAX_LEN {
                    self.push("slug", "derived from title is too long; send a shorter slug");
                }
            }
        }
        self
    }

    pub fn finish(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.errors)
    }
}

/// `^[a-z0-9]+(-[a-z0-9]+)*$`
pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && s.split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}

/// Lowercase, whitespace runs to `-`, anything else non-alphanumeric dropped.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.trim().chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = !out.is_empty();
        } else if c.is_ascii_alphanumeric() {
            if pending_dash {
                out.push('-');
                pending_dash = false;
            }
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// Slug sent by the client, or one derived from the title.
pub fn effective_slug(slug: &Field<String>, title: &Field<String>) -> Option<String> {
    match slug {
        Field::Value(s) => Some(s.clone()),
        _ => title.value().map(|t| slugify(t)).filter(|s| !s.is_empty()),
    }
}
