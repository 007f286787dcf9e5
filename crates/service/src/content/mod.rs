//! Generic CRUD over the site's content entities.
//!
//! Every content table is described once by a [`Resource`] impl (see
//! [`resources`]); list, lookup, create and update are written a single time
//! against that description.

pub mod resources;

use chrono::Utc;
use models::errors::ModelError;
use models::validation::Validate;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, FromQueryResult, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;

pub use resources::{BlogPosts, CaseStudies, Services, Stats, Testimonials};

/// How a record is addressed in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Slug,
    Id,
}

/// Public reads see visible records only; admin reads see everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Public,
    Admin,
}

type ColumnOf<R> = <<R as Resource>::Entity as EntityTrait>::Column;

/// Description of one content table.
pub trait Resource: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model, ActiveModel = Self::ActiveModel>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Serialize
        + Clone
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync;
    type Input: Validate + DeserializeOwned + Send;

    /// Singular name used in messages and metrics.
    const NAME: &'static str;
    const KEY: KeyKind;

    fn key_column() -> ColumnOf<Self>;
    /// Flag gating public visibility, if any.
    fn visibility_column() -> Option<ColumnOf<Self>>;
    /// Listing order, most significant first.
    fn order_by() -> Vec<ColumnOf<Self>>;

    /// Natural key a create payload would occupy (slug-keyed resources).
    fn new_key(input: &Self::Input) -> Option<String>;
    /// Natural key an update payload moves the record to, if it changes it.
    fn changed_key(input: &Self::Input) -> Option<String>;
    fn key_of(model: &Self::Model) -> String;

    fn build(input: Self::Input, now: DateTimeWithTimeZone) -> Result<Self::ActiveModel, ModelError>;
    fn apply(input: Self::Input, am: &mut Self::ActiveModel, current: &Self::Model, now: DateTimeWithTimeZone);
}

fn invalid(e: ModelError) -> ServiceError {
    match e {
        ModelError::Invalid(fields) => ServiceError::Invalid(fields),
        other => ServiceError::Model(other),
    }
}

fn scoped<R: Resource>(mut q: Select<R::Entity>, scope: Scope) -> Select<R::Entity> {
    if scope == Scope::Public {
        if let Some(col) = R::visibility_column() {
            q = q.filter(col.eq(true));
        }
    }
    q
}

fn keyed<R: Resource>(q: Select<R::Entity>, key: &str) -> Option<Select<R::Entity>> {
    match R::KEY {
        KeyKind::Slug => Some(q.filter(R::key_column().eq(key.to_string()))),
        KeyKind::Id => Uuid::parse_str(key).ok().map(|id| q.filter(R::key_column().eq(id))),
    }
}

/// All records of `R` visible in `scope`, in display order.
pub async fn list<R: Resource>(db: &DatabaseConnection, scope: Scope) -> Result<Vec<R::Model>, ServiceError> {
    let mut q = scoped::<R>(R::Entity::find(), scope);
    for col in R::order_by() {
        q = q.order_by_asc(col);
    }
    Ok(q.all(db).await?)
}

/// One record by slug or id. A malformed id is simply absent.
pub async fn find<R: Resource>(
    db: &DatabaseConnection,
    key: &str,
    scope: Scope,
) -> Result<Option<R::Model>, ServiceError> {
    match keyed::<R>(scoped::<R>(R::Entity::find(), scope), key) {
        Some(q) => Ok(q.one(db).await?),
        None => Ok(None),
    }
}

pub async fn get<R: Resource>(db: &DatabaseConnection, key: &str, scope: Scope) -> Result<R::Model, ServiceError> {
    find::<R>(db, key, scope)
        .await?
        .ok_or_else(|| ServiceError::not_found(R::NAME))
}

async fn ensure_key_free<R: Resource>(db: &DatabaseConnection, key: &str) -> Result<(), ServiceError> {
    if find::<R>(db, key, Scope::Admin).await?.is_some() {
        return Err(ServiceError::Conflict(format!("{} with key '{}' already exists", R::NAME, key)));
    }
    Ok(())
}

/// Validate and insert. A taken natural key is a conflict and leaves the
/// existing record untouched.
#[instrument(skip(db, input), fields(entity = R::NAME))]
pub async fn create<R: Resource>(db: &DatabaseConnection, input: R::Input) -> Result<R::Model, ServiceError> {
    input.check(true).map_err(invalid)?;
    if let Some(key) = R::new_key(&input) {
        ensure_key_free::<R>(db, &key).await?;
    }
    let am = R::build(input, Utc::now().into()).map_err(invalid)?;
    let created = am.insert(db).await.map_err(|e| ServiceError::from_write(R::NAME, e))?;
    common::metrics::CONTENT_WRITES.with_label_values(&[R::NAME, "create"]).inc();
    info!(service = "content", event = "created", entity = R::NAME, key = %R::key_of(&created));
    Ok(created)
}

/// Apply a partial update to the record at `key`; absent fields are kept.
#[instrument(skip(db, input), fields(entity = R::NAME))]
pub async fn update<R: Resource>(
    db: &DatabaseConnection,
    key: &str,
    input: R::Input,
) -> Result<R::Model, ServiceError> {
    input.check(false).map_err(invalid)?;
    let current = get::<R>(db, key, Scope::Admin).await?;
    if let Some(next) = R::changed_key(&input) {
        if next != R::key_of(&current) {
            ensure_key_free::<R>(db, &next).await?;
        }
    }
    let mut am = current.clone().into_active_model();
    R::apply(input, &mut am, &current, Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::from_write(R::NAME, e))?;
    common::metrics::CONTENT_WRITES.with_label_values(&[R::NAME, "update"]).inc();
    info!(service = "content", event = "updated", entity = R::NAME, key = %R::key_of(&updated));
    Ok(updated)
}

pub async fn count<R: Resource>(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    Ok(R::Entity::find().count(db).await?)
}

#[cfg(test)]
mod tests;
