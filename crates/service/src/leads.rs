//! Lead capture from the public forms and the admin listing.

use chrono::Utc;
use models::leads::{self, FormType, LeadInput};
use models::validation::Validate;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{info, instrument};

use crate::errors::ServiceError;

/// Validate and persist a submission.
#[instrument(skip(db, input))]
pub async fn capture(db: &DatabaseConnection, input: LeadInput) -> Result<leads::Model, ServiceError> {
    let errors = input.validate_create();
    if !errors.is_empty() {
        return Err(ServiceError::Invalid(errors));
    }
    let form_type = input.form_type().ok_or_else(|| ServiceError::invalid("formType", "is required"))?;
    let lead = input
        .into_active_model(form_type, Utc::now().into())
        .insert(db)
        .await
        .map_err(|e| ServiceError::from_write("lead", e))?;
    common::metrics::LEADS_CAPTURED.with_label_values(&[form_type.as_str()]).inc();
    info!(service = "leads", event = "captured", lead_id = %lead.id, form_type = %form_type);
    Ok(lead)
}

/// All leads, oldest first, optionally restricted to one form type.
pub async fn list(db: &DatabaseConnection, form_type: Option<&str>) -> Result<Vec<leads::Model>, ServiceError> {
    let mut q = leads::Entity::find().order_by_asc(leads::Column::CreatedAt);
    if let Some(raw) = form_type {
        let ft: FormType = raw.parse().map_err(|m: String| ServiceError::invalid("formType", m))?;
        q = q.filter(leads::Column::FormType.eq(ft.as_str()));
    }
    Ok(q.all(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    fn lead(v: serde_json::Value) -> LeadInput {
        serde_json::from_value(v).unwrap()
    }

    #[tokio::test]
    async fn captured_leads_are_listed_and_filtered() -> anyhow::Result<()> {
        let db = get_db().await?;
        capture(&db, lead(json!({
            "name": "Jane", "email": "jane@acme.io", "company": "Acme", "service": "Branding",
            "budget": "10k", "message": "Hi", "formType": "contact"
        })))
        .await?;
        capture(&db, lead(json!({"email": "news@acme.io", "formType": "newsletter"}))).await?;
        capture(&db, lead(json!({"email": "dl@acme.io", "formType": "lead-magnet", "resource": "Brand Guide"}))).await?;

        let all = list(&db, None).await?;
        assert_eq!(all.len(), 3);
        let contact = list(&db, Some("contact")).await?;
        assert_eq!(contact.len(), 1);
        let c = &contact[0];
        assert_eq!(c.name.as_deref(), Some("Jane"));
        assert_eq!(c.company.as_deref(), Some("Acme"));
        assert_eq!(c.service.as_deref(), Some("Branding"));
        assert_eq!(c.budget.as_deref(), Some("10k"));
        assert_eq!(c.message.as_deref(), Some("Hi"));

        let magnets = list(&db, Some("lead_magnet")).await?;
        assert_eq!(magnets.len(), 1);
        assert_eq!(magnets[0].resource.as_deref(), Some("Brand Guide"));
        Ok(())
    }

    #[tokio::test]
    async fn bad_submissions_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        let err = capture(&db, lead(json!({"formType": "contact"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref f) if f[0].field == "email"));
        let err = capture(&db, lead(json!({"email": "a@b.c", "formType": "survey"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref f) if f[0].field == "formType"));
        assert!(list(&db, Some("survey")).await.is_err());
        assert!(list(&db, None).await?.is_empty());
        Ok(())
    }
}
