use crate::leads::{is_plausible_email, FormType, LeadInput};
use crate::services::ServiceInput;
use crate::case_studies::CaseStudyInput;
use crate::stats::StatInput;
use crate::testimonials::TestimonialInput;
use crate::validation::Validate;

fn fields(errors: Vec<crate::errors::FieldError>) -> Vec<String> {
    errors.into_iter().map(|e| e.field).collect()
}

#[test]
fn service_create_lists_missing_fields() {
    let input: ServiceInput = serde_json::from_str(r#"{"slug": "ok"}"#).unwrap();
    assert_eq!(fields(input.validate_create()), vec!["title", "description"]);
}

#[test]
fn service_patch_rejects_null_required_field() {
    let input: ServiceInput = serde_json::from_str(r#"{"title": null}"#).unwrap();
    assert_eq!(fields(input.validate_patch()), vec!["title"]);
}

#[test]
fn service_slug_format_enforced() {
    let input: ServiceInput =
        serde_json::from_str(r#"{"slug": "Not A Slug", "title": "t", "description": "d"}"#).unwrap();
    assert_eq!(fields(input.validate_create()), vec!["slug"]);
}

#[test]
fn untitled_symbols_cannot_produce_a_slug() {
    let input: ServiceInput = serde_json::from_str(r#"{"title": "???", "description": "d"}"#).unwrap();
    assert_eq!(fields(input.validate_create()), vec!["slug"]);
}

#[test]
fn case_study_results_need_both_parts() {
    let input: CaseStudyInput = serde_json::from_value(serde_json::json!({
        "title": "t", "description": "d", "category": "c", "date": "2024",
        "results": [{"value": "", "metric": "Reach"}]
    }))
    .unwrap();
    assert_eq!(fields(input.validate_create()), vec!["results"]);
}

#[test]
fn wrong_type_is_a_decode_error() {
    assert!(serde_json::from_str::<ServiceInput>(r#"{"isActive": "yes"}"#).is_err());
}

#[test]
fn form_types_parse_with_alias() {
    assert_eq!("contact".parse::<FormType>(), Ok(FormType::Contact));
    assert_eq!("lead-magnet".parse::<FormType>(), Ok(FormType::LeadMagnet));
    assert_eq!("lead_magnet".parse::<FormType>(), Ok(FormType::LeadMagnet));
    assert!("webinar".parse::<FormType>().is_err());
}

#[test]
fn lead_requires_plausible_email_and_known_form() {
    let input: LeadInput = serde_json::from_str(r#"{"email": "nope", "formType": "x"}"#).unwrap();
    assert_eq!(fields(input.validate_create()), vec!["email", "formType"]);
    assert!(is_plausible_email("jane@studio.io"));
    assert!(!is_plausible_email("@studio.io"));
    assert!(!is_plausible_email("jane@"));
}

#[test]
fn values_wider_than_their_column_are_rejected() {
    let stat: StatInput = serde_json::from_value(serde_json::json!({
        "value": "9".repeat(65), "description": "d"
    }))
    .unwrap();
    assert_eq!(fields(stat.validate_create()), vec!["value"]);

    let testimonial: TestimonialInput = serde_json::from_value(serde_json::json!({
        "name": "n".repeat(300), "title": "CTO", "quote": "q"
    }))
    .unwrap();
    assert_eq!(fields(testimonial.validate_create()), vec!["name"]);
    assert_eq!(fields(testimonial.validate_patch()), vec!["name"]);

    let at_limit: StatInput = serde_json::from_value(serde_json::json!({"value": "9".repeat(64)})).unwrap();
    assert!(at_limit.validate_patch().is_empty());
}

#[test]
fn overlong_slugs_are_rejected() {
    let sent: ServiceInput = serde_json::from_value(serde_json::json!({
        "slug": "a".repeat(256), "title": "t", "description": "d"
    }))
    .unwrap();
    assert_eq!(fields(sent.validate_create()), vec!["slug"]);

    let derived: ServiceInput = serde_json::from_value(serde_json::json!({
        "title": "word ".repeat(60), "description": "d"
    }))
    .unwrap();
    assert_eq!(fields(derived.validate_create()), vec!["slug"]);
}

#[test]
fn overlong_lead_fields_are_rejected() {
    let input: LeadInput = serde_json::from_value(serde_json::json!({
        "email": "a@b.co", "formType": "contact", "budget": "$".repeat(129)
    }))
    .unwrap();
    assert_eq!(fields(input.validate_create()), vec!["budget"]);
}
