use serde_json::json;

use super::*;
use crate::test_support::get_db;

fn input<R: Resource>(v: serde_json::Value) -> R::Input {
    serde_json::from_value(v).expect("payload")
}

#[tokio::test]
async fn public_list_hides_inactive_admin_sees_all() -> anyhow::Result<()> {
    let db = get_db().await?;
    create::<Services>(&db, input::<Services>(json!({"slug": "a", "title": "A", "description": "d"}))).await?;
    create::<Services>(
        &db,
        input::<Services>(json!({"slug": "b", "title": "B", "description": "d", "isActive": false})),
    )
    .await?;

    let public = list::<Services>(&db, Scope::Public).await?;
    assert_eq!(public.iter().map(|s| s.slug.as_str()).collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(list::<Services>(&db, Scope::Admin).await?.len(), 2);

    assert!(find::<Services>(&db, "b", Scope::Public).await?.is_none());
    assert!(find::<Services>(&db, "b", Scope::Admin).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn duplicate_slug_is_conflict_and_first_unchanged() -> anyhow::Result<()> {
    let db = get_db().await?;
    let first =
        create::<Services>(&db, input::<Services>(json!({"slug": "x", "title": "First", "description": "d"}))).await?;
    let err = create::<Services>(&db, input::<Services>(json!({"slug": "x", "title": "Second", "description": "d"})))
        .await
        .expect_err("conflict");
    assert!(matches!(err, ServiceError::Conflict(_)));

    let stored = get::<Services>(&db, "x", Scope::Admin).await?;
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.title, "First");
    Ok(())
}

#[tokio::test]
async fn update_keeps_absent_fields_and_restamps() -> anyhow::Result<()> {
    let db = get_db().await?;
    let created = create::<CaseStudies>(
        &db,
        input::<CaseStudies>(json!({
            "title": "Rebrand for Acme", "description": "d", "category": "Branding", "date": "2024",
            "results": [{"value": "+40%", "metric": "Leads"}], "challenge": "c"
        })),
    )
    .await?;
    assert_eq!(created.slug, "rebrand-for-acme");

    let updated = update::<CaseStudies>(&db, "rebrand-for-acme", input::<CaseStudies>(json!({"outcome": "o"}))).await?;
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.results, created.results);
    assert_eq!(updated.challenge.as_deref(), Some("c"));
    assert_eq!(updated.outcome.as_deref(), Some("o"));
    assert!(updated.updated_at >= created.updated_at);
    Ok(())
}

#[tokio::test]
async fn update_to_taken_slug_conflicts() -> anyhow::Result<()> {
    let db = get_db().await?;
    for slug in ["one", "two"] {
        create::<BlogPosts>(
            &db,
            input::<BlogPosts>(json!({"slug": slug, "title": "t", "excerpt": "e", "content": "c", "category": "k"})),
        )
        .await?;
    }
    let err = update::<BlogPosts>(&db, "two", input::<BlogPosts>(json!({"slug": "one"}))).await.expect_err("taken");
    assert!(matches!(err, ServiceError::Conflict(_)));

    // keeping its own slug is fine
    update::<BlogPosts>(&db, "two", input::<BlogPosts>(json!({"slug": "two", "title": "T"}))).await?;
    Ok(())
}

#[tokio::test]
async fn missing_and_malformed_keys_are_not_found() -> anyhow::Result<()> {
    let db = get_db().await?;
    assert!(find::<Testimonials>(&db, "not-a-uuid", Scope::Admin).await?.is_none());
    let err = update::<Stats>(&db, &uuid::Uuid::new_v4().to_string(), input::<Stats>(json!({"value": "1"})))
        .await
        .expect_err("missing");
    assert!(matches!(err, ServiceError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn invalid_payload_lists_fields() -> anyhow::Result<()> {
    let db = get_db().await?;
    let err = create::<Testimonials>(&db, input::<Testimonials>(json!({"name": "Jo"}))).await.expect_err("invalid");
    match err {
        ServiceError::Invalid(fields) => {
            let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
            assert_eq!(names, vec!["title", "quote"]);
        }
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn testimonial_flag_toggles_freely() -> anyhow::Result<()> {
    let db = get_db().await?;
    let t = create::<Testimonials>(&db, input::<Testimonials>(json!({"name": "Jo", "title": "CEO", "quote": "Great"})))
        .await?;
    let id = t.id.to_string();
    update::<Testimonials>(&db, &id, input::<Testimonials>(json!({"isActive": false}))).await?;
    assert!(find::<Testimonials>(&db, &id, Scope::Public).await?.is_none());
    update::<Testimonials>(&db, &id, input::<Testimonials>(json!({"isActive": true}))).await?;
    assert!(find::<Testimonials>(&db, &id, Scope::Public).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn stats_listed_by_order() -> anyhow::Result<()> {
    let db = get_db().await?;
    create::<Stats>(&db, input::<Stats>(json!({"value": "second", "description": "d", "order": 2}))).await?;
    create::<Stats>(&db, input::<Stats>(json!({"value": "first", "description": "d", "order": 1}))).await?;
    let values: Vec<_> = list::<Stats>(&db, Scope::Public).await?.into_iter().map(|s| s.value).collect();
    assert_eq!(values, vec!["first", "second"]);
    Ok(())
}

#[tokio::test]
async fn blog_create_published_is_stamped() -> anyhow::Result<()> {
    let db = get_db().await?;
    let post = create::<BlogPosts>(
        &db,
        input::<BlogPosts>(json!({
            "title": "Launch", "excerpt": "e", "content": "c", "category": "News", "isPublished": true
        })),
    )
    .await?;
    assert!(post.published_at.is_some());
    assert_eq!(count::<BlogPosts>(&db).await?, 1);
    Ok(())
}
