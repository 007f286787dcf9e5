//! [`Resource`] descriptions of the five content tables.

use models::errors::ModelError;
use models::{blog_posts, case_studies, services, stats, testimonials};
use sea_orm::entity::prelude::DateTimeWithTimeZone;

use super::{KeyKind, Resource};

pub struct Services;
pub struct CaseStudies;
pub struct BlogPosts;
pub struct Testimonials;
pub struct Stats;

impl Resource for Services {
    type Entity = services::Entity;
    type Model = services::Model;
    type ActiveModel = services::ActiveModel;
    type Input = services::ServiceInput;

    const NAME: &'static str = "service";
    const KEY: KeyKind = KeyKind::Slug;

    fn key_column() -> services::Column { services::Column::Slug }
    fn visibility_column() -> Option<services::Column> { Some(services::Column::IsActive) }
    fn order_by() -> Vec<services::Column> { vec![services::Column::CreatedAt] }

    fn new_key(input: &Self::Input) -> Option<String> { input.slug() }
    fn changed_key(input: &Self::Input) -> Option<String> { input.slug.value().cloned() }
    fn key_of(model: &Self::Model) -> String { model.slug.clone() }

    fn build(input: Self::Input, now: DateTimeWithTimeZone) -> Result<Self::ActiveModel, ModelError> {
        input.into_active_model(now)
    }

    fn apply(input: Self::Input, am: &mut Self::ActiveModel, _current: &Self::Model, now: DateTimeWithTimeZone) {
        input.apply_to(am, now)
    }
}

impl Resource for CaseStudies {
    type Entity = case_studies::Entity;
    type Model = case_studies::Model;
    type ActiveModel = case_studies::ActiveModel;
    type Input = case_studies::CaseStudyInput;

    const NAME: &'static str = "case study";
    const KEY: KeyKind = KeyKind::Slug;

    fn key_column() -> case_studies::Column { case_studies::Column::Slug }
    fn visibility_column() -> Option<case_studies::Column> { Some(case_studies::Column::IsPublished) }
    fn order_by() -> Vec<case_studies::Column> { vec![case_studies::Column::CreatedAt] }

    fn new_key(input: &Self::Input) -> Option<String> { input.slug() }
    fn changed_key(input: &Self::Input) -> Option<String> { input.slug.value().cloned() }
    fn key_of(model: &Self::Model) -> String { model.slug.clone() }

    fn build(input: Self::Input, now: DateTimeWithTimeZone) -> Result<Self::ActiveModel, ModelError> {
        input.into_active_model(now)
    }

    fn apply(input: Self::Input, am: &mut Self::ActiveModel, _current: &Self::Model, now: DateTimeWithTimeZone) {
        input.apply_to(am, now)
    }
}

impl Resource for BlogPosts {
    type Entity = blog_posts::Entity;
    type Model = blog_posts::Model;
    type ActiveModel = blog_posts::ActiveModel;
    type Input = blog_posts::BlogPostInput;

    const NAME: &'static str = "blog post";
    const KEY: KeyKind = KeyKind::Slug;

    fn key_column() -> blog_posts::Column { blog_posts::Column::Slug }
    fn visibility_column() -> Option<blog_posts::Column> { Some(blog_posts::Column::IsPublished) }
    fn order_by() -> Vec<blog_posts::Column> { vec![blog_posts::Column::CreatedAt] }

    fn new_key(input: &Self::Input) -> Option<String> { input.slug() }
    fn changed_key(input: &Self::Input) -> Option<String> { input.slug.value().cloned() }
    fn key_of(model: &Self::Model) -> String { model.slug.clone() }

    fn build(input: Self::Input, now: DateTimeWithTimeZone) -> Result<Self::ActiveModel, ModelError> {
        input.into_active_model(now)
    }

    fn apply(input: Self::Input, am: &mut Self::ActiveModel, current: &Self::Model, now: DateTimeWithTimeZone) {
        input.apply_to(am, current, now)
    }
}

impl Resource for Testimonials {
    type Entity = testimonials::Entity;
    type Model = testimonials::Model;
    type ActiveModel = testimonials::ActiveModel;
    type Input = testimonials::TestimonialInput;

    const NAME: &'static str = "testimonial";
    const KEY: KeyKind = KeyKind::Id;

    fn key_column() -> testimonials::Column { testimonials::Column::Id }
    fn visibility_column() -> Option<testimonials::Column> { Some(testimonials::Column::IsActive) }
    fn order_by() -> Vec<testimonials::Column> { vec![testimonials::Column::CreatedAt] }

    fn new_key(_: &Self::Input) -> Option<String> { None }
    fn changed_key(_: &Self::Input) -> Option<String> { None }
    fn key_of(model: &Self::Model) -> String { model.id.to_string() }

    fn build(input: Self::Input, now: DateTimeWithTimeZone) -> Result<Self::ActiveModel, ModelError> {
        input.into_active_model(now)
    }

    fn apply(input: Self::Input, am: &mut Self::ActiveModel, _current: &Self::Model, now: DateTimeWithTimeZone) {
        input.apply_to(am, now)
    }
}

impl Resource for Stats {
    type Entity = stats::Entity;
    type Model = stats::Model;
    type ActiveModel = stats::ActiveModel;
    type Input = stats::StatInput;

    const NAME: &'static str = "stat";
    const KEY: KeyKind = KeyKind::Id;

    fn key_column() -> stats::Column { stats::Column::Id }
    fn visibility_column() -> Option<stats::Column> { Some(stats::Column::IsActive) }
    fn order_by() -> Vec<stats::Column> { vec![stats::Column::Order, stats::Column::CreatedAt] }

    fn new_key(_: &Self::Input) -> Option<String> { None }
    fn changed_key(_: &Self::Input) -> Option<String> { None }
    fn key_of(model: &Self::Model) -> String { model.id.to_string() }

    fn build(input: Self::Input, now: DateTimeWithTimeZone) -> Result<Self::ActiveModel, ModelError> {
        input.into_active_model(now)
    }

    fn apply(input: Self::Input, am: &mut Self::ActiveModel, _current: &Self::Model, now: DateTimeWithTimeZone) {
        input.apply_to(am, now)
    }
}
