use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub timestamp: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealthDoc { pub status: String, pub database: String, pub services_count: Option<u64>, pub error: Option<String> }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    /// A message, or a list of `{field, message}`
    pub details: Option<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct SuccessDoc { pub success: bool, pub message: Option<String> }

#[derive(ToSchema)]
pub struct LoginRequestDoc { pub username: String, pub password: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDoc { pub token: String, pub token_type: String, pub expires_at: String, pub message: String }

#[derive(ToSchema)]
pub struct ClaimsDoc { pub sub: String, pub uid: String, pub iat: i64, pub exp: i64 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDoc {
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub key_features: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(ToSchema)]
pub struct ResultMetricDoc { pub value: String, pub metric: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyDoc {
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    #[schema(value_type = Option<Vec<ResultMetricDoc>>)]
    pub results: Option<serde_json::Value>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub outcome: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDoc {
    pub slug: Option<String>,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Option<Vec<String>>,
    pub read_time: Option<String>,
    pub is_published: Option<bool>,
    pub published_at: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialDoc { pub name: String, pub title: String, pub quote: String, pub company: Option<String>, pub is_active: Option<bool> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatDoc { pub value: String, pub description: String, pub order: Option<i32>, pub is_active: Option<bool> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequestDoc {
    pub email: String,
    /// contact, newsletter or lead_magnet
    pub form_type: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
    pub resource: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadDoc {
    pub id: Uuid,
    pub email: String,
    pub form_type: String,
    pub name: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct UploadRequestDoc {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDoc {
    pub id: Uuid,
    pub url: String,
    pub file_name: String,
    pub original_name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaFileDoc {
    pub id: Uuid,
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub url: String,
    pub uploaded_at: String,
}

/// Path docs for the generic content handlers, one module per entity.
macro_rules! content_docs {
    ($name:ident, tag = $tag:tt, list = $list:tt, item = $item:tt, admin = $admin:tt, schema = $schema:ident) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;

            #[utoipa::path(get, path = $list, tag = $tag,
                responses((status = 200, description = "Visible records", body = [$schema])))]
            pub fn list() {}

            #[utoipa::path(get, path = $item, tag = $tag,
                params(("key" = String, Path, description = "Record key")),
                responses((status = 200, description = "OK", body = $schema), (status = 404, description = "Not Found", body = ErrorDoc)))]
            pub fn get() {}

            #[utoipa::path(post, path = $list, tag = $tag, request_body = $schema, security(("bearer" = [])),
                responses((status = 201, description = "Created", body = $schema),
                          (status = 400, description = "Validation Error", body = ErrorDoc),
                          (status = 401, description = "Unauthorized", body = ErrorDoc),
                          (status = 409, description = "Conflict", body = ErrorDoc)))]
            pub fn create() {}

            #[utoipa::path(put, path = $item, tag = $tag, request_body = $schema, security(("bearer" = [])),
                params(("key" = String, Path, description = "Record key")),
                responses((status = 200, description = "Updated", body = $schema),
                          (status = 400, description = "Validation Error", body = ErrorDoc),
                          (status = 404, description = "Not Found", body = ErrorDoc),
                          (status = 409, description = "Conflict", body = ErrorDoc)))]
            pub fn update() {}

            #[utoipa::path(get, path = $admin, tag = $tag, security(("bearer" = [])),
                responses((status = 200, description = "All records", body = [$schema]), (status = 401, description = "Unauthorized", body = ErrorDoc)))]
            pub fn admin_list() {}
        }
    };
}

content_docs!(services, tag = "services", list = "/api/services", item = "/api/services/{key}", admin = "/api/admin/services", schema = ServiceDoc);
content_docs!(case_studies, tag = "case-studies", list = "/api/case-studies", item = "/api/case-studies/{key}", admin = "/api/admin/case-studies", schema = CaseStudyDoc);
content_docs!(blog, tag = "blog", list = "/api/blog", item = "/api/blog/{key}", admin = "/api/admin/blog", schema = BlogPostDoc);
content_docs!(testimonials, tag = "testimonials", list = "/api/testimonials", item = "/api/testimonials/{key}", admin = "/api/admin/testimonials", schema = TestimonialDoc);
content_docs!(stats, tag = "stats", list = "/api/stats", item = "/api/stats/{key}", admin = "/api/admin/stats", schema = StatDoc);

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::database_health,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::export::export,
        crate::routes::leads::capture,
        crate::routes::leads::list,
        crate::routes::leads::list_by_type,
        crate::routes::media::upload,
        crate::routes::media::list,
        crate::routes::media::delete,
        services::list, services::get, services::create, services::update, services::admin_list,
        case_studies::list, case_studies::get, case_studies::create, case_studies::update, case_studies::admin_list,
        blog::list, blog::get, blog::create, blog::update, blog::admin_list,
        testimonials::list, testimonials::get, testimonials::create, testimonials::update, testimonials::admin_list,
        stats::list, stats::get, stats::create, stats::update, stats::admin_list,
    ),
    components(
        schemas(
            HealthResponse,
            DatabaseHealthDoc,
            ErrorDoc,
            SuccessDoc,
            LoginRequestDoc,
            LoginResponseDoc,
            ClaimsDoc,
            ServiceDoc,
            ResultMetricDoc,
            CaseStudyDoc,
            BlogPostDoc,
            TestimonialDoc,
            StatDoc,
            LeadRequestDoc,
            LeadDoc,
            UploadRequestDoc,
            UploadResponseDoc,
            MediaFileDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "admin"),
        (name = "services"),
        (name = "case-studies"),
        (name = "blog"),
        (name = "testimonials"),
        (name = "stats"),
        (name = "leads"),
        (name = "media")
    )
)]
pub struct ApiDoc;
