use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blood Bank Service API",
        version = "1.0.0",
        description = "Users, donation requests and blog posts for blood-donation coordination.\n\n**Authentication:** `POST /jwt` sets an HTTP-only `token` cookie; endpoints marked with `cookie_auth` require it."
    ),
    paths(
        // Auth
        crate::api::auth::issue_session,
        crate::api::auth::logout,

        // Users
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::save_user,
        crate::api::users::list_users,

        // Donation requests
        crate::api::requests::create_request,
        crate::api::requests::update_donation,
        crate::api::requests::get_request,
        crate::api::requests::list_requests,
        crate::api::requests::my_donations,
        crate::api::requests::my_requests,

        // Blogs
        crate::api::blogs::create_blog,
        crate::api::blogs::update_blog,
        crate::api::blogs::list_blogs,

        // Health & Metrics
        crate::api::health::index,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::api::auth::SessionResponse,
            crate::api::health::HealthResponse,
            crate::models::WriteAck,
            crate::models::InsertAck,
            crate::models::DonationUpdate,
            crate::models::DonationStatus,
        )
    ),
    tags(
        (name = "Auth", description = "Session cookie issue and removal."),
        (name = "Users", description = "User profiles keyed by email."),
        (name = "Donation Requests", description = "Blood donation requests and donor assignment."),
        (name = "Blogs", description = "Blog posts."),
        (name = "Health", description = "Liveness, health and metrics."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    crate::services::session_service::SESSION_COOKIE,
                ))),
            );
        }
    }
}
