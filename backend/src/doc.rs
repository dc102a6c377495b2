//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API. The generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/users/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Coursehub backend API",
        description = "Course booking platform: accounts, credit packages, and bookings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::sign_up,
        crate::inbound::http::users::login,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::update_password,
        crate::inbound::http::users::list_purchases,
        crate::inbound::http::users::booking_summary,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::create_booking,
        crate::inbound::http::courses::cancel_booking,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::coaches::list_coaches,
        crate::inbound::http::coaches::coach_detail,
        crate::inbound::http::coaches::promote_to_coach,
        crate::inbound::http::credit_packages::list_packages,
        crate::inbound::http::credit_packages::create_package,
        crate::inbound::http::credit_packages::buy_package,
        crate::inbound::http::credit_packages::delete_package,
        crate::inbound::http::skills::list_skills,
        crate::inbound::http::skills::create_skill,
        crate::inbound::http::skills::delete_skill,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    tags(
        (name = "users", description = "Account registration, login, and profile"),
        (name = "courses", description = "Course catalogue and bookings"),
        (name = "coaches", description = "Coach listing"),
        (name = "credit-packages", description = "Credit packages and purchases"),
        (name = "skills", description = "Coaching skills catalogue"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;
