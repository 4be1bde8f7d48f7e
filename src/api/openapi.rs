//! OpenAPI document served under `/docs`.

use crate::api::handlers::{catalog, health, me, otp, signup, token};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        token::token,
        otp::send_otp,
        otp::provisioning_qr,
        signup::signup,
        me::me,
        catalog::create_project,
        catalog::get_projects,
        catalog::create_course,
        catalog::get_courses,
        catalog::create_professor,
        catalog::get_professors,
        catalog::create_task,
        catalog::get_tasks,
    ),
    components(schemas(
        health::Health,
        token::TokenRequest,
        token::Token,
        otp::OtpRequest,
        otp::OtpSent,
        signup::SignupRequest,
        signup::SignupStatus,
        me::UserProfile,
        catalog::Status,
        catalog::ProjectCreate,
        catalog::CourseCreate,
        catalog::ProfessorCreate,
        catalog::TaskCreate,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "OTP issuance, signup, login, and sessions"),
        (name = "catalog", description = "Pass-through project management resources"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health", "/token", "/otp", "/otp/qr", "/signup", "/me", "/projects", "/courses",
            "/professors", "/tasks",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path: {path}");
        }
    }

    #[test]
    fn document_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
