use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use super::{
    auth::{AuthPayload, ErrorResponse},
    handlers::{health, me, user_login, user_register},
    store::UserProfile,
};

/// Add new endpoints to `paths(...)` so they show up in the generated document.
/// Routes like `/` stay undocumented.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        user_login::login,
        user_register::register,
        me::me,
    ),
    components(schemas(
        health::Health,
        user_login::UserLogin,
        user_register::UserRegister,
        AuthPayload,
        ErrorResponse,
        UserProfile,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "login", description = "Credential login"),
        (name = "register", description = "User registration"),
        (name = "user", description = "Authenticated user"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
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

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
