//! OpenAPI description of the demo API, served at `/v3/api-docs`.
//!
//! Generated from the handler annotations with `utoipa`, so the document
//! follows the routes it describes.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityRequirement, SecurityScheme};

use crate::routes::{auth, users, weather};
use crate::store::{User, UserRequest};

/// Where the document is served.
pub const API_DOCS_PATH: &str = "/v3/api-docs";

/// Name of the bearer security scheme in the auth demo's document.
const BEARER_SCHEME: &str = "bearer";

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "not_found")]
    pub error: String,
    #[schema(example = "user 9 not found")]
    pub message: String,
}

/// Users and weather endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sample API",
        version = "v1",
        description = "Users and weather endpoints documented by Swagger Sloop."
    ),
    paths(
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        weather::five_day_forecast,
        weather::forecast_for_days,
    ),
    components(schemas(User, UserRequest, weather::WeatherForecast, ErrorResponse)),
    tags(
        (name = "Users", description = "User management APIs"),
        (name = "Weather", description = "Weather forecast APIs")
    )
)]
pub struct ApiDoc;

/// Session endpoints added by the auth demo.
#[derive(OpenApi)]
#[openapi(
    paths(auth::login, auth::logout, auth::captcha, auth::check),
    components(schemas(
        auth::LoginRequest,
        auth::LoginResponse,
        auth::CaptchaResponse,
        auth::SessionStatus
    )),
    tags((name = "Auth", description = "Login and logout"))
)]
pub struct AuthApiDoc;

/// The demo document.
#[must_use]
pub fn document() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// The auth demo document: the demo API, the session endpoints and a
/// bearer requirement on every operation.
#[must_use]
pub fn auth_document() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(AuthApiDoc::openapi());

    doc.components
        .get_or_insert_with(Default::default)
        .add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    doc.security = Some(vec![SecurityRequirement::new(
        BEARER_SCHEME,
        Vec::<String>::new(),
    )]);
    doc
}
