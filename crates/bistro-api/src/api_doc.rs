//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use bistro_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bistro API",
        version = "0.1.0",
        description = "Business registration with image normalization, plus a read-only menu proxy to the content service."
    ),
    paths(
        handlers::business::register_business,
        handlers::menu::get_menu,
        handlers::health::liveness_check,
        handlers::health::readiness_check,
    ),
    components(
        schemas(
            models::BusinessRecord,
            models::CreateBusinessRequest,
            models::MenuEntry,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "business", description = "Business registration"),
        (name = "menu", description = "Menu entries from the content service"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;
