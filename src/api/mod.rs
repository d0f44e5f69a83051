//! REST API layer: route handlers, DTOs, extractors and router composition.
//!
//! All resource endpoints are mounted under `/api/v1`; `/health` and the
//! OpenAPI document sit at the root.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

pub use openapi::ApiDoc;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Builds the complete API router with all REST endpoints.
///
/// With the `swagger-ui` feature the interactive UI is mounted at
/// `/swagger-ui`; the JSON document is served either way.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes(state))
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        OPENAPI_JSON_PATH,
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    router
}
