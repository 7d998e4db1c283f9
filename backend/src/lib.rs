//! Localized greeting service
//!
//! Per-request culture negotiation (route segment and Accept-Language
//! providers, parent-locale fallback, configured defaults) applied as axum
//! middleware, plus the greeting API it localizes.

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod handlers;
pub mod localization;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use config::Config;
use localization::LocaleCatalog;
use services::GreetingService;

/// Shared application state for handlers.
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<LocaleCatalog>,
    pub greeting_service: GreetingService,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::greeting::greet, handlers::greeting::message, handlers::health::health),
    components(schemas(
        models::GreetingResponse,
        models::MessageResponse,
        models::HealthResponse
    )),
    tags(
        (name = "Greeting", description = "Localized greeting endpoints"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Assemble the full router: swagger, API routes, the localized greeting
/// routes behind the culture middleware, and the optional static site.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(handlers::health::health))
        .route("/greeting", get(handlers::greeting::greet))
        .route("/:culture/greeting", get(handlers::greeting::greet))
        .route("/:culture/messages/:key", get(handlers::greeting::message))
        .with_state(state.clone());

    if state.config.static_config.enabled {
        let web_root = std::path::Path::new(&state.config.static_config.web_root);
        router = router.fallback_service(
            ServeDir::new(web_root).not_found_service(ServeFile::new(web_root.join("not_found.html"))),
        );
    }

    router
        .layer(from_fn_with_state(
            state.catalog.clone(),
            middleware::request_culture_middleware,
        ))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
