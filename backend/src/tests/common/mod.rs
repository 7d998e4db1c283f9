// Common test utilities and helpers

use std::sync::Arc;

use axum::Router;

use crate::AppState;
use crate::config::Config;
use crate::localization::{
    AcceptLanguageProvider, CultureProvider, LocaleCatalog, RequestCulture, RouteSegmentProvider,
};
use crate::services::GreetingService;

/// Catalog mirroring the shipped config: en + vi supported, vi default,
/// route provider first, then Accept-Language.
pub fn en_vi_catalog() -> LocaleCatalog {
    let providers: Vec<Box<dyn CultureProvider>> = vec![
        Box::new(RouteSegmentProvider),
        Box::new(AcceptLanguageProvider::default()),
    ];
    LocaleCatalog {
        default_culture: RequestCulture::uniform("vi"),
        supported_cultures: vec!["en".to_string(), "vi".to_string()],
        supported_ui_cultures: vec!["en".to_string(), "vi".to_string()],
        fallback_to_parent_cultures: true,
        fallback_to_parent_ui_cultures: true,
        apply_to_response_headers: true,
        providers,
    }
}

/// Full application router over the given catalog, static files disabled.
pub fn test_router(catalog: LocaleCatalog) -> Router {
    let mut config = Config::default();
    config.static_config.enabled = false;

    let state = Arc::new(AppState {
        config,
        catalog: Arc::new(catalog),
        greeting_service: GreetingService::new(),
    });
    crate::build_router(state)
}
