//! Locale catalog
//!
//! Immutable per-process localization configuration: the default culture
//! pair, the supported lists for both axes, fallback flags and the ordered
//! provider chain. Built once at startup and shared read-only.

use serde::Serialize;

use crate::config::LocalizationConfig;
use crate::localization::provider::{
    AcceptLanguageProvider, CultureProvider, RouteSegmentProvider,
};

/// A culture / UI-culture pair.
///
/// The culture axis governs formatting (dates, numbers), the UI-culture
/// axis governs which translated text is shown. The empty name is the
/// invariant culture, a valid value distinct from "absent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestCulture {
    pub culture: String,
    pub ui_culture: String,
}

impl RequestCulture {
    pub fn new(culture: impl Into<String>, ui_culture: impl Into<String>) -> Self {
        Self { culture: culture.into(), ui_culture: ui_culture.into() }
    }

    /// Same name on both axes.
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { culture: name.clone(), ui_culture: name }
    }
}

/// Read-only localization configuration shared across all requests.
///
/// An empty supported list disables matching for that axis; negotiation
/// then always falls through to the default pair on it.
pub struct LocaleCatalog {
    pub default_culture: RequestCulture,
    pub supported_cultures: Vec<String>,
    pub supported_ui_cultures: Vec<String>,
    pub fallback_to_parent_cultures: bool,
    pub fallback_to_parent_ui_cultures: bool,
    pub apply_to_response_headers: bool,
    pub providers: Vec<Box<dyn CultureProvider>>,
}

impl std::fmt::Debug for LocaleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleCatalog")
            .field("default_culture", &self.default_culture)
            .field("supported_cultures", &self.supported_cultures)
            .field("supported_ui_cultures", &self.supported_ui_cultures)
            .field("fallback_to_parent_cultures", &self.fallback_to_parent_cultures)
            .field("fallback_to_parent_ui_cultures", &self.fallback_to_parent_ui_cultures)
            .field("apply_to_response_headers", &self.apply_to_response_headers)
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl LocaleCatalog {
    /// Build the catalog from the `[localization]` config section.
    ///
    /// Unknown provider names are a startup error: the provider chain is
    /// wiring, not request data, so it fails loudly here instead of at
    /// request time.
    pub fn from_config(cfg: &LocalizationConfig) -> Result<Self, anyhow::Error> {
        let mut providers: Vec<Box<dyn CultureProvider>> = Vec::new();
        for name in &cfg.providers {
            providers.push(build_provider(name)?);
        }

        Ok(Self {
            default_culture: RequestCulture::new(&cfg.default_culture, &cfg.default_ui_culture),
            supported_cultures: cfg.supported_cultures.clone(),
            supported_ui_cultures: cfg.supported_ui_cultures.clone(),
            fallback_to_parent_cultures: cfg.fallback_to_parent_cultures,
            fallback_to_parent_ui_cultures: cfg.fallback_to_parent_ui_cultures,
            apply_to_response_headers: cfg.apply_to_response_headers,
            providers,
        })
    }
}

fn build_provider(name: &str) -> Result<Box<dyn CultureProvider>, anyhow::Error> {
    match name {
        "route" => Ok(Box::new(RouteSegmentProvider)),
        "accept-language" => Ok(Box::new(AcceptLanguageProvider::default())),
        other => anyhow::bail!("Unknown culture provider in config: {}", other),
    }
}
