//! Negotiation engine
//!
//! Walks the configured provider chain and commits to the first provider
//! whose candidates match the supported lists on at least one axis. The
//! unmatched axis falls back to the catalog default. A chain with no usable
//! provider is not an error; the default pair applies untouched.

use axum::extract::Request;

use crate::localization::catalog::{LocaleCatalog, RequestCulture};
use crate::localization::matcher::match_any;

/// Identity of the provider that decided a request's culture, by position
/// in the catalog's provider chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningProvider {
    pub index: usize,
    pub name: &'static str,
}

/// Per-request negotiation result. Created once by [`negotiate`], never
/// mutated, and dropped with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationOutcome {
    pub culture: RequestCulture,
    /// `None` means no provider matched and the default pair was used.
    pub winner: Option<WinningProvider>,
}

/// Resolve the culture pair for one request.
///
/// First-provider-wins: a provider that matches only one axis still
/// finalizes the decision; later providers are not consulted even if they
/// would have matched both axes.
pub fn negotiate(req: &Request, catalog: &LocaleCatalog) -> NegotiationOutcome {
    for (index, provider) in catalog.providers.iter().enumerate() {
        let Some(candidates) = provider.determine(req) else {
            continue;
        };

        let culture = match_any(
            &candidates.cultures,
            &catalog.supported_cultures,
            catalog.fallback_to_parent_cultures,
        );
        let ui_culture = match_any(
            &candidates.ui_cultures,
            &catalog.supported_ui_cultures,
            catalog.fallback_to_parent_ui_cultures,
        );

        if culture.is_none() && ui_culture.is_none() {
            tracing::debug!(
                provider = provider.name(),
                "Provider yielded candidates but none are supported"
            );
            continue;
        }

        let resolved = RequestCulture {
            culture: culture.unwrap_or_else(|| catalog.default_culture.culture.clone()),
            ui_culture: ui_culture.unwrap_or_else(|| catalog.default_culture.ui_culture.clone()),
        };
        tracing::debug!(
            provider = provider.name(),
            culture = %resolved.culture,
            ui_culture = %resolved.ui_culture,
            "Negotiated request culture"
        );
        return NegotiationOutcome {
            culture: resolved,
            winner: Some(WinningProvider { index, name: provider.name() }),
        };
    }

    NegotiationOutcome { culture: catalog.default_culture.clone(), winner: None }
}
