//! Culture providers
//!
//! A provider inspects an incoming request and proposes candidate locale
//! names for the culture and UI-culture axes, in priority order. Providers
//! only read immutable request data; matching against the supported lists
//! happens later in the negotiation engine.

use axum::extract::Request;
use axum::http::header::ACCEPT_LANGUAGE;

/// Candidate locale names proposed by a provider, pre-matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCultures {
    pub cultures: Vec<String>,
    pub ui_cultures: Vec<String>,
}

impl ProviderCultures {
    /// Same single candidate on both axes.
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { cultures: vec![name.clone()], ui_cultures: vec![name] }
    }

    /// Same ordered candidate list on both axes.
    pub fn from_list(names: Vec<String>) -> Self {
        Self { cultures: names.clone(), ui_cultures: names }
    }
}

/// A locale-detection strategy consulted during negotiation.
///
/// `None` means "no opinion": the provider found no locale signal in the
/// request and the engine moves on to the next one.
pub trait CultureProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn determine(&self, req: &Request) -> Option<ProviderCultures>;
}

/// Reads the locale token from the first path segment, matching the
/// `/{culture}/{...}` route layout.
#[derive(Debug, Default)]
pub struct RouteSegmentProvider;

impl CultureProvider for RouteSegmentProvider {
    fn name(&self) -> &'static str {
        "route"
    }

    fn determine(&self, req: &Request) -> Option<ProviderCultures> {
        let segment = req.uri().path().trim_start_matches('/').split('/').next()?;
        if segment.is_empty() {
            return None;
        }
        Some(ProviderCultures::uniform(segment))
    }
}

/// Parses the `Accept-Language` header into a candidate list ordered by
/// descending quality factor.
#[derive(Debug)]
pub struct AcceptLanguageProvider {
    /// Upper bound on how many header entries are turned into candidates.
    pub max_candidates: usize,
}

impl Default for AcceptLanguageProvider {
    fn default() -> Self {
        Self { max_candidates: 3 }
    }
}

impl CultureProvider for AcceptLanguageProvider {
    fn name(&self) -> &'static str {
        "accept-language"
    }

    fn determine(&self, req: &Request) -> Option<ProviderCultures> {
        let header = req.headers().get(ACCEPT_LANGUAGE)?.to_str().ok()?;

        let mut weighted: Vec<(String, f32)> = Vec::new();
        for entry in header.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let mut parts = entry.split(';').map(str::trim);
            let tag = parts.next().unwrap_or_default();
            // The wildcard carries no locale name to match against.
            if tag.is_empty() || tag == "*" {
                continue;
            }

            let quality = parts
                .find_map(|p| p.strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            if quality > 0.0 {
                weighted.push((tag.to_string(), quality));
            }
        }

        if weighted.is_empty() {
            return None;
        }

        // Stable sort keeps header order for equal quality values.
        weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let ordered: Vec<String> = weighted
            .into_iter()
            .take(self.max_candidates)
            .map(|(tag, _)| tag)
            .collect();

        Some(ProviderCultures::from_list(ordered))
    }
}
