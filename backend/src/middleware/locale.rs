//! Request culture middleware
//!
//! Negotiates the culture pair for each request and applies the decision:
//! publishes the outcome into the request extensions for downstream
//! handlers, and optionally reflects the resolved UI culture in the
//! response's Content-Language header.
//!
//! The resolved pair travels with the request, never through a process-wide
//! or thread-local cell: concurrent requests must not observe each other's
//! culture.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::CONTENT_LANGUAGE, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::localization::{negotiate, LocaleCatalog, NegotiationOutcome};

/// Negotiate and apply the request culture.
///
/// Downstream handlers read the decision via `Extension<RequestCulture>`
/// or `Extension<NegotiationOutcome>`; a missing extension means this
/// middleware was not mounted ahead of a locale-sensitive route, which is
/// a wiring bug and surfaces as axum's loud extension rejection.
pub async fn request_culture_middleware(
    State(catalog): State<Arc<LocaleCatalog>>,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = negotiate(&req, &catalog);

    // The slot is write-once per request; a prior value means the
    // middleware is mounted twice.
    debug_assert!(
        req.extensions().get::<NegotiationOutcome>().is_none(),
        "request culture negotiated twice for one request"
    );

    req.extensions_mut().insert(outcome.culture.clone());
    req.extensions_mut().insert(outcome.clone());

    let mut response = next.run(req).await;

    if catalog.apply_to_response_headers {
        if let Ok(value) = HeaderValue::from_str(&outcome.culture.ui_culture) {
            response.headers_mut().insert(CONTENT_LANGUAGE, value);
        }
    }

    response
}
