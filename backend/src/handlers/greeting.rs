use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Local;

use crate::AppState;
use crate::localization::NegotiationOutcome;
use crate::models::{GreetingResponse, MessageResponse};
use crate::services::greeting_service::format_long_date;
use crate::utils::{ApiError, ApiResult};

/// Greeting in the negotiated request culture
#[utoipa::path(
    get,
    path = "/{culture}/greeting",
    params(
        ("culture" = String, Path, description = "Locale route segment, e.g. \"en\"")
    ),
    responses(
        (status = 200, description = "Localized greeting", body = GreetingResponse)
    ),
    tag = "Greeting"
)]
pub async fn greet(
    State(state): State<Arc<AppState>>,
    Extension(outcome): Extension<NegotiationOutcome>,
) -> ApiResult<Json<GreetingResponse>> {
    let resolved = &outcome.culture;
    tracing::debug!(
        "Greeting with culture={} ui_culture={}",
        resolved.culture,
        resolved.ui_culture
    );

    let message = state.greeting_service.greeting(&resolved.ui_culture);
    let date = format_long_date(Local::now(), &resolved.culture);

    Ok(Json(GreetingResponse {
        message,
        date,
        culture: resolved.culture.clone(),
        ui_culture: resolved.ui_culture.clone(),
        provider: outcome.winner.map(|w| w.name.to_string()),
    }))
}

/// Catalog message by key, in the negotiated UI culture
#[utoipa::path(
    get,
    path = "/{culture}/messages/{key}",
    params(
        ("culture" = String, Path, description = "Locale route segment, e.g. \"en\""),
        ("key" = String, Path, description = "Message catalog key")
    ),
    responses(
        (status = 200, description = "Localized message", body = MessageResponse),
        (status = 404, description = "Key exists in no locale")
    ),
    tag = "Greeting"
)]
pub async fn message(
    State(state): State<Arc<AppState>>,
    Extension(outcome): Extension<NegotiationOutcome>,
    Path((_culture, key)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        return Err(ApiError::invalid_data(format!("Invalid message key: {}", key)));
    }

    let ui_culture = &outcome.culture.ui_culture;
    let text = state
        .greeting_service
        .lookup(&key, ui_culture)
        .ok_or_else(|| ApiError::not_found(format!("Message key: {}", key)))?;

    Ok(Json(MessageResponse { key, text, ui_culture: ui_culture.clone() }))
}
