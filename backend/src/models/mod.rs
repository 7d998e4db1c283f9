use serde::Serialize;
use utoipa::ToSchema;

/// Greeting rendered for the negotiated request culture.
#[derive(Debug, Serialize, ToSchema)]
pub struct GreetingResponse {
    /// Localized greeting text (UI-culture axis)
    pub message: String,
    /// Current date, long form, in the formatting culture (culture axis)
    pub date: String,
    pub culture: String,
    pub ui_culture: String,
    /// Name of the provider that decided the culture; null when the
    /// configured default applied
    pub provider: Option<String>,
}

/// Single catalog message resolved for the request's UI culture.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub key: String,
    pub text: String,
    pub ui_culture: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
