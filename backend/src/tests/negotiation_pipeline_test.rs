use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{
    Request, StatusCode,
    header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE},
};
use axum::routing::get;
use serde_json::Value;
use tower::ServiceExt;

use crate::AppState;
use crate::config::Config;
use crate::services::GreetingService;
use crate::tests::common::{en_vi_catalog, test_router};

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

fn content_language(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_LANGUAGE)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_route_segment_decides_culture() {
    let app = test_router(en_vi_catalog());

    let response = app.oneshot(get_request("/en/greeting")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_language(&response).as_deref(), Some("en"));

    let body = body_json(response).await;
    assert_eq!(body["culture"], "en");
    assert_eq!(body["ui_culture"], "en");
    assert_eq!(body["provider"], "route");
}

#[tokio::test]
async fn test_unsupported_segment_falls_through_to_accept_language() {
    let app = test_router(en_vi_catalog());

    let request = Request::builder()
        .uri("/fr/greeting")
        .header(ACCEPT_LANGUAGE, "de;q=0.9, en;q=0.8")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_language(&response).as_deref(), Some("en"));

    let body = body_json(response).await;
    assert_eq!(body["culture"], "en");
    assert_eq!(body["provider"], "accept-language");
}

#[tokio::test]
async fn test_defaults_apply_when_nothing_matches() {
    let app = test_router(en_vi_catalog());

    let response = app.oneshot(get_request("/fr/greeting")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_language(&response).as_deref(), Some("vi"));

    let body = body_json(response).await;
    assert_eq!(body["culture"], "vi");
    assert_eq!(body["ui_culture"], "vi");
    assert_eq!(body["provider"], Value::Null);
}

#[tokio::test]
async fn test_parent_fallback_end_to_end() {
    let app = test_router(en_vi_catalog());

    let response = app.oneshot(get_request("/en-US/greeting")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    // "en-US" is not in the supported list; its parent "en" is.
    assert_eq!(body["culture"], "en");
    assert_eq!(body["provider"], "route");
}

#[tokio::test]
async fn test_content_language_toggle() {
    let mut catalog = en_vi_catalog();
    catalog.apply_to_response_headers = false;
    let app = test_router(catalog);

    let response = app.oneshot(get_request("/en/greeting")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_language(&response), None);
}

#[tokio::test]
async fn test_greeting_body_is_localized() {
    let app = test_router(en_vi_catalog());
    let service = GreetingService::new();

    let response = app.clone().oneshot(get_request("/vi/greeting")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["message"], Value::String(service.greeting("vi")));

    let response = app.oneshot(get_request("/en/greeting")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["message"], Value::String(service.greeting("en")));
}

#[tokio::test]
async fn test_concurrent_requests_are_isolated() {
    let app = test_router(en_vi_catalog());

    for _ in 0..16 {
        let (en, vi) = tokio::join!(
            app.clone().oneshot(get_request("/en/greeting")),
            app.clone().oneshot(get_request("/vi/greeting")),
        );
        let (en, vi) = (en.unwrap(), vi.unwrap());

        assert_eq!(content_language(&en).as_deref(), Some("en"));
        assert_eq!(content_language(&vi).as_deref(), Some("vi"));

        let (en_body, vi_body) = tokio::join!(body_json(en), body_json(vi));
        assert_eq!(en_body["culture"], "en");
        assert_eq!(vi_body["culture"], "vi");
        assert_ne!(en_body["message"], vi_body["message"]);
    }
}

#[tokio::test]
async fn test_message_lookup_uses_negotiated_ui_culture() {
    let app = test_router(en_vi_catalog());

    let response = app
        .clone()
        .oneshot(get_request("/en/messages/greeting_error"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["key"], "greeting_error");
    assert_eq!(body["ui_culture"], "en");
    assert_eq!(
        body["text"],
        Value::String(GreetingService::new().missing_message("en"))
    );

    let response = app.oneshot(get_request("/en/messages/no_such_key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], 3000);
}

#[tokio::test]
async fn test_message_lookup_rejects_malformed_key() {
    let app = test_router(en_vi_catalog());

    let response = app.oneshot(get_request("/en/messages/bad%20key!")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_middleware_is_a_loud_wiring_error() {
    // Locale-sensitive route mounted without the culture middleware: the
    // handler's Extension extractor must reject, not silently default.
    let state = Arc::new(AppState {
        config: Config::default(),
        catalog: Arc::new(en_vi_catalog()),
        greeting_service: GreetingService::new(),
    });
    let app: axum::Router = axum::Router::new()
        .route("/:culture/greeting", get(crate::handlers::greeting::greet))
        .with_state(state);

    let response = app.oneshot(get_request("/en/greeting")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
