use std::sync::Arc;

use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use autopm_login::handlers::link::X_AUTOPM_BOT_KEY;
use autopm_login::infra::authenticator::SupabaseAuthenticator;
use autopm_login::router::build_router;
use autopm_login::state::AppState;

/// State with no database and an identity provider nobody listens on. Only
/// requests rejected before any I/O can succeed against it.
fn offline_state() -> AppState {
    AppState {
        db: DatabaseConnection::Disconnected,
        authenticator: SupabaseAuthenticator::new("http://127.0.0.1:9", "anon".to_owned())
            .unwrap(),
        bot_api_key: Arc::from("bot-secret"),
    }
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn should_answer_health_checks_with_request_id() {
    let router = build_router(offline_state());

    let resp = router
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_reject_redeem_without_bot_key() {
    let router = build_router(offline_state());

    let resp = router
        .oneshot(json_post(
            "/link/redeem",
            serde_json::json!({ "code": "A1B2C3", "telegram_id": 42 }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(resp).await["kind"], "INVALID_BOT_KEY");
}

#[tokio::test]
async fn should_reject_redeem_with_wrong_bot_key() {
    let router = build_router(offline_state());

    let mut req = json_post(
        "/link/redeem",
        serde_json::json!({ "code": "A1B2C3", "telegram_id": 42 }),
    );
    req.headers_mut()
        .insert(X_AUTOPM_BOT_KEY, "not-the-secret".parse().unwrap());

    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_blank_signup_before_calling_provider() {
    let router = build_router(offline_state());

    let resp = router
        .oneshot(json_post(
            "/auth/signup",
            serde_json::json!({ "email": "", "password": "pw1" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = read_json(resp).await;
    assert_eq!(json["kind"], "INVALID_SIGNUP");
    assert_eq!(json["message"], "email is required");
}

#[tokio::test]
async fn should_report_unreachable_provider_on_login() {
    let router = build_router(offline_state());

    let resp = router
        .oneshot(json_post(
            "/auth/login",
            serde_json::json!({ "email": "a@b.com", "password": "pw1" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(read_json(resp).await["kind"], "AUTHENTICATOR_UNAVAILABLE");
}

#[tokio::test]
async fn should_wrap_malformed_body_in_error_envelope() {
    let router = build_router(offline_state());

    let resp = router
        .oneshot(json_post(
            "/auth/login",
            serde_json::json!({ "email": "a@b.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = read_json(resp).await;
    assert_eq!(json["kind"], "INVALID_REQUEST");
    assert!(
        json["message"].as_str().unwrap().contains("password"),
        "unexpected message: {json}"
    );
}

#[tokio::test]
async fn should_wrap_missing_content_type_in_error_envelope() {
    let router = build_router(offline_state());

    let mut req = json_post(
        "/link/redeem",
        serde_json::json!({ "code": "A1B2C3", "telegram_id": 42 }),
    );
    req.headers_mut().remove(header::CONTENT_TYPE);
    req.headers_mut()
        .insert(X_AUTOPM_BOT_KEY, "bot-secret".parse().unwrap());

    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(read_json(resp).await["kind"], "INVALID_REQUEST");
}
