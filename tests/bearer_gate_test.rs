use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header, request::Parts};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use bearer_gate::api::v1::handlers::me::me;
use bearer_gate::app::{build_router, build_state};
use bearer_gate::config::{AppEnv, Config};
use bearer_gate::middleware::auth::bearer;
use bearer_gate::services::auth::{AuthError, AuthOptions, Authenticator};
use bearer_gate::services::token::{BrancaCodec, TokenCodec};
use bearer_gate::state::AppState;

const SECRET: &str = "supersecretkeyyoushouldnotcommit";
const WRONG_SECRET: &str = "thisiswrongsecretabcxyz123456789";

fn config(auth_required: bool, ttl: Option<u32>) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        branca_secret: SECRET.to_string(),
        auth_required,
        token_ttl_seconds: ttl,
    }
}

fn app(auth_required: bool) -> Router {
    app_with_ttl(auth_required, None)
}

fn app_with_ttl(auth_required: bool, ttl: Option<u32>) -> Router {
    let config = config(auth_required, ttl);
    let state = build_state(&config).unwrap();
    build_router(state, &config)
}

fn token(secret: &str, payload: &Value, timestamp: Option<u32>) -> String {
    BrancaCodec::new(secret.as_bytes())
        .unwrap()
        .encode(&payload.to_string(), timestamp)
        .unwrap()
}

async fn get_me(app: Router, authorization: Option<&str>) -> Response {
    let mut req = Request::builder().uri("/api/v1/me");
    if let Some(value) = authorization {
        req = req.header(header::AUTHORIZATION, value);
    }
    app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn assert_unauthorized(response: Response, code: &str) -> Value {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[header::WWW_AUTHENTICATE],
        format!("Bearer error=\"{code}\"").as_str()
    );
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], code);
    body
}

#[tokio::test]
async fn health_is_not_gated() {
    let response = app(true)
        .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_header_rejected_when_required() {
    let body = assert_unauthorized(get_me(app(true), None).await, "auth_header_missing").await;
    assert_eq!(body["error"]["message"], "Authorization header is missing");
}

#[tokio::test]
async fn missing_header_passes_when_optional() {
    let response = get_me(app(false), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"authenticated": false}));
}

#[tokio::test]
async fn bad_scheme_depends_on_policy() {
    assert_unauthorized(
        get_me(app(true), Some("NotBearer sometoken")).await,
        "auth_header_bad_scheme",
    )
    .await;

    let response = get_me(app(false), Some("NotBearer sometoken")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["authenticated"], false);
}

#[tokio::test]
async fn malformed_header_always_rejected() {
    assert_unauthorized(get_me(app(true), Some("malformed")).await, "auth_header_bad_format").await;
    assert_unauthorized(
        get_me(app(false), Some("malformed auth header")).await,
        "auth_header_bad_format",
    )
    .await;
}

#[tokio::test]
async fn valid_token_is_attached() {
    let payload = json!({"param1": "value1", "param2": "value2"});
    let token = token(SECRET, &payload, None);

    for required in [true, false] {
        let response = get_me(app(required), Some(&format!("Bearer {token}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["token"], token.as_str());
        assert_eq!(body["claims"], payload);
    }
}

#[tokio::test]
async fn undecodable_token_rejected() {
    let body = assert_unauthorized(
        get_me(app(true), Some("Bearer randomstring")).await,
        "invalid_token",
    )
    .await;
    assert_eq!(body["error"]["message"], "Failed to decode, token is invalid");
}

#[tokio::test]
async fn wrong_secret_rejected_regardless_of_policy() {
    let token = token(WRONG_SECRET, &json!({"sub": "mallory"}), Some(1_565_686_608));
    for required in [true, false] {
        assert_unauthorized(
            get_me(app(required), Some(&format!("Bearer {token}"))).await,
            "invalid_token",
        )
        .await;
    }
}

#[tokio::test]
async fn expired_token_rejected_regardless_of_policy() {
    let token = token(SECRET, &json!({"sub": "alice"}), Some(1_565_686_608));
    for required in [true, false] {
        let body = assert_unauthorized(
            get_me(app_with_ttl(required, Some(10)), Some(&format!("Bearer {token}"))).await,
            "expired_token",
        )
        .await;
        assert_eq!(body["error"]["message"], "Token is expired.");
    }
}

#[tokio::test]
async fn cors_preflight_is_answered_without_auth() {
    let response = app(true)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/me")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x, authorization")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

fn gated(auth: Authenticator) -> Router {
    let state = AppState::new(Arc::new(auth));
    bearer::apply(
        Router::new().route(
            "/me",
            get(me).options(|| async { StatusCode::NO_CONTENT }),
        ),
        state.clone(),
    )
    .with_state(state)
}

#[tokio::test]
async fn gate_skips_preflight_without_cors_layer() {
    let app = gated(Authenticator::new(AuthOptions::new(SECRET)).unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/me")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x, authorization")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn custom_extractor_failure_is_invalid_token() {
    let options = AuthOptions::new(SECRET).token_extractor(|parts: &Parts| {
        parts
            .headers
            .get("x-session")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| AuthError::extraction("session header is missing"))
    });
    let app = gated(Authenticator::new(options).unwrap());

    let response = app
        .clone()
        .oneshot(Request::get("/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = assert_unauthorized(response, "invalid_token").await;
    assert_eq!(body["error"]["message"], "session header is missing");

    let token = token(SECRET, &json!({"sub": "bob"}), None);
    let response = app
        .oneshot(
            Request::get("/me")
                .header("x-session", token.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["claims"]["sub"], "bob");
}

async fn get_session(app: Router, authorization: Option<&str>) -> Response {
    let mut req = Request::builder().uri("/api/v1/session");
    if let Some(value) = authorization {
        req = req.header(header::AUTHORIZATION, value);
    }
    app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

#[tokio::test]
async fn session_requires_identity_even_when_gate_is_optional() {
    let response = get_session(app(false), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = token(SECRET, &json!({"sub": "carol"}), None);
    let response = get_session(app(false), Some(&format!("Bearer {token}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"claims": {"sub": "carol"}}));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = app(true)
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn bad_secret_fails_at_startup() {
    let mut config = config(true, None);
    config.branca_secret = "short".into();
    assert!(build_state(&config).is_err());
    config.branca_secret = String::new();
    assert!(build_state(&config).is_err());
}
