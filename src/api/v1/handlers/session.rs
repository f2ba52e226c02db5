/*
 * Responsibility
 * - GET /session: 認証済みのみ (AuthCtxExtractor)
 * - AUTH_REQUIRED=false でも匿名なら 401
 */
use axum::Json;
use serde::Serialize;

use crate::api::v1::extractors::AuthCtxExtractor;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub claims: serde_json::Value,
}

pub async fn session(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<SessionResponse> {
    let claims = ctx
        .claims::<serde_json::Value>()
        .unwrap_or(serde_json::Value::String(ctx.decoded));
    Json(SessionResponse { claims })
}
