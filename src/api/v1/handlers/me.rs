/*
 * Responsibility
 * - GET /me: bearer middleware が付与した AuthCtx をそのまま返す
 * - AUTH_REQUIRED=false の場合は匿名でも 200 (authenticated=false)
 */
use axum::Json;
use serde::Serialize;

use crate::api::v1::extractors::MaybeAuthCtx;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<serde_json::Value>,
}

pub async fn me(MaybeAuthCtx(ctx): MaybeAuthCtx) -> Json<MeResponse> {
    let Some(ctx) = ctx else {
        return Json(MeResponse {
            authenticated: false,
            token: None,
            claims: None,
        });
    };

    // payload が JSON でなければ文字列のまま返す
    let claims = ctx
        .claims::<serde_json::Value>()
        .unwrap_or_else(|_| serde_json::Value::String(ctx.decoded.clone()));

    Json(MeResponse {
        authenticated: true,
        token: Some(ctx.token),
        claims: Some(claims),
    })
}
