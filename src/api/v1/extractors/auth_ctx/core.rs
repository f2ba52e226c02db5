use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::state::AppState;

use super::AuthCtx;

/// Handler で、 AuthCtx を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（匿名リクエスト・ミドルウェア未設定）
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// 認証が任意のルート用。AuthCtx が無くても拒否しない
pub struct MaybeAuthCtx(pub Option<AuthCtx>);

impl FromRequestParts<AppState> for MaybeAuthCtx
where
    AppState: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthCtx(parts.extensions.get::<AuthCtx>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;

    use super::*;
    use crate::services::auth::{AuthOptions, Authenticator};

    fn state() -> AppState {
        let auth = Authenticator::new(AuthOptions::new("supersecretkeyyoushouldnotcommit")).unwrap();
        AppState::new(Arc::new(auth))
    }

    fn parts(ctx: Option<AuthCtx>) -> Parts {
        let mut parts = Request::builder().uri("/").body(()).unwrap().into_parts().0;
        if let Some(ctx) = ctx {
            parts.extensions.insert(ctx);
        }
        parts
    }

    fn ctx() -> AuthCtx {
        AuthCtx {
            token: "tok".into(),
            decoded: r#"{"sub":"alice"}"#.into(),
        }
    }

    #[tokio::test]
    async fn required_extractor_reads_extension() {
        let AuthCtxExtractor(found) =
            AuthCtxExtractor::from_request_parts(&mut parts(Some(ctx())), &state())
                .await
                .unwrap();
        assert_eq!(found.token, "tok");
        let claims: serde_json::Value = found.claims().unwrap();
        assert_eq!(claims["sub"], "alice");
    }

    #[tokio::test]
    async fn required_extractor_rejects_anonymous() {
        let rejection = AuthCtxExtractor::from_request_parts(&mut parts(None), &state())
            .await
            .err()
            .unwrap();
        assert_eq!(rejection, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn optional_extractor_never_rejects() {
        let MaybeAuthCtx(found) = MaybeAuthCtx::from_request_parts(&mut parts(None), &state())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
