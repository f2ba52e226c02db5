//! Bearer token 検証 → AuthCtx を extensions に入れる
//!
//! - 判定は `Authenticator` (services/auth) に任せ、ここは axum への配線だけ
//! - 成功: `AuthCtx { token, decoded }` を extensions に insert して次へ
//! - preflight / 匿名: 何も insert せずに次へ
//! - 拒否: handler は呼ばずに 401 を返す

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::Outcome;
use crate::state::AppState;

/// Put the bearer gate in front of every route of `router`.
///
/// ```ignore
/// let v1 = api::v1::routes::protected();
/// let v1 = middleware::auth::bearer::apply(v1, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, bearer_middleware))
}

async fn bearer_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let outcome = match state.auth.authenticate(&parts) {
        Ok(outcome) => outcome,
        Err(err) => {
            // never log the token itself
            tracing::warn!(
                code = err.code(),
                method = %parts.method,
                path = parts.uri.path(),
                "authentication rejected"
            );
            return Err(err.into());
        }
    };

    match outcome {
        Outcome::Authenticated(identity) => {
            parts.extensions.insert(AuthCtx::from(identity));
        }
        Outcome::Preflight => tracing::debug!("cors preflight, passing through"),
        Outcome::Anonymous => tracing::debug!("no credentials, continuing anonymously"),
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
