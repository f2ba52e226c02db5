/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、/me と /session は bearer middleware の内側
 */
use axum::{Router, routing::get};

use crate::middleware::auth::bearer;
use crate::state::AppState;

use crate::api::v1::handlers::{health::health, me::me, session::session};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let protected = bearer::apply(
        Router::new()
            .route("/me", get(me))
            .route("/session", get(session)),
        state,
    );

    public.merge(protected)
}
