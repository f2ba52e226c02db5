/*
 * Responsibility
 * - Config読み込み → Authenticator 生成 → Router 組み立て
 * - Middleware の適用 (CORS/Bearer/HTTP/Security headers)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::services::auth::{AuthOptions, Authenticator};
use crate::{api, state::AppState};

fn init_tracing() {
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash loudly. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;
    init_panic_hook(!config.app_env.is_production());

    let state = build_state(&config)?;

    tracing::info!(
        auth_required = config.auth_required,
        ttl_seconds = ?config.token_ttl_seconds,
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Fails fast on a bad secret; never deferred to request time.
pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let options = AuthOptions::new(config.branca_secret.as_bytes())
        .auth_required(config.auth_required)
        .ttl_seconds(config.token_ttl_seconds);

    let auth = Authenticator::new(options)?;
    Ok(AppState::new(Arc::new(auth)))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .fallback(|| async { AppError::not_found("route") })
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}
