//! CORS preflight detection.
//!
//! Browsers send `OPTIONS` with `Access-Control-Request-Headers` before a
//! cross-origin call. When that list names `authorization`, the probe carries no
//! credential and must pass through untouched.

use axum::http::{Method, header, request::Parts};

pub fn is_auth_preflight(parts: &Parts) -> bool {
    if parts.method != Method::OPTIONS {
        return false;
    }

    let Some(requested) = parts.headers.get(header::ACCESS_CONTROL_REQUEST_HEADERS) else {
        return false;
    };

    requested
        .to_str()
        .map(|list| {
            list.split(',')
                .any(|h| h.trim().eq_ignore_ascii_case("authorization"))
        })
        .unwrap_or(false)
}
