//! Token extraction from the incoming request.
//!
//! The default reads `Authorization: Bearer <token>`. Callers can swap in any
//! `Fn(&Parts) -> Result<String, AuthError>` (custom header, query string, ...).

use axum::http::{header, request::Parts};

use super::error::AuthError;

pub trait TokenExtractor: Send + Sync {
    fn extract(&self, parts: &Parts) -> Result<String, AuthError>;
}

impl<F> TokenExtractor for F
where
    F: Fn(&Parts) -> Result<String, AuthError> + Send + Sync,
{
    fn extract(&self, parts: &Parts) -> Result<String, AuthError> {
        self(parts)
    }
}

/// `Authorization: Bearer <token>` (scheme is case-insensitive).
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerExtractor;

impl TokenExtractor for BearerExtractor {
    fn extract(&self, parts: &Parts) -> Result<String, AuthError> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .filter(|v| !v.is_empty())
            .ok_or_else(AuthError::header_missing)?;

        // Raw bytes: obs-text in the scheme or token is not a format error.
        let token = parse_bearer(value.as_bytes())?;
        Ok(String::from_utf8_lossy(token).into_owned())
    }
}

/// Split on single spaces; exactly `<scheme> <token>`, both non-empty.
pub fn parse_bearer(value: &[u8]) -> Result<&[u8], AuthError> {
    let mut split = value.split(|b| *b == b' ');
    let (scheme, token) = match (split.next(), split.next(), split.next()) {
        (Some(scheme), Some(token), None) if !scheme.is_empty() && !token.is_empty() => {
            (scheme, token)
        }
        _ => return Err(AuthError::header_bad_format()),
    };

    if !scheme.eq_ignore_ascii_case(b"bearer") {
        return Err(AuthError::header_bad_scheme());
    }

    Ok(token)
}
