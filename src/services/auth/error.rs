/*
 * Responsibility
 * - 認証できなかった理由 (code/message) の閉じた集合
 * - Header 系は抽出時のエラー、Unauthorized 系は 401 として返すエラー
 */
use std::borrow::Cow;

use axum::http::StatusCode;

pub const AUTH_HEADER_MISSING: &str = "auth_header_missing";
pub const AUTH_HEADER_BAD_FORMAT: &str = "auth_header_bad_format";
pub const AUTH_HEADER_BAD_SCHEME: &str = "auth_header_bad_scheme";
pub const INVALID_TOKEN_VERSION: &str = "invalid_token_version";
pub const EXPIRED_TOKEN: &str = "expired_token";
pub const INVALID_TOKEN: &str = "invalid_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised while extracting the token; carries no HTTP status.
    Header,
    /// Authentication failure, always 401.
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct AuthError {
    kind: ErrorKind,
    code: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl AuthError {
    fn header(code: &'static str, message: &'static str) -> Self {
        Self {
            kind: ErrorKind::Header,
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
        }
    }

    pub fn header_missing() -> Self {
        Self::header(AUTH_HEADER_MISSING, "Authorization header is missing")
    }

    pub fn header_bad_format() -> Self {
        Self::header(
            AUTH_HEADER_BAD_FORMAT,
            "Format should be Authorization: Bearer <token>",
        )
    }

    pub fn header_bad_scheme() -> Self {
        Self::header(AUTH_HEADER_BAD_SCHEME, "Authorization Scheme should be Bearer")
    }

    /// Failure from a caller-supplied extractor.
    ///
    /// Escalates as `invalid_token` with the given message.
    pub fn extraction(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: ErrorKind::Header,
            code: Cow::Borrowed(INVALID_TOKEN),
            message: message.into(),
        }
    }

    pub fn unauthorized(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let code = code.into();
        Self {
            kind: ErrorKind::Unauthorized,
            code: if code.is_empty() {
                Cow::Borrowed(INVALID_TOKEN)
            } else {
                code
            },
            message: message.into(),
        }
    }

    pub fn invalid_token_version(message: impl Into<Cow<'static, str>>) -> Self {
        Self::unauthorized(INVALID_TOKEN_VERSION, message)
    }

    pub fn expired_token(message: impl Into<Cow<'static, str>>) -> Self {
        Self::unauthorized(EXPIRED_TOKEN, message)
    }

    pub fn invalid_token(message: impl Into<Cow<'static, str>>) -> Self {
        Self::unauthorized(INVALID_TOKEN, message)
    }

    /// Same code and message, promoted to a 401.
    pub fn into_unauthorized(self) -> Self {
        Self::unauthorized(self.code, self.message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn http_status(&self) -> Option<StatusCode> {
        match self.kind {
            ErrorKind::Header => None,
            ErrorKind::Unauthorized => Some(StatusCode::UNAUTHORIZED),
        }
    }

    /// Malformed headers are rejected even when auth is optional.
    pub fn is_malformed_header(&self) -> bool {
        self.kind == ErrorKind::Header && self.code == AUTH_HEADER_BAD_FORMAT
    }
}
