//! Authentication decision engine.
//!
//! Per request: preflight bypass -> token extraction -> codec decode -> policy.
//! Policy summary:
//! - malformed `Authorization` header: always rejected
//! - missing header / wrong scheme: rejected only when auth is required
//! - a token that fails to decode: always rejected, even when auth is optional

use std::sync::Arc;

use axum::http::request::Parts;
use tracing::debug;

use super::error::AuthError;
use super::extractor::{BearerExtractor, TokenExtractor};
use super::preflight::is_auth_preflight;
use super::types::{Identity, Outcome};
use crate::services::token::{BrancaCodec, CodecError, TokenCodec};

pub const SECRET_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    #[error("secret is required")]
    Missing,
    #[error("secret length must be 32 bytes")]
    BadLength { len: usize },
}

/// Constructor-time options. Validated once by [`Authenticator::new`].
#[derive(Clone)]
pub struct AuthOptions {
    pub secret: Vec<u8>,
    pub is_auth_required: bool,
    pub token_extractor: Arc<dyn TokenExtractor>,
    /// `None` defers to the codec (no age limit for Branca).
    pub ttl_seconds: Option<u32>,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            secret: Vec::new(),
            is_auth_required: true,
            token_extractor: Arc::new(BearerExtractor),
            ttl_seconds: None,
        }
    }
}

impl std::fmt::Debug for AuthOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthOptions")
            .field("secret_len", &self.secret.len())
            .field("is_auth_required", &self.is_auth_required)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl AuthOptions {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    pub fn auth_required(mut self, required: bool) -> Self {
        self.is_auth_required = required;
        self
    }

    pub fn token_extractor(mut self, extractor: impl TokenExtractor + 'static) -> Self {
        self.token_extractor = Arc::new(extractor);
        self
    }

    pub fn ttl_seconds(mut self, ttl_seconds: Option<u32>) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    fn validate_secret(&self) -> Result<(), SecretError> {
        match self.secret.len() {
            0 => Err(SecretError::Missing),
            SECRET_LEN => Ok(()),
            len => Err(SecretError::BadLength { len }),
        }
    }
}

/// Immutable after construction; cheap to clone and share across requests.
#[derive(Clone)]
pub struct Authenticator {
    codec: Arc<dyn TokenCodec>,
    extractor: Arc<dyn TokenExtractor>,
    is_auth_required: bool,
    ttl_seconds: Option<u32>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("is_auth_required", &self.is_auth_required)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Build with the Branca codec keyed by `options.secret`.
    pub fn new(options: AuthOptions) -> Result<Self, SecretError> {
        options.validate_secret()?;
        let codec = BrancaCodec::new(&options.secret).map_err(|_| SecretError::BadLength {
            len: options.secret.len(),
        })?;
        Ok(Self::from_parts(options, Arc::new(codec)))
    }

    /// Build with another codec. The secret is still validated.
    pub fn with_codec(
        options: AuthOptions,
        codec: Arc<dyn TokenCodec>,
    ) -> Result<Self, SecretError> {
        options.validate_secret()?;
        Ok(Self::from_parts(options, codec))
    }

    fn from_parts(options: AuthOptions, codec: Arc<dyn TokenCodec>) -> Self {
        Self {
            codec,
            extractor: options.token_extractor,
            is_auth_required: options.is_auth_required,
            ttl_seconds: options.ttl_seconds,
        }
    }

    pub fn codec(&self) -> &dyn TokenCodec {
        self.codec.as_ref()
    }

    pub fn is_auth_required(&self) -> bool {
        self.is_auth_required
    }

    /// Decide the outcome for one request. Errors are always `Unauthorized`.
    pub fn authenticate(&self, parts: &Parts) -> Result<Outcome, AuthError> {
        if is_auth_preflight(parts) {
            debug!("cors preflight, skipping authentication");
            return Ok(Outcome::Preflight);
        }

        let token = match self.extractor.extract(parts) {
            Ok(token) => Some(token).filter(|t| !t.is_empty()),
            Err(err) if err.is_malformed_header() || self.is_auth_required => {
                return Err(err.into_unauthorized());
            }
            Err(err) => {
                debug!(code = err.code(), "no usable token, auth optional");
                None
            }
        };

        let decoded = match token.as_deref() {
            Some(token) => Some(self.decode(token)?).filter(|d| !d.is_empty()),
            None => None,
        };

        match (token, decoded) {
            (Some(token), Some(decoded)) => Ok(Outcome::Authenticated(Identity { token, decoded })),
            _ if self.is_auth_required => Err(AuthError::invalid_token("Token is not valid")),
            _ => Ok(Outcome::Anonymous),
        }
    }

    fn decode(&self, token: &str) -> Result<String, AuthError> {
        self.codec
            .decode(token, self.ttl_seconds)
            .map_err(|err| match err {
                CodecError::InvalidVersion => AuthError::invalid_token_version(err.to_string()),
                CodecError::Expired => AuthError::expired_token(err.to_string()),
                CodecError::Invalid(_) | CodecError::Encode(_) => {
                    debug!(reason = %err, "token decode failed");
                    AuthError::invalid_token("Failed to decode, token is invalid")
                }
            })
    }
}
