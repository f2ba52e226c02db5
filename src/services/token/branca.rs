//! Branca tokens (XChaCha20-Poly1305, base62) via the `branca` crate.

use branca::errors::Error as BrancaError;

use super::{CodecError, TokenCodec};

pub const KEY_LEN: usize = 32;

/// Branca codec bound to a single 32-byte secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct BrancaCodec {
    key: [u8; KEY_LEN],
}

impl std::fmt::Debug for BrancaCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrancaCodec").finish_non_exhaustive()
    }
}

impl BrancaCodec {
    pub fn new(secret: &[u8]) -> Result<Self, CodecError> {
        let key: [u8; KEY_LEN] = secret.try_into().map_err(|_| {
            CodecError::Invalid(format!(
                "key must be {KEY_LEN} bytes, got {}",
                secret.len()
            ))
        })?;
        Ok(Self { key })
    }
}

fn now_unix() -> Result<u32, CodecError> {
    u32::try_from(chrono::Utc::now().timestamp())
        .map_err(|_| CodecError::Encode("current time out of range".into()))
}

impl From<BrancaError> for CodecError {
    fn from(e: BrancaError) -> Self {
        match e {
            BrancaError::InvalidTokenVersion => CodecError::InvalidVersion,
            BrancaError::ExpiredToken => CodecError::Expired,
            other => CodecError::Invalid(other.to_string()),
        }
    }
}

impl TokenCodec for BrancaCodec {
    fn encode(&self, payload: &str, timestamp: Option<u32>) -> Result<String, CodecError> {
        let timestamp = match timestamp {
            Some(ts) => ts,
            None => now_unix()?,
        };
        branca::encode(payload.as_bytes(), &self.key, timestamp)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, token: &str, ttl_seconds: Option<u32>) -> Result<String, CodecError> {
        let (timestamp, bytes) = branca::decode_with_timestamp(token, &self.key)?;

        // Age check in u64: timestamp + ttl may not fit in u32.
        if let Some(ttl) = ttl_seconds.filter(|ttl| *ttl != 0) {
            let deadline = u64::from(timestamp) + u64::from(ttl);
            let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
            if deadline < now {
                return Err(CodecError::Expired);
            }
        }

        String::from_utf8(bytes).map_err(|_| CodecError::Invalid("payload is not utf-8".into()))
    }
}
