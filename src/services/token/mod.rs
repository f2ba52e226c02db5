/*
 * Responsibility
 * - Token codec の境界 (encode/decode)
 * - 暗号方式の実装はこの下に閉じ込め、認証エンジンは trait だけに依存する
 */
pub mod branca;

pub use branca::BrancaCodec;

/// Failure reported by a token codec.
///
/// Version and expiry get their own variants so the auth engine can map them
/// to stable error codes; everything else collapses into `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Invalid token version.")]
    InvalidVersion,
    #[error("Token is expired.")]
    Expired,
    #[error("{0}")]
    Invalid(String),
    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Symmetric encrypt-then-MAC token format.
///
/// Implementations are CPU-bound and synchronous; they are shared across
/// requests, so they must be `Send + Sync`.
pub trait TokenCodec: Send + Sync {
    /// Encode `payload`. `timestamp` (unix seconds) defaults to now.
    fn encode(&self, payload: &str, timestamp: Option<u32>) -> Result<String, CodecError>;

    /// Decode `token`. `ttl_seconds = None` disables the age check.
    fn decode(&self, token: &str, ttl_seconds: Option<u32>) -> Result<String, CodecError>;
}
