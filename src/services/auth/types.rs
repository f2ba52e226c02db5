/*
 * Responsibility
 * - 認証エンジンの結果型 (Outcome / Identity)
 * - request への書き込みは middleware 側の責務。ここは「型（契約）」だけを持つ
 */

/// Verified credential: the raw token and the payload the codec produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub token: String,
    pub decoded: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// CORS preflight announcing an `Authorization` header; not authenticated.
    Preflight,
    Authenticated(Identity),
    /// Auth is optional and no token was presented.
    Anonymous,
}

impl Outcome {
    pub fn into_identity(self) -> Option<Identity> {
        match self {
            Outcome::Authenticated(identity) => Some(identity),
            Outcome::Preflight | Outcome::Anonymous => None,
        }
    }
}
