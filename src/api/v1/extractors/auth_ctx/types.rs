/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token の decode / 期限チェックは services/auth 側の責務
 * - decoded は codec が返した payload そのまま (JSON であれば `claims` で parse する)
 */
use serde::de::DeserializeOwned;

use crate::services::auth::Identity;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `token` は提示された生の credential
/// - `decoded` は token codec が復号した payload
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub token: String,
    pub decoded: String,
}

impl AuthCtx {
    pub fn claims<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.decoded)
    }
}

impl From<Identity> for AuthCtx {
    fn from(identity: Identity) -> Self {
        Self {
            token: identity.token,
            decoded: identity.decoded,
        }
    }
}
