/*
 * Responsibility
 * - 認証 (Authentication) の判定ロジック: 抽出 → decode → policy
 * - 認可 (Authorization: role/permission) はここでは扱わない
 * - HTTP framework への配線は middleware 側
 */
pub mod authenticator;
pub mod error;
pub mod extractor;
pub mod preflight;
pub mod types;

pub use authenticator::{AuthOptions, Authenticator, SecretError};
pub use error::{AuthError, ErrorKind};
pub use extractor::{BearerExtractor, TokenExtractor};
pub use types::{Identity, Outcome};
