/*
 * Responsibility
 * - ドメインロジック (HTTP 非依存に近い層)
 * - auth: 認証判定エンジン / token: token codec
 */
pub mod auth;
pub mod token;
