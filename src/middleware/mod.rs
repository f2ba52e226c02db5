/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer 認証 / cors / http: request-id, limit, timeout, trace / security_headers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
