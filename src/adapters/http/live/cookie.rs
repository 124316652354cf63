//! Session cookie handling.
//!
//! The session token travels in a plain cookie; it is opaque to the server
//! and only ever used as a lookup key.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::domain::foundation::SessionToken;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "lightboard_session";

/// About one year; the token should outlive browser restarts.
const MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Extracts the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionToken::new(value.trim()).ok())
}

/// Returns the request's token, or a fresh one and the header that sets it.
pub fn resolve_token(headers: &HeaderMap) -> (SessionToken, Option<HeaderValue>) {
    match session_token(headers) {
        Some(token) => (token, None),
        None => {
            let token = SessionToken::generate();
            let cookie = set_cookie(&token);
            (token, cookie)
        }
    }
}

/// `Set-Cookie` value for `token`, or `None` if it is not a valid header value.
pub fn set_cookie(token: &SessionToken) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        token.as_str(),
        MAX_AGE_SECS
    ))
    .ok()
}
