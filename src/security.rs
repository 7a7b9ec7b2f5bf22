use axum::http::{header::COOKIE, HeaderMap};
use subtle::ConstantTimeEq;

/// Cookie set by the admin login form.
pub const AUTH_COOKIE: &str = "authToken";

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing session tokens and other sensitive values
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Value of the first cookie named `name` across all `Cookie` headers.
pub fn cookie_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// Whether the request carries an admin session.
///
/// Without a configured token any non-empty `authToken` cookie counts;
/// with one, the cookie must match it.
pub fn has_admin_session(headers: &HeaderMap, expected_token: Option<&str>) -> bool {
    match (cookie_value(headers, AUTH_COOKIE), expected_token) {
        (None, _) => false,
        (Some(token), None) => !token.is_empty(),
        (Some(token), Some(expected)) => constant_time_compare(token, expected),
    }
}
