//! The `agencia_session` cookie.
//!
//! Browsers get the session token as an HttpOnly cookie in addition to the
//! JSON body, so the front end never has to store it in script-readable
//! storage.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "agencia_session";

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(
    token: &str,
    max_age_secs: i64,
    secure: bool,
) -> Result<HeaderValue, AppError> {
    build(token, max_age_secs, secure)
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_cookie(secure: bool) -> Result<HeaderValue, AppError> {
    build("", 0, secure)
}

fn build(value: &str, max_age_secs: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid cookie value: {e}")))
}

/// Read the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_http_only() {
        let value = session_cookie("abc.def", 3600, false).unwrap();
        let s = value.to_str().unwrap();
        assert!(s.starts_with("agencia_session=abc.def;"));
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("Max-Age=3600"));
        assert!(!s.contains("Secure"));
    }

    #[test]
    fn secure_flag_is_optional() {
        let value = session_cookie("t", 1, true).unwrap();
        assert!(value.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let value = clear_cookie(false).unwrap();
        assert!(value.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn reads_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; agencia_session=tok123; lang=pt"));
        assert_eq!(session_token(&headers), Some("tok123"));
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
        headers.insert(COOKIE, HeaderValue::from_static("agencia_session="));
        assert_eq!(session_token(&headers), None);
    }
}
