//! Client identification utilities
//!
//! Pulls caller credentials and addressing information out of HTTP headers.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Error when extracting credentials from a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("Missing Authorization header")]
    MissingToken,
    #[error("Authorization header must use the Bearer scheme")]
    Malformed,
}

/// Extract the bearer token from the `Authorization` header
///
/// The scheme is matched case-insensitively and surrounding whitespace is
/// ignored.
///
/// ## Returns
/// * `Ok(&str)` - the raw token
/// * `Err(CredentialError::MissingToken)` - no Authorization header
/// * `Err(CredentialError::Malformed)` - other scheme, empty token, or non-ASCII value
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, CredentialError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(CredentialError::MissingToken)?
        .to_str()
        .map_err(|_| CredentialError::Malformed)?
        .trim();

    let (scheme, token) = value.split_once(' ').ok_or(CredentialError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(CredentialError::Malformed);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(CredentialError::Malformed);
    }
    Ok(token)
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_token_case_insensitive_scheme() {
        let headers = with_auth("bearer   token-123 ");
        assert_eq!(extract_bearer_token(&headers), Ok("token-123"));
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        let headers = HeaderMap::new();
        assert_eq!(
            extract_bearer_token(&headers),
            Err(CredentialError::MissingToken)
        );
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        assert_eq!(
            extract_bearer_token(&with_auth("Basic dXNlcjpwYXNz")),
            Err(CredentialError::Malformed)
        );
        assert_eq!(
            extract_bearer_token(&with_auth("Bearer")),
            Err(CredentialError::Malformed)
        );
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }
}
