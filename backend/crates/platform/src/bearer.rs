//! Bearer token extraction
//!
//! Parses `Authorization: Bearer <token>` from request headers.

use axum::http::{HeaderMap, header};

/// Authentication scheme accepted by [`extract_bearer_token`]
pub const BEARER_SCHEME: &str = "Bearer";

/// Error when extracting a bearer token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Malformed Authorization header")]
    Malformed,
}

/// Extract the token from an `Authorization` header.
///
/// Well-formed means the header splits on single spaces into exactly two
/// parts, the first being the case-sensitive scheme `Bearer` and the second
/// a non-empty token. Anything else (`bearer x`, `Bearer`, `Bearer a b`,
/// `Bearer  x`, `Basic x`) is [`BearerError::Malformed`]. An empty header
/// counts as missing.
///
/// ## Returns
/// * `Ok(&str)` - the token
/// * `Err(BearerError)` - header missing or malformed
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    if value.is_empty() {
        return Err(BearerError::MissingHeader);
    }

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if *scheme == BEARER_SCHEME && !token.is_empty() => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_valid_bearer() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            extract_bearer_token(&headers),
            Err(BearerError::MissingHeader)
        );
        assert_eq!(
            extract_bearer_token(&headers_with("")),
            Err(BearerError::MissingHeader)
        );
    }

    #[test]
    fn test_malformed_headers() {
        for value in [
            "Bearer",
            "Bearer ",
            "bearer abc",
            "Basic abc",
            "Bearer abc def",
            "Bearer  abc",
            "abc",
        ] {
            assert_eq!(
                extract_bearer_token(&headers_with(value)),
                Err(BearerError::Malformed),
                "{value:?} should be malformed"
            );
        }
    }
}
