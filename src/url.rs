//! URL validation for remote fetches
//!
//! Provider base URLs and JWKS URIs are checked for size and structure before
//! any request is made.

use crate::error::{Error, Result};
use crate::limits::{MAX_BASE_URL_LENGTH, MAX_JWKS_URI_LENGTH};

fn validate_url_common(url: &str, max_length: usize, name: &str) -> Result<url::Url> {
    if url.trim().is_empty() {
        return Err(Error::RemoteError(format!("{name} cannot be empty")));
    }

    if url.len() > max_length {
        return Err(Error::RemoteUrlTooLong {
            length: url.len(),
            max: max_length,
        });
    }

    let parsed = url
        .parse::<url::Url>()
        .map_err(|e| Error::RemoteError(format!("invalid {name}: {e}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::RemoteError(format!(
            "{name} must use http or https scheme"
        )));
    }

    if parsed.host_str().is_none() {
        return Err(Error::RemoteError(format!("{name} must have a valid host")));
    }

    Ok(parsed)
}

/// Validate a provider base URL (the part before `/.well-known/...`)
pub(crate) fn validate_base_url(base_url: &str) -> Result<()> {
    validate_url_common(base_url, MAX_BASE_URL_LENGTH, "base URL")?;

    if base_url.contains('?') || base_url.contains('#') {
        return Err(Error::RemoteError(
            "base URL must not carry a query or fragment".into(),
        ));
    }

    Ok(())
}

pub(crate) fn validate_jwks_uri(uri: &str) -> Result<()> {
    validate_url_common(uri, MAX_JWKS_URI_LENGTH, "JWKS URI")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_valid() {
        assert!(validate_base_url("https://auth.example.com").is_ok());
        assert!(validate_base_url("https://auth.example.com/auth/realms/demo").is_ok());
        assert!(validate_base_url("http://localhost:8080/").is_ok());
    }

    #[test]
    fn test_validate_base_url_rejects_query() {
        assert!(matches!(
            validate_base_url("https://auth.example.com?realm=demo"),
            Err(Error::RemoteError(msg)) if msg.contains("query or fragment")
        ));
    }

    #[test]
    fn test_validate_base_url_invalid() {
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_validate_base_url_too_long() {
        let long_url = "https://example.com/".to_string() + &"a".repeat(MAX_BASE_URL_LENGTH);
        assert!(matches!(
            validate_base_url(&long_url),
            Err(Error::RemoteUrlTooLong { max, .. }) if max == MAX_BASE_URL_LENGTH
        ));
    }

    #[test]
    fn test_validate_jwks_uri() {
        assert!(validate_jwks_uri("https://auth.example.com/.well-known/jwks.json").is_ok());
        assert!(validate_jwks_uri("http://localhost:3000/jwks.json").is_ok());
        assert!(validate_jwks_uri("   ").is_err());
        assert!(validate_jwks_uri("ftp://example.com/jwks.json").is_err());
    }
}
