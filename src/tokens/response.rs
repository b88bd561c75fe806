use crate::error::{Error, Result};
use miniserde::Deserialize;

/// Token endpoint response body (RFC 6749 Section 5.1)
///
/// Includes the Keycloak extensions `refresh_expires_in`, `not-before-policy`
/// and `session_state`. The tokens inside are raw strings; verify them with a
/// [`Verifier`](crate::Verifier) before trusting any claim.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    /// Access token lifetime in seconds
    pub expires_in: Option<i64>,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: Option<i64>,
    #[serde(rename = "not-before-policy")]
    pub not_before_policy: Option<i64>,
    pub session_state: Option<String>,
    pub scope: Option<String>,
}

impl TokenResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        miniserde::json::from_str(json)
            .map_err(|_| Error::TokenResponseInvalid("invalid token response json".into()))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let json = std::str::from_utf8(bytes)
            .map_err(|e| Error::TokenResponseInvalid(format!("utf8 decode failed: {e}")))?;
        Self::from_json(json)
    }
}
