//! Provider metadata discovery
//!
//! Fetches the [OpenID Connect Discovery 1.0](https://openid.net/specs/openid-connect-discovery-1_0.html)
//! document (`/.well-known/openid-configuration`) and the UMA 2.0 document
//! (`/.well-known/uma2-configuration`) from a provider base URL, and resolves
//! the key set they point at. Every metadata field is optional; providers
//! publish different subsets.

use crate::error::{Error, Result};
use crate::jwks::{KeySet, fetch_jwks, fetch_url};
use crate::limits::MAX_DISCOVERY_RESPONSE_SIZE;
use crate::url::validate_base_url;
use miniserde::Deserialize;

const OPENID_CONFIGURATION_PATH: &str = ".well-known/openid-configuration";
const UMA2_CONFIGURATION_PATH: &str = ".well-known/uma2-configuration";

/// Keycloak realm base URL: `{base_url}/auth/realms/{realm}`
pub fn keycloak_base_url(base_url: &str, realm: &str) -> String {
    format!("{base_url}/auth/realms/{realm}")
}

/// Build the URL to a well-known document from a base URL
fn build_well_known_url(base_url: &str, path: &str) -> Result<String> {
    validate_base_url(base_url)?;
    let base = base_url.trim_end_matches('/');
    Ok(format!("{base}/{path}"))
}

async fn fetch_document<T: Deserialize>(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
) -> Result<T> {
    let url = build_well_known_url(base_url, path)?;
    let bytes = fetch_url(client, &url, MAX_DISCOVERY_RESPONSE_SIZE).await?;

    let body = std::str::from_utf8(&bytes)
        .map_err(|e| Error::RemoteError(format!("discovery: utf8 decode failed: {e}")))?;

    miniserde::json::from_str(body)
        .map_err(|_| Error::RemoteError("discovery: invalid discovery json".into()))
}

async fn resolve_jwks_uri(client: &reqwest::Client, jwks_uri: Option<&str>) -> Result<KeySet> {
    match jwks_uri {
        Some(uri) if !uri.trim().is_empty() => fetch_jwks(client, uri).await,
        _ => Err(Error::RemoteError(
            "discovery: missing or empty jwks_uri".into(),
        )),
    }
}

/// OpenID provider metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpenIdConfiguration {
    pub issuer: Option<String>,

    // endpoints
    pub authorization_endpoint: Option<String>,
    pub end_session_endpoint: Option<String>,
    pub introspection_endpoint: Option<String>,
    pub jwks_uri: Option<String>,
    pub registration_endpoint: Option<String>,
    pub token_endpoint: Option<String>,
    pub token_introspection_endpoint: Option<String>,
    pub userinfo_endpoint: Option<String>,
    pub check_session_iframe: Option<String>,

    // supported values
    pub claims_parameter_supported: Option<bool>,
    pub claims_supported: Option<Vec<String>>,
    pub claim_types_supported: Option<Vec<String>>,
    pub code_challenge_methods_supported: Option<Vec<String>>,
    pub grant_types_supported: Option<Vec<String>>,
    pub id_token_encryption_enc_values_supported: Option<Vec<String>>,
    pub id_token_signing_alg_values_supported: Option<Vec<String>>,
    pub request_object_signing_alg_values_supported: Option<Vec<String>>,
    pub request_parameter_supported: Option<bool>,
    pub request_uri_parameter_supported: Option<bool>,
    pub response_modes_supported: Option<Vec<String>>,
    pub response_types_supported: Option<Vec<String>>,
    pub scopes_supported: Option<Vec<String>>,
    pub subject_types_supported: Option<Vec<String>>,
    pub token_endpoint_auth_methods_supported: Option<Vec<String>>,
    pub token_endpoint_auth_signing_alg_values_supported: Option<Vec<String>>,
    pub userinfo_signing_alg_values_supported: Option<Vec<String>>,
    pub tls_client_certificate_bound_access_tokens: Option<bool>,
}

impl OpenIdConfiguration {
    /// Fetch `{base_url}/.well-known/openid-configuration`
    pub async fn resolve(client: &reqwest::Client, base_url: &str) -> Result<Self> {
        fetch_document(client, base_url, OPENID_CONFIGURATION_PATH).await
    }

    /// Fetch the key set published at `jwks_uri`
    pub async fn resolve_jwks(&self, client: &reqwest::Client) -> Result<KeySet> {
        resolve_jwks_uri(client, self.jwks_uri.as_deref()).await
    }
}

/// UMA 2.0 authorization server metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Uma2Configuration {
    pub issuer: Option<String>,

    // endpoints
    pub authorization_endpoint: Option<String>,
    pub end_session_endpoint: Option<String>,
    pub introspection_endpoint: Option<String>,
    pub jwks_uri: Option<String>,
    pub permission_endpoint: Option<String>,
    pub policy_endpoint: Option<String>,
    pub registration_endpoint: Option<String>,
    pub resource_registration_endpoint: Option<String>,
    pub token_endpoint: Option<String>,
    pub token_introspection_endpoint: Option<String>,

    // supported values
    pub grant_types_supported: Option<Vec<String>>,
    pub response_modes_supported: Option<Vec<String>>,
    pub response_types_supported: Option<Vec<String>>,
    pub scopes_supported: Option<Vec<String>>,
    pub token_endpoint_auth_methods_supported: Option<Vec<String>>,
    pub token_endpoint_auth_signing_alg_values_supported: Option<Vec<String>>,
}

impl Uma2Configuration {
    /// Fetch `{base_url}/.well-known/uma2-configuration`
    pub async fn resolve(client: &reqwest::Client, base_url: &str) -> Result<Self> {
        fetch_document(client, base_url, UMA2_CONFIGURATION_PATH).await
    }

    /// Fetch the key set published at `jwks_uri`
    pub async fn resolve_jwks(&self, client: &reqwest::Client) -> Result<KeySet> {
        resolve_jwks_uri(client, self.jwks_uri.as_deref()).await
    }
}
