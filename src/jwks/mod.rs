//! JSON Web Key Set (JWKS) module
//!
//! An in-memory key set parsed once from a JWKS document
//! ([RFC 7517](https://datatracker.ietf.org/doc/html/rfc7517)). The set keeps
//! keys in document order and never changes after construction.
mod jwk;

pub use jwk::Jwk;

use crate::error::{Error, Result};
use crate::limits::MAX_JWK_SET_SIZE;
use miniserde::Deserialize;

#[cfg(feature = "remote")]
use crate::limits::MAX_JWKS_RESPONSE_SIZE;
#[cfg(feature = "remote")]
use crate::url::validate_jwks_uri;

#[derive(Deserialize)]
struct JwkSetDocument {
    keys: Vec<Jwk>,
}

/// Ordered, immutable set of JSON Web Keys
///
/// Key IDs are not required to be unique and the set may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeySet {
    keys: Vec<Jwk>,
}

impl KeySet {
    /// Build a key set from already parsed keys
    pub fn new(keys: Vec<Jwk>) -> Result<Self> {
        if keys.len() > MAX_JWK_SET_SIZE {
            return Err(Error::KeySetTooLarge {
                key_count: keys.len(),
                max: MAX_JWK_SET_SIZE,
            });
        }
        Ok(Self { keys })
    }

    /// Parse a JWKS document (`{"keys": [...]}`)
    ///
    /// Fails without producing a partial set when the JSON is malformed or the
    /// `keys` array is missing.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: JwkSetDocument = miniserde::json::from_str(json)
            .map_err(|_| Error::KeySetConstruction("invalid jwks json".into()))?;
        Self::new(document.keys)
    }

    /// Parse a JWKS document from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let json = std::str::from_utf8(bytes)
            .map_err(|e| Error::KeySetConstruction(format!("utf8 decode failed: {e}")))?;
        Self::from_json(json)
    }

    /// All keys in document order
    pub fn keys(&self) -> &[Jwk] {
        &self.keys
    }

    /// Keys whose `kid` equals `kid`, in document order
    pub fn keys_by_id(&self, kid: &str) -> Vec<&Jwk> {
        self.keys
            .iter()
            .filter(|key| key.kid.as_deref() == Some(kid))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Fetch data from a URL using reqwest
#[cfg(feature = "remote")]
pub(crate) async fn fetch_url(
    client: &reqwest::Client,
    url: &str,
    max_size: usize,
) -> Result<Vec<u8>> {
    tracing::debug!(url, "fetching remote document");

    let response = client.get(url).send().await.map_err(|e| {
        tracing::warn!(url, error = %e, "request failed");
        Error::RemoteError(format!("network: {e}"))
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, %status, "unexpected response status");
        return Err(Error::RemoteError(format!("http: status {status}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::RemoteError(format!("network: {e}")))?
        .to_vec();

    if bytes.len() > max_size {
        tracing::warn!(url, size = bytes.len(), max = max_size, "response too large");
        return Err(Error::RemoteResponseTooLarge {
            size: bytes.len(),
            max: max_size,
        });
    }

    tracing::debug!(url, size = bytes.len(), "fetched remote document");
    Ok(bytes)
}

/// Fetch and parse a JWKS document from the given URI
///
/// Transport and HTTP status errors are `Error::RemoteError`; a body that is not
/// a JWKS document is `Error::KeySetConstruction`.
#[cfg(feature = "remote")]
pub async fn fetch_jwks(client: &reqwest::Client, jwks_uri: &str) -> Result<KeySet> {
    validate_jwks_uri(jwks_uri)?;

    let bytes = fetch_url(client, jwks_uri, MAX_JWKS_RESPONSE_SIZE).await?;
    let set = KeySet::from_slice(&bytes)?;

    tracing::debug!(jwks_uri, keys = set.len(), "loaded key set");
    Ok(set)
}
