use miniserde::Deserialize;

/// JWT header structure
///
/// Represents the JOSE header of a compact JWS. Only `alg` is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Key ID (for JWKS key selection)
    #[serde(rename = "kid")]
    pub key_id: Option<String>,

    /// Media type of the complete token, usually `JWT`
    #[serde(rename = "typ")]
    pub token_type: Option<String>,

    /// Content type of the payload
    #[serde(rename = "cty")]
    pub content_type: Option<String>,
}

impl TokenHeader {
    /// Key ID, treating an empty string the same as an absent one
    pub fn kid(&self) -> Option<&str> {
        self.key_id.as_deref().filter(|kid| !kid.is_empty())
    }
}
