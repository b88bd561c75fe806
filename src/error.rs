//! Errors for jwks-tokens

use thiserror::Error;

/// Errors returned while parsing, verifying or decoding tokens and key sets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Header field '{field}' too long: {length} bytes (maximum: {max} bytes)")]
    HeaderFieldTooLong {
        field: String,
        length: usize,
        max: usize,
    },

    // ============================================================================
    // Key Resolution Errors
    // ============================================================================
    /// No key in the set verified the token, or the declared `kid` has no match
    #[error("Signing key not known: kid {kid:?} not in key set")]
    UnknownSigningKey { kid: Option<String> },

    /// A key selected by `kid` was tried and failed; `cause` is the last failure
    #[error("Verification with key '{kid}' failed: {cause}")]
    SignatureOrClaims { kid: String, cause: KeyFailure },

    // ============================================================================
    // Key Set Errors
    // ============================================================================
    #[error("Key set construction failed: {0}")]
    KeySetConstruction(String),

    #[error("Key set too large: {key_count} keys (maximum: {max} keys)")]
    KeySetTooLarge { key_count: usize, max: usize },

    // ============================================================================
    // Token Response Errors
    // ============================================================================
    #[error("Token response parsing failed: {0}")]
    TokenResponseInvalid(String),

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[cfg(feature = "remote")]
    #[error("Remote error: {0}")]
    RemoteError(String),

    #[cfg(feature = "remote")]
    #[error("Remote URL too long: {length} characters (maximum: {max} characters)")]
    RemoteUrlTooLong { length: usize, max: usize },

    #[cfg(feature = "remote")]
    #[error("Remote response too large: {size} bytes (maximum: {max} bytes)")]
    RemoteResponseTooLarge { size: usize, max: usize },
}

/// Why a single (token, key) verification attempt failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyFailure {
    #[error("algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("the 'none' algorithm is rejected (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("algorithm '{found}' not allowed. Allowed: {allowed:?}")]
    AlgorithmNotAllowed { found: String, allowed: Vec<String> },

    #[error("error in cryptographic primitive: signature verification failed")]
    SignatureInvalid,

    #[error("key type mismatch: expected {expected}, found {found}")]
    KeyTypeMismatch { expected: String, found: String },

    #[error("key use mismatch: expected 'sig', found '{0}'")]
    KeyUseMismatch(String),

    #[error("JWK algorithm mismatch: JWK alg '{jwk_alg}' doesn't match token algorithm '{token_alg}'")]
    AlgorithmMismatch { jwk_alg: String, token_alg: String },

    #[error("JWK alg field required but missing")]
    AlgorithmMissing,

    #[error("curve mismatch: {algorithm} requires {expected}, found {found}")]
    CurveMismatch {
        algorithm: String,
        expected: String,
        found: String,
    },

    #[error("JWK field '{field}' too large: {size} bytes (maximum: {max} bytes)")]
    FieldTooLarge {
        field: String,
        size: usize,
        max: usize,
    },

    #[error("invalid key material: {0}")]
    KeyMaterial(String),

    #[error("claims could not be decoded: {0}")]
    ClaimsInvalid(String),
}

/// Result type alias for jwks-tokens operations
pub type Result<T> = std::result::Result<T, Error>;
