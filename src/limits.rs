//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum length for provider base URLs (2048 characters)
#[cfg(feature = "remote")]
pub(crate) const MAX_BASE_URL_LENGTH: usize = 2048;

/// Maximum length for JWKS URIs (2048 characters)
#[cfg(feature = "remote")]
pub(crate) const MAX_JWKS_URI_LENGTH: usize = 2048;

/// Maximum size for a discovery document response (64KB)
#[cfg(feature = "remote")]
pub(crate) const MAX_DISCOVERY_RESPONSE_SIZE: usize = 64 * 1024;

/// Maximum size for a JWKS response (512KB)
#[cfg(feature = "remote")]
pub(crate) const MAX_JWKS_RESPONSE_SIZE: usize = 512 * 1024;

/// Maximum number of keys in a JWK set (100 keys)
pub(crate) const MAX_JWK_SET_SIZE: usize = 100;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded JWT header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes; HMAC and ECDSA signatures are far smaller
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

// ============================================================================
// JWK field size limits
// ============================================================================

/// Maximum size for Base64URL-encoded RSA modulus (n) field (12KB)
pub(crate) const MAX_JWK_N_SIZE: usize = 12 * 1024;

/// Maximum size for Base64URL-encoded RSA exponent (e) field (64 bytes)
pub(crate) const MAX_JWK_E_SIZE: usize = 64;

/// Maximum size for Base64URL-encoded EC coordinates (x, y) (128 bytes)
/// P-521 coordinates are 66 bytes raw, 88 bytes encoded
pub(crate) const MAX_JWK_COORDINATE_SIZE: usize = 128;

/// Maximum size for Base64URL-encoded symmetric key (k) field (1KB)
pub(crate) const MAX_JWK_K_SIZE: usize = 1024;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for algorithm (alg) field in JWT header (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum length for key ID (kid) field in JWT header (256 bytes)
pub(crate) const MAX_KID_LENGTH: usize = 256;
