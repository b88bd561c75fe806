//! Base64URL encoding/decoding per RFC 4648
//!
//! This module provides a thin wrapper around the `base64` crate with
//! size limit validation for security.

use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Decode Base64URL string to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Reject oversized input before allocating the decoded buffer
    if input.len() / 4 * 3 > max_size + 3 {
        return Err(Error::MalformedToken(format!(
            "Base64URL segment exceeds limit: {} bytes encoded (max decoded: {max_size})",
            input.len()
        )));
    }

    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::MalformedToken(format!("Base64URL decode failed: {e}")))?;

    if result.len() > max_size {
        return Err(Error::MalformedToken(format!(
            "Decoded size exceeds limit: {} bytes (max: {max_size})",
            result.len()
        )));
    }

    Ok(result)
}

/// Decode Base64URL string to UTF-8 string with size limit
pub(crate) fn decode_string(input: &str, max_size: usize) -> Result<String> {
    decode_bytes(input, max_size).and_then(|bytes| {
        String::from_utf8(bytes).map_err(|e| Error::MalformedToken(format!("Invalid UTF-8: {e}")))
    })
}
