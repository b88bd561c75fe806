//! JWK (JSON Web Key) struct and conversion

use crate::algorithm::{AlgorithmFamily, AlgorithmType, KeyMaterial};
use crate::error::KeyFailure;
use crate::limits::{MAX_JWK_COORDINATE_SIZE, MAX_JWK_E_SIZE, MAX_JWK_K_SIZE, MAX_JWK_N_SIZE};
use crate::utils::base64url;
use miniserde::Deserialize;

/// JSON Web Key (JWK) structure
///
/// All fields are optional so that a key set with keys this crate cannot use
/// (encryption keys, unknown key types) still parses. Validation happens when a
/// key is converted for a specific algorithm, not during parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Jwk {
    /// Key type (`RSA`, `EC` or `oct`)
    pub kty: Option<String>,
    /// Key ID
    pub kid: Option<String>,
    /// Algorithm (advisory per RFC 7517)
    pub alg: Option<String>,
    /// Key use (RFC 7517 Section 4.2)
    ///
    /// `sig` for signature verification, `enc` for encryption. If absent, the
    /// key may be used for any purpose.
    #[serde(rename = "use")]
    pub key_use: Option<String>,
    // RSA fields
    /// RSA modulus (Base64URL-encoded)
    pub n: Option<String>,
    /// RSA exponent (Base64URL-encoded)
    pub e: Option<String>,
    // ECDSA fields
    /// Elliptic curve name (`P-256`, `P-384`, `P-521`)
    pub crv: Option<String>,
    /// ECDSA x-coordinate (Base64URL-encoded)
    pub x: Option<String>,
    /// ECDSA y-coordinate (Base64URL-encoded)
    pub y: Option<String>,
    // Symmetric fields
    /// Symmetric key value (Base64URL-encoded)
    pub k: Option<String>,
}

impl Jwk {
    /// Key ID, or an empty string when the key has none
    pub fn kid(&self) -> &str {
        self.kid.as_deref().unwrap_or_default()
    }

    /// Convert the JWK into verification key material for `algorithm`
    ///
    /// The token header's algorithm is authoritative. The JWK must carry the
    /// matching key type, must not be restricted to a use other than `sig`, and
    /// its `alg`, when present, must equal the token algorithm. With
    /// `require_alg` a JWK without `alg` is rejected as well.
    pub(crate) fn to_key(
        &self,
        algorithm: &AlgorithmType,
        require_alg: bool,
    ) -> Result<KeyMaterial, KeyFailure> {
        self.validate_structure(algorithm)?;
        self.validate_algorithm(algorithm, require_alg)?;

        match algorithm.family() {
            AlgorithmFamily::Rsa => self.to_rsa_key(),
            AlgorithmFamily::Ecdsa => self.to_ecdsa_key(algorithm),
            AlgorithmFamily::Hmac => self.to_hmac_key(),
        }
    }

    /// Validate key type and key use
    fn validate_structure(&self, algorithm: &AlgorithmType) -> Result<(), KeyFailure> {
        let expected_kty = algorithm.family().key_type();

        match self.kty.as_deref() {
            Some(kty) if kty == expected_kty => {}
            Some(kty) => {
                return Err(KeyFailure::KeyTypeMismatch {
                    expected: expected_kty.into(),
                    found: kty.into(),
                });
            }
            None => {
                return Err(KeyFailure::KeyTypeMismatch {
                    expected: expected_kty.into(),
                    found: "none".into(),
                });
            }
        }

        if let Some(use_val) = &self.key_use {
            if use_val != "sig" {
                return Err(KeyFailure::KeyUseMismatch(use_val.clone()));
            }
        }

        Ok(())
    }

    /// Validate JWK algorithm field against token algorithm
    fn validate_algorithm(
        &self,
        algorithm: &AlgorithmType,
        require_alg: bool,
    ) -> Result<(), KeyFailure> {
        match &self.alg {
            Some(jwk_alg) if jwk_alg != algorithm.as_str() => Err(KeyFailure::AlgorithmMismatch {
                jwk_alg: jwk_alg.clone(),
                token_alg: algorithm.as_str().into(),
            }),
            None if require_alg => Err(KeyFailure::AlgorithmMissing),
            _ => Ok(()),
        }
    }

    /// Convert JWK to DER-encoded RSA public key
    fn to_rsa_key(&self) -> Result<KeyMaterial, KeyFailure> {
        const MAX_DECODED_JWK_N: usize = (MAX_JWK_N_SIZE * 3) / 4;
        const MAX_DECODED_JWK_E: usize = (MAX_JWK_E_SIZE * 3) / 4;

        let n = required_field("n", self.n.as_deref(), MAX_JWK_N_SIZE)?;
        let e = required_field("e", self.e.as_deref(), MAX_JWK_E_SIZE)?;

        let n_bytes = decode_field("n", n, MAX_DECODED_JWK_N)?;
        let e_bytes = decode_field("e", e, MAX_DECODED_JWK_E)?;

        crate::utils::der::rsa_spki_from_n_e(&n_bytes, &e_bytes).map(KeyMaterial::Public)
    }

    /// Convert JWK to an uncompressed EC point (`0x04 || x || y`)
    fn to_ecdsa_key(&self, algorithm: &AlgorithmType) -> Result<KeyMaterial, KeyFailure> {
        const MAX_DECODED_JWK_COORDINATE: usize = (MAX_JWK_COORDINATE_SIZE * 3) / 4;

        let curve = algorithm.curve().ok_or_else(|| {
            KeyFailure::KeyMaterial(format!("{algorithm} is not an ECDSA algorithm"))
        })?;

        match self.crv.as_deref() {
            Some(crv) if crv == curve.name() => {}
            found => {
                return Err(KeyFailure::CurveMismatch {
                    algorithm: algorithm.to_string(),
                    expected: curve.name().into(),
                    found: found.unwrap_or("none").into(),
                });
            }
        }

        let x = required_field("x", self.x.as_deref(), MAX_JWK_COORDINATE_SIZE)?;
        let y = required_field("y", self.y.as_deref(), MAX_JWK_COORDINATE_SIZE)?;

        let x_bytes = decode_field("x", x, MAX_DECODED_JWK_COORDINATE)?;
        let y_bytes = decode_field("y", y, MAX_DECODED_JWK_COORDINATE)?;

        let len = curve.coordinate_len();
        if x_bytes.len() != len || y_bytes.len() != len {
            return Err(KeyFailure::KeyMaterial(format!(
                "{} coordinates must be {len} bytes, found x: {}, y: {}",
                curve.name(),
                x_bytes.len(),
                y_bytes.len()
            )));
        }

        let mut point = Vec::with_capacity(1 + 2 * len);
        point.push(0x04);
        point.extend_from_slice(&x_bytes);
        point.extend_from_slice(&y_bytes);
        Ok(KeyMaterial::Public(point))
    }

    /// Convert JWK to a raw HMAC secret
    fn to_hmac_key(&self) -> Result<KeyMaterial, KeyFailure> {
        const MAX_DECODED_JWK_K: usize = (MAX_JWK_K_SIZE * 3) / 4;

        let k = required_field("k", self.k.as_deref(), MAX_JWK_K_SIZE)?;
        let secret = decode_field("k", k, MAX_DECODED_JWK_K)?;
        if secret.is_empty() {
            return Err(KeyFailure::KeyMaterial("oct key has an empty k".into()));
        }
        Ok(KeyMaterial::Secret(secret))
    }
}

/// Extract a required Base64URL field and check its encoded size
fn required_field<'a>(
    field: &str,
    value: Option<&'a str>,
    max: usize,
) -> Result<&'a str, KeyFailure> {
    let value =
        value.ok_or_else(|| KeyFailure::KeyMaterial(format!("key is missing field '{field}'")))?;
    if value.len() > max {
        return Err(KeyFailure::FieldTooLarge {
            field: field.into(),
            size: value.len(),
            max,
        });
    }
    Ok(value)
}

fn decode_field(field: &str, value: &str, max: usize) -> Result<Vec<u8>, KeyFailure> {
    base64url::decode_bytes(value, max)
        .map_err(|e| KeyFailure::KeyMaterial(format!("failed to decode {field}: {e}")))
}
