//! Algorithm support for JWS signature verification
use crate::error::KeyFailure;

use aws_lc_rs::hmac;
use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// Algorithm identifier from the JWT header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
    ES256,
    ES384,
    ES512,
}

/// Key family an algorithm operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlgorithmFamily {
    Hmac,
    Rsa,
    Ecdsa,
}

impl AlgorithmFamily {
    /// The JWK `kty` value keys of this family carry
    pub(crate) const fn key_type(&self) -> &'static str {
        match self {
            AlgorithmFamily::Hmac => "oct",
            AlgorithmFamily::Rsa => "RSA",
            AlgorithmFamily::Ecdsa => "EC",
        }
    }
}

/// Named elliptic curve used by an ECDSA algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EcdsaCurve {
    P256,
    P384,
    P521,
}

impl EcdsaCurve {
    /// The JWK `crv` value for this curve
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            EcdsaCurve::P256 => "P-256",
            EcdsaCurve::P384 => "P-384",
            EcdsaCurve::P521 => "P-521",
        }
    }

    /// Length of one affine coordinate in bytes
    pub(crate) const fn coordinate_len(&self) -> usize {
        match self {
            EcdsaCurve::P256 => 32,
            EcdsaCurve::P384 => 48,
            EcdsaCurve::P521 => 66,
        }
    }
}

/// Verification key material derived from a JWK
#[derive(Clone)]
pub(crate) enum KeyMaterial {
    /// DER SubjectPublicKeyInfo (RSA) or uncompressed point (EC)
    Public(Vec<u8>),
    /// Raw HMAC secret
    Secret(Vec<u8>),
}

impl AlgorithmType {
    /// Parse the header `alg`; its length is bounded when the header is parsed
    pub(crate) fn from_str(s: &str) -> Result<Self, KeyFailure> {
        match s {
            "none" => Err(KeyFailure::AlgorithmNoneRejected),
            "HS256" => Ok(AlgorithmType::HS256),
            "HS384" => Ok(AlgorithmType::HS384),
            "HS512" => Ok(AlgorithmType::HS512),
            "RS256" => Ok(AlgorithmType::RS256),
            "RS384" => Ok(AlgorithmType::RS384),
            "RS512" => Ok(AlgorithmType::RS512),
            "PS256" => Ok(AlgorithmType::PS256),
            "PS384" => Ok(AlgorithmType::PS384),
            "PS512" => Ok(AlgorithmType::PS512),
            "ES256" => Ok(AlgorithmType::ES256),
            "ES384" => Ok(AlgorithmType::ES384),
            "ES512" => Ok(AlgorithmType::ES512),
            _ => Err(KeyFailure::AlgorithmUnsupported(s.into())),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::HS256 => "HS256",
            AlgorithmType::HS384 => "HS384",
            AlgorithmType::HS512 => "HS512",
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::RS384 => "RS384",
            AlgorithmType::RS512 => "RS512",
            AlgorithmType::PS256 => "PS256",
            AlgorithmType::PS384 => "PS384",
            AlgorithmType::PS512 => "PS512",
            AlgorithmType::ES256 => "ES256",
            AlgorithmType::ES384 => "ES384",
            AlgorithmType::ES512 => "ES512",
        }
    }

    pub(crate) const fn family(&self) -> AlgorithmFamily {
        match self {
            AlgorithmType::HS256 | AlgorithmType::HS384 | AlgorithmType::HS512 => {
                AlgorithmFamily::Hmac
            }
            AlgorithmType::RS256
            | AlgorithmType::RS384
            | AlgorithmType::RS512
            | AlgorithmType::PS256
            | AlgorithmType::PS384
            | AlgorithmType::PS512 => AlgorithmFamily::Rsa,
            AlgorithmType::ES256 | AlgorithmType::ES384 | AlgorithmType::ES512 => {
                AlgorithmFamily::Ecdsa
            }
        }
    }

    /// Curve required by ECDSA algorithms
    pub(crate) const fn curve(&self) -> Option<EcdsaCurve> {
        match self {
            AlgorithmType::ES256 => Some(EcdsaCurve::P256),
            AlgorithmType::ES384 => Some(EcdsaCurve::P384),
            AlgorithmType::ES512 => Some(EcdsaCurve::P521),
            _ => None,
        }
    }

    /// Asymmetric verification algorithm
    ///
    /// JWS ECDSA signatures use the fixed-length R||S form (RFC 7518 Section 3.4),
    /// not ASN.1 DER.
    fn public_key_algorithm(&self) -> Option<&'static dyn signature::VerificationAlgorithm> {
        match self {
            AlgorithmType::RS256 => Some(&signature::RSA_PKCS1_2048_8192_SHA256),
            AlgorithmType::RS384 => Some(&signature::RSA_PKCS1_2048_8192_SHA384),
            AlgorithmType::RS512 => Some(&signature::RSA_PKCS1_2048_8192_SHA512),
            AlgorithmType::PS256 => Some(&signature::RSA_PSS_2048_8192_SHA256),
            AlgorithmType::PS384 => Some(&signature::RSA_PSS_2048_8192_SHA384),
            AlgorithmType::PS512 => Some(&signature::RSA_PSS_2048_8192_SHA512),
            AlgorithmType::ES256 => Some(&signature::ECDSA_P256_SHA256_FIXED),
            AlgorithmType::ES384 => Some(&signature::ECDSA_P384_SHA384_FIXED),
            AlgorithmType::ES512 => Some(&signature::ECDSA_P521_SHA512_FIXED),
            _ => None,
        }
    }

    fn hmac_algorithm(&self) -> Option<hmac::Algorithm> {
        match self {
            AlgorithmType::HS256 => Some(hmac::HMAC_SHA256),
            AlgorithmType::HS384 => Some(hmac::HMAC_SHA384),
            AlgorithmType::HS512 => Some(hmac::HMAC_SHA512),
            _ => None,
        }
    }

    /// Verify a decoded signature over the signing input (`header.payload`)
    pub(crate) fn verify_signature(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key: &KeyMaterial,
    ) -> std::result::Result<(), KeyFailure> {
        match (key, self.public_key_algorithm(), self.hmac_algorithm()) {
            (KeyMaterial::Public(der), Some(algorithm), _) => {
                UnparsedPublicKey::new(algorithm, der)
                    .verify(signing_input, signature)
                    .map_err(|_| KeyFailure::SignatureInvalid)
            }
            // hmac::verify compares tags in constant time
            (KeyMaterial::Secret(secret), _, Some(algorithm)) => {
                let key = hmac::Key::new(algorithm, secret);
                hmac::verify(&key, signing_input, signature)
                    .map_err(|_| KeyFailure::SignatureInvalid)
            }
            (KeyMaterial::Public(_), None, _) => Err(KeyFailure::KeyTypeMismatch {
                expected: "oct".into(),
                found: "public key".into(),
            }),
            (KeyMaterial::Secret(_), _, None) => Err(KeyFailure::KeyTypeMismatch {
                expected: self.family().key_type().into(),
                found: "oct".into(),
            }),
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Policy for allowed algorithms
///
/// The default policy allows every supported asymmetric algorithm. HMAC must be
/// enabled explicitly since a shared secret in a published key set is unusual.
#[derive(Debug, Clone)]
pub struct AlgorithmPolicy {
    allowed: Vec<AlgorithmType>,
}

impl AlgorithmPolicy {
    /// Policy that allows only RS256
    pub fn rs256_only() -> Self {
        Self::allow_only(vec![AlgorithmType::RS256])
    }

    /// Policy that allows only ES256
    pub fn es256_only() -> Self {
        Self::allow_only(vec![AlgorithmType::ES256])
    }

    /// Policy that allows all RSA algorithms (RS256, RS384, RS512, PS256, PS384, PS512)
    pub fn rsa_all() -> Self {
        Self::allow_only(vec![
            AlgorithmType::RS256,
            AlgorithmType::RS384,
            AlgorithmType::RS512,
            AlgorithmType::PS256,
            AlgorithmType::PS384,
            AlgorithmType::PS512,
        ])
    }

    /// Policy that allows all ECDSA algorithms (ES256, ES384, ES512)
    pub fn ecdsa_all() -> Self {
        Self::allow_only(vec![
            AlgorithmType::ES256,
            AlgorithmType::ES384,
            AlgorithmType::ES512,
        ])
    }

    /// Policy that allows all HMAC algorithms (HS256, HS384, HS512)
    pub fn hmac_all() -> Self {
        Self::allow_only(vec![
            AlgorithmType::HS256,
            AlgorithmType::HS384,
            AlgorithmType::HS512,
        ])
    }

    /// Policy that allows every RSA and ECDSA algorithm
    pub fn asymmetric() -> Self {
        let mut allowed = Self::rsa_all().allowed;
        allowed.extend(Self::ecdsa_all().allowed);
        Self::allow_only(allowed)
    }

    /// Policy that allows every supported algorithm, HMAC included
    pub fn all() -> Self {
        let mut allowed = Self::hmac_all().allowed;
        allowed.extend(Self::asymmetric().allowed);
        Self::allow_only(allowed)
    }

    /// Create a policy that allows only specific algorithms
    pub fn allow_only(algorithms: Vec<AlgorithmType>) -> Self {
        Self {
            allowed: algorithms,
        }
    }

    /// Validate algorithm against policy
    pub(crate) fn validate(&self, algorithm: &AlgorithmType) -> Result<(), KeyFailure> {
        if self.is_allowed(algorithm) {
            Ok(())
        } else {
            Err(KeyFailure::AlgorithmNotAllowed {
                found: algorithm.to_string(),
                allowed: self.allowed.iter().map(ToString::to_string).collect(),
            })
        }
    }

    /// Check if an algorithm is allowed
    pub fn is_allowed(&self, algorithm: &AlgorithmType) -> bool {
        self.allowed.contains(algorithm)
    }
}

impl Default for AlgorithmPolicy {
    fn default() -> Self {
        Self::asymmetric()
    }
}
