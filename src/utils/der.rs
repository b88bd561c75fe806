//! DER encoding for RSA JWK components
//!
//! Uses the RustCrypto `spki` and `der` crates to wrap modulus and exponent
//! into a SubjectPublicKeyInfo that `aws-lc-rs` accepts.

use crate::error::KeyFailure;
use der::{Encode, Sequence, asn1::UintRef};
use spki::{AlgorithmIdentifierOwned, ObjectIdentifier, SubjectPublicKeyInfoOwned};

/// rsaEncryption (PKCS #1)
const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// Largest accepted modulus in bytes (65536 bits)
const MAX_RSA_MODULUS_SIZE: usize = 8192;

fn material_error(operation: &str, details: impl std::fmt::Display) -> KeyFailure {
    KeyFailure::KeyMaterial(format!("{operation}: {details}"))
}

/// RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// Build a DER-encoded SubjectPublicKeyInfo from modulus (n) and exponent (e) bytes
pub(crate) fn rsa_spki_from_n_e(n: &[u8], e: &[u8]) -> Result<Vec<u8>, KeyFailure> {
    use der::asn1::BitString;

    if n.is_empty() || e.is_empty() {
        return Err(KeyFailure::KeyMaterial("rsa key has empty n or e".into()));
    }

    if n.len() > MAX_RSA_MODULUS_SIZE {
        return Err(material_error(
            "RSA modulus too large",
            format!("{} bytes (maximum: {MAX_RSA_MODULUS_SIZE} bytes)", n.len()),
        ));
    }

    let rsa_pubkey = RsaPublicKey {
        modulus: UintRef::new(n).map_err(|e| material_error("failed to encode RSA modulus", e))?,
        public_exponent: UintRef::new(e)
            .map_err(|e| material_error("failed to encode RSA exponent", e))?,
    };

    let rsa_pubkey_der = rsa_pubkey
        .to_der()
        .map_err(|e| material_error("failed to encode RSA public key", e))?;

    let spki = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: RSA_ENCRYPTION_OID,
            parameters: Some(der::asn1::AnyRef::NULL.into()),
        },
        subject_public_key: BitString::new(0, rsa_pubkey_der)
            .map_err(|e| material_error("failed to create bit string", e))?,
    };

    spki.to_der()
        .map_err(|e| material_error("failed to encode SPKI", e))
}
