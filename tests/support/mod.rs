//! Key generation and token signing for integration tests
//!
//! Keys are generated at test time: RSA through the `rsa` crate (converted to
//! an `aws-lc-rs` key pair for signing), ECDSA and HMAC through `aws-lc-rs`.

#![allow(dead_code)]

use aws_lc_rs::hmac;
use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, EcdsaKeyPair, KeyPair, RsaKeyPair};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jwks_tokens::KeySet;
use serde_json::{Value, json};
use std::sync::{Arc, OnceLock};

/// A key able to sign test tokens
#[derive(Clone)]
pub enum SigningKey {
    Ecdsa {
        algorithm: &'static str,
        crv: &'static str,
        pair: Arc<EcdsaKeyPair>,
    },
    Rsa {
        pair: Arc<RsaKeyPair>,
        n: Vec<u8>,
        e: Vec<u8>,
    },
    Hmac {
        secret: Vec<u8>,
    },
}

impl SigningKey {
    pub fn es256() -> Self {
        Self::ecdsa("ES256", "P-256", &signature::ECDSA_P256_SHA256_FIXED_SIGNING)
    }

    pub fn es384() -> Self {
        Self::ecdsa("ES384", "P-384", &signature::ECDSA_P384_SHA384_FIXED_SIGNING)
    }

    pub fn es512() -> Self {
        Self::ecdsa("ES512", "P-521", &signature::ECDSA_P521_SHA512_FIXED_SIGNING)
    }

    fn ecdsa(
        algorithm: &'static str,
        crv: &'static str,
        signing: &'static signature::EcdsaSigningAlgorithm,
    ) -> Self {
        let pair = EcdsaKeyPair::generate(signing).expect("failed to generate ECDSA key");
        Self::Ecdsa {
            algorithm,
            crv,
            pair: Arc::new(pair),
        }
    }

    /// A 2048-bit RSA key, generated once per test binary
    pub fn rsa() -> Self {
        static RSA_KEY: OnceLock<SigningKey> = OnceLock::new();
        RSA_KEY.get_or_init(generate_rsa).clone()
    }

    pub fn hmac(secret: &[u8]) -> Self {
        Self::Hmac {
            secret: secret.to_vec(),
        }
    }

    /// Public JWK for this key, with optional `kid` and `alg`
    pub fn jwk(&self, kid: Option<&str>, alg: Option<&str>) -> Value {
        let mut jwk = match self {
            SigningKey::Ecdsa { crv, pair, .. } => {
                let point = pair.public_key().as_ref();
                let len = (point.len() - 1) / 2;
                json!({
                    "kty": "EC",
                    "crv": crv,
                    "x": URL_SAFE_NO_PAD.encode(&point[1..1 + len]),
                    "y": URL_SAFE_NO_PAD.encode(&point[1 + len..]),
                })
            }
            SigningKey::Rsa { n, e, .. } => json!({
                "kty": "RSA",
                "n": URL_SAFE_NO_PAD.encode(n),
                "e": URL_SAFE_NO_PAD.encode(e),
            }),
            SigningKey::Hmac { secret } => json!({
                "kty": "oct",
                "k": URL_SAFE_NO_PAD.encode(secret),
            }),
        };
        if let Some(kid) = kid {
            jwk["kid"] = json!(kid);
        }
        if let Some(alg) = alg {
            jwk["alg"] = json!(alg);
        }
        jwk
    }

    /// Sign a token; `alg` must belong to this key's family
    pub fn sign(&self, alg: &str, kid: Option<&str>, claims: &Value) -> String {
        let mut header = json!({ "alg": alg, "typ": "JWT" });
        if let Some(kid) = kid {
            header["kid"] = json!(kid);
        }
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(claims.to_string())
        );
        let signature = self.signature(alg, signing_input.as_bytes());
        format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature))
    }

    fn signature(&self, alg: &str, message: &[u8]) -> Vec<u8> {
        let rng = SystemRandom::new();
        match self {
            SigningKey::Ecdsa {
                algorithm, pair, ..
            } => {
                assert_eq!(*algorithm, alg, "ECDSA key signs only {algorithm}");
                pair.sign(&rng, message)
                    .expect("failed to sign")
                    .as_ref()
                    .to_vec()
            }
            SigningKey::Rsa { pair, .. } => {
                let padding: &'static dyn signature::RsaEncoding = match alg {
                    "RS256" => &signature::RSA_PKCS1_SHA256,
                    "RS384" => &signature::RSA_PKCS1_SHA384,
                    "RS512" => &signature::RSA_PKCS1_SHA512,
                    "PS256" => &signature::RSA_PSS_SHA256,
                    "PS384" => &signature::RSA_PSS_SHA384,
                    "PS512" => &signature::RSA_PSS_SHA512,
                    other => panic!("not an RSA algorithm: {other}"),
                };
                let mut signature = vec![0u8; pair.public_modulus_len()];
                pair.sign(padding, &rng, message, &mut signature)
                    .expect("failed to sign");
                signature
            }
            SigningKey::Hmac { secret } => {
                let algorithm = match alg {
                    "HS256" => hmac::HMAC_SHA256,
                    "HS384" => hmac::HMAC_SHA384,
                    "HS512" => hmac::HMAC_SHA512,
                    other => panic!("not an HMAC algorithm: {other}"),
                };
                let key = hmac::Key::new(algorithm, secret);
                hmac::sign(&key, message).as_ref().to_vec()
            }
        }
    }
}

fn generate_rsa() -> SigningKey {
    use rsa::RsaPrivateKey;
    use rsa::pkcs8::EncodePrivateKey;
    use rsa::traits::PublicKeyParts;

    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate key");
    let public_key = private_key.to_public_key();

    let pkcs8_doc = private_key
        .to_pkcs8_der()
        .expect("failed to serialize private key");
    let pair = RsaKeyPair::from_pkcs8(pkcs8_doc.as_bytes()).expect("failed to load RSA key");

    SigningKey::Rsa {
        pair: Arc::new(pair),
        n: public_key.n().to_bytes_be(),
        e: public_key.e().to_bytes_be(),
    }
}

/// Build a key set from JWK values, in order
pub fn key_set(keys: &[Value]) -> KeySet {
    KeySet::from_json(&json!({ "keys": keys }).to_string()).expect("valid key set")
}

/// Replace the payload segment while keeping header and signature
pub fn tamper_payload(token: &str, claims: &Value) -> String {
    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);
    format!(
        "{}.{}.{}",
        parts[0],
        URL_SAFE_NO_PAD.encode(claims.to_string()),
        parts[2]
    )
}
