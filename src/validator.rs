//! Token verification against a key set
//!
//! The verifier parses a compact JWS, picks candidate keys from a [`KeySet`]
//! and returns the decoded claims of the first key that verifies the
//! signature. Selection follows the header's `kid`:
//!
//! - `kid` present: only keys with exactly that ID are tried, in set order. No
//!   such key is [`Error::UnknownSigningKey`]; when every candidate fails the
//!   last failure is returned as [`Error::SignatureOrClaims`].
//! - `kid` absent or empty: every key is tried in set order and the first
//!   success wins. Exhausting the set is [`Error::UnknownSigningKey`].
//!
//! The header algorithm and the configured [`AlgorithmPolicy`] are checked per
//! candidate key, so a token that no key can be selected for is always
//! [`Error::UnknownSigningKey`]. Claims are decoded only after a signature
//! check passes. Verification is a pure function of its inputs; nothing is
//! cached and nothing is logged.

use crate::algorithm::{AlgorithmPolicy, AlgorithmType};
use crate::claims::Claims;
use crate::error::{Error, KeyFailure, Result};
use crate::header::TokenHeader;
use crate::jwks::{Jwk, KeySet};
use crate::limits::{
    MAX_ALG_LENGTH, MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_KID_LENGTH, MAX_TOKEN_LENGTH,
};
use crate::utils::{base64url, bounds::validate_field_size};

/// Token verifier
///
/// Configured once and reused for any number of tokens and key sets.
///
/// ```ignore
/// let verifier = Verifier::new()
///     .algorithms(AlgorithmPolicy::rsa_all())
///     .require_key_algorithm(true)
///     .build();
/// let token = verifier.verify(raw, &keys)?;
/// ```
#[derive(Debug, Clone)]
pub struct Verifier {
    config_algorithms: AlgorithmPolicy,
    config_require_key_algorithm: bool,
}

impl Verifier {
    /// Create a verifier that accepts every asymmetric algorithm
    pub fn new() -> Self {
        Self {
            config_algorithms: AlgorithmPolicy::default(),
            config_require_key_algorithm: false,
        }
    }

    /// Configure the algorithm policy
    ///
    /// A selected key fails with [`KeyFailure::AlgorithmNotAllowed`] when the
    /// header algorithm is outside the policy.
    pub fn algorithms(&mut self, policy: AlgorithmPolicy) -> &mut Self {
        self.config_algorithms = policy;
        self
    }

    /// Reject keys that do not declare an `alg`
    pub fn require_key_algorithm(&mut self, required: bool) -> &mut Self {
        self.config_require_key_algorithm = required;
        self
    }

    pub fn build(&mut self) -> Self {
        self.clone()
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Successfully verified token
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    header: TokenHeader,
    claims: Claims,
}

impl VerifiedToken {
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_claims(self) -> Claims {
        self.claims
    }

    pub fn into_parts(self) -> (TokenHeader, Claims) {
        (self.header, self.claims)
    }
}

/// Token split into its decoded parts
struct ParsedToken<'a> {
    signing_input: &'a str,
    header: TokenHeader,
    payload: Vec<u8>,
    signature: Vec<u8>,
}

impl Verifier {
    /// Verify `token` against `keys`
    pub fn verify(&self, token: &str, keys: &KeySet) -> Result<VerifiedToken> {
        let parsed = parse_token(token)?;

        let algorithm = AlgorithmType::from_str(&parsed.header.algorithm).and_then(|algorithm| {
            self.config_algorithms.validate(&algorithm)?;
            Ok(algorithm)
        });

        let signature = base64url::decode_bytes(parsed.signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;
        let parsed = ParsedToken {
            signing_input: parsed.signing_input,
            header: parsed.header,
            payload: parsed.payload,
            signature,
        };

        match parsed.header.kid().map(str::to_owned) {
            Some(kid) => {
                let mut last_failure = None;
                for jwk in keys.keys_by_id(&kid) {
                    match self.attempt(&parsed, &algorithm, jwk) {
                        Ok(claims) => return Ok(verified(parsed, claims)),
                        Err(failure) => last_failure = Some(failure),
                    }
                }
                match last_failure {
                    Some(cause) => Err(Error::SignatureOrClaims { kid, cause }),
                    None => Err(Error::UnknownSigningKey { kid: Some(kid) }),
                }
            }
            None => {
                for jwk in keys.keys() {
                    if let Ok(claims) = self.attempt(&parsed, &algorithm, jwk) {
                        return Ok(verified(parsed, claims));
                    }
                }
                Err(Error::UnknownSigningKey { kid: None })
            }
        }
    }

    /// Single (token, key) verification attempt
    fn attempt(
        &self,
        parsed: &ParsedToken<'_>,
        algorithm: &std::result::Result<AlgorithmType, KeyFailure>,
        jwk: &Jwk,
    ) -> std::result::Result<Claims, KeyFailure> {
        let algorithm = algorithm.as_ref().map_err(Clone::clone)?;
        let key = jwk.to_key(algorithm, self.config_require_key_algorithm)?;
        algorithm.verify_signature(parsed.signing_input.as_bytes(), &parsed.signature, &key)?;

        let json = std::str::from_utf8(&parsed.payload)
            .map_err(|e| KeyFailure::ClaimsInvalid(format!("payload is not UTF-8: {e}")))?;
        Claims::from_json(json)
    }
}

fn verified(parsed: ParsedToken<'_>, claims: Claims) -> VerifiedToken {
    VerifiedToken {
        header: parsed.header,
        claims,
    }
}

/// Verify `token` against `keys` with the default [`Verifier`]
pub fn verify(token: &str, keys: &KeySet) -> Result<VerifiedToken> {
    Verifier::default().verify(token, keys)
}

/// Decode header and claims WITHOUT verifying the signature
///
/// The result carries no authenticity guarantee whatsoever. Use it only to
/// inspect tokens, never to make access decisions. Any algorithm is accepted
/// and the signature segment is ignored beyond being present.
pub fn dangerous_decode_unverified(token: &str) -> Result<(TokenHeader, Claims)> {
    let parsed = parse_token(token)?;

    let json = std::str::from_utf8(&parsed.payload)
        .map_err(|e| Error::MalformedToken(format!("Invalid UTF-8: {e}")))?;
    let claims = Claims::from_json(json).map_err(|e| Error::MalformedToken(e.to_string()))?;

    Ok((parsed.header, claims))
}

/// Token after the structural parse, before the signature is decoded
struct RawParts<'a> {
    signing_input: &'a str,
    signature_b64: &'a str,
    header: TokenHeader,
    payload: Vec<u8>,
}

/// Split the token, decode and bound-check the header, decode the payload
fn parse_token(token: &str) -> Result<RawParts<'_>> {
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: token.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    let mut parts = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::MalformedToken(
            "token must have exactly three segments".into(),
        ));
    };

    let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
    let header: TokenHeader = miniserde::json::from_str(&header_json)
        .map_err(|e| Error::MalformedToken(format!("Failed to parse header: {e}")))?;

    validate_field_size("alg", &header.algorithm, MAX_ALG_LENGTH)?;
    if let Some(kid) = &header.key_id {
        validate_field_size("kid", kid, MAX_KID_LENGTH)?;
    }

    let payload = base64url::decode_bytes(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;

    // header_b64 '.' payload_b64
    let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];

    Ok(RawParts {
        signing_input,
        signature_b64,
        header,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lc_rs::hmac;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    const SECRET: &[u8] = b"a-shared-secret-of-reasonable-length";

    fn hs256_token(header: &str, payload: &str, secret: &[u8]) -> String {
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        let tag = hmac::sign(&key, signing_input.as_bytes());
        format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(tag.as_ref()))
    }

    fn oct_keys(entries: &[(&str, &[u8])]) -> KeySet {
        let keys: Vec<String> = entries
            .iter()
            .map(|(kid, secret)| {
                format!(
                    r#"{{"kty":"oct","kid":"{kid}","alg":"HS256","k":"{}"}}"#,
                    URL_SAFE_NO_PAD.encode(secret)
                )
            })
            .collect();
        KeySet::from_json(&format!(r#"{{"keys":[{}]}}"#, keys.join(","))).unwrap()
    }

    fn hmac_verifier() -> Verifier {
        Verifier::new().algorithms(AlgorithmPolicy::hmac_all()).build()
    }

    #[test]
    fn test_verify_with_kid() {
        let token = hs256_token(
            r#"{"alg":"HS256","kid":"b"}"#,
            r#"{"sub":"user","exp":1618153201}"#,
            SECRET,
        );
        let keys = oct_keys(&[("a", b"other-secret"), ("b", SECRET)]);

        let verified = hmac_verifier().verify(&token, &keys).unwrap();
        assert_eq!(verified.header().kid(), Some("b"));
        assert_eq!(verified.claims().get_string("sub").as_deref(), Some("user"));
        assert_eq!(verified.claims().get_i64("exp"), Some(1618153201));
    }

    #[test]
    fn test_verify_kid_not_in_set() {
        let token = hs256_token(r#"{"alg":"HS256","kid":"c"}"#, r#"{"sub":"user"}"#, SECRET);
        let keys = oct_keys(&[("a", SECRET)]);

        assert_eq!(
            hmac_verifier().verify(&token, &keys).err(),
            Some(Error::UnknownSigningKey {
                kid: Some("c".into())
            })
        );
    }

    #[test]
    fn test_verify_last_candidate_failure_wins() {
        let token = hs256_token(r#"{"alg":"HS256","kid":"dup"}"#, r#"{"sub":"user"}"#, SECRET);
        let keys = KeySet::from_json(&format!(
            r#"{{"keys":[
                {{"kty":"RSA","kid":"dup","n":"AQAB","e":"AQAB"}},
                {{"kty":"oct","kid":"dup","k":"{}"}}
            ]}}"#,
            URL_SAFE_NO_PAD.encode(b"wrong-secret")
        ))
        .unwrap();

        assert_eq!(
            hmac_verifier().verify(&token, &keys).err(),
            Some(Error::SignatureOrClaims {
                kid: "dup".into(),
                cause: KeyFailure::SignatureInvalid
            })
        );
    }

    #[test]
    fn test_verify_duplicate_kid_second_candidate_succeeds() {
        let token = hs256_token(r#"{"alg":"HS256","kid":"dup"}"#, r#"{"sub":"user"}"#, SECRET);
        let keys = oct_keys(&[("dup", b"wrong-secret"), ("dup", SECRET)]);
        assert!(hmac_verifier().verify(&token, &keys).is_ok());
    }

    #[test]
    fn test_verify_brute_force_without_kid() {
        let token = hs256_token(r#"{"alg":"HS256"}"#, r#"{"sub":"user"}"#, SECRET);
        let keys = oct_keys(&[("a", b"other-secret"), ("b", SECRET)]);
        assert!(hmac_verifier().verify(&token, &keys).is_ok());

        let empty_kid = hs256_token(r#"{"alg":"HS256","kid":""}"#, r#"{"sub":"user"}"#, SECRET);
        assert!(hmac_verifier().verify(&empty_kid, &keys).is_ok());
    }

    #[test]
    fn test_verify_brute_force_exhausted() {
        let token = hs256_token(r#"{"alg":"HS256"}"#, r#"{"sub":"user"}"#, SECRET);

        assert_eq!(
            hmac_verifier().verify(&token, &KeySet::default()).err(),
            Some(Error::UnknownSigningKey { kid: None })
        );
        assert_eq!(
            hmac_verifier()
                .verify(&token, &oct_keys(&[("a", b"other-secret")]))
                .err(),
            Some(Error::UnknownSigningKey { kid: None })
        );
    }

    #[test]
    fn test_verify_signed_invalid_payload_json() {
        let token = hs256_token(r#"{"alg":"HS256","kid":"a"}"#, "not json", SECRET);
        let keys = oct_keys(&[("a", SECRET)]);

        assert!(matches!(
            hmac_verifier().verify(&token, &keys),
            Err(Error::SignatureOrClaims { cause: KeyFailure::ClaimsInvalid(_), .. })
        ));
    }

    #[test]
    fn test_verify_default_policy_rejects_hmac() {
        let token = hs256_token(r#"{"alg":"HS256","kid":"a"}"#, r#"{"sub":"user"}"#, SECRET);
        let keys = oct_keys(&[("a", SECRET)]);

        assert!(matches!(
            verify(&token, &keys),
            Err(Error::SignatureOrClaims {
                cause: KeyFailure::AlgorithmNotAllowed { found, .. },
                ..
            }) if found == "HS256"
        ));
    }

    #[test]
    fn test_verify_disallowed_algorithm_without_candidate() {
        let keys = oct_keys(&[("a", SECRET)]);

        let unknown_kid = hs256_token(r#"{"alg":"HS256","kid":"c"}"#, r#"{"sub":"user"}"#, SECRET);
        assert_eq!(
            verify(&unknown_kid, &keys).err(),
            Some(Error::UnknownSigningKey {
                kid: Some("c".into())
            })
        );

        let no_kid = hs256_token(r#"{"alg":"HS256"}"#, r#"{"sub":"user"}"#, SECRET);
        assert_eq!(
            verify(&no_kid, &keys).err(),
            Some(Error::UnknownSigningKey { kid: None })
        );
    }

    #[test]
    fn test_verify_require_key_algorithm() {
        let token = hs256_token(r#"{"alg":"HS256","kid":"a"}"#, r#"{"sub":"user"}"#, SECRET);
        let keys = KeySet::from_json(&format!(
            r#"{{"keys":[{{"kty":"oct","kid":"a","k":"{}"}}]}}"#,
            URL_SAFE_NO_PAD.encode(SECRET)
        ))
        .unwrap();

        assert!(hmac_verifier().verify(&token, &keys).is_ok());

        let strict = Verifier::new()
            .algorithms(AlgorithmPolicy::hmac_all())
            .require_key_algorithm(true)
            .build();
        assert_eq!(
            strict.verify(&token, &keys).err(),
            Some(Error::SignatureOrClaims {
                kid: "a".into(),
                cause: KeyFailure::AlgorithmMissing
            })
        );
    }

    #[test]
    fn test_verify_malformed_tokens() {
        let keys = oct_keys(&[("a", SECRET)]);
        let verifier = hmac_verifier();

        for token in [
            "",
            "only.two",
            "a.b.c.d",
            "!!!.e30.sig",
            // header is not JSON
            "bm90IGpzb24.e30.c2ln",
            // header without alg
            "eyJraWQiOiJhIn0.e30.c2ln",
            // payload is not base64url
            "eyJhbGciOiJIUzI1NiJ9.!!!.c2ln",
            // signature is not base64url
            "eyJhbGciOiJIUzI1NiJ9.e30.!!!",
        ] {
            assert!(
                matches!(verifier.verify(token, &keys), Err(Error::MalformedToken(_))),
                "expected MalformedToken for {token:?}"
            );
        }
    }

    #[test]
    fn test_verify_token_too_large() {
        let token = "a".repeat(MAX_TOKEN_LENGTH + 1);
        assert!(matches!(
            verify(&token, &KeySet::default()),
            Err(Error::TokenTooLarge { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_none_algorithm() {
        let token = format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"none","kid":"a"}"#),
            URL_SAFE_NO_PAD.encode("{}")
        );
        assert_eq!(
            verify(&token, &oct_keys(&[("a", SECRET)])).err(),
            Some(Error::SignatureOrClaims {
                kid: "a".into(),
                cause: KeyFailure::AlgorithmNoneRejected
            })
        );
        assert_eq!(
            verify(&token, &KeySet::default()).err(),
            Some(Error::UnknownSigningKey {
                kid: Some("a".into())
            })
        );
    }

    #[test]
    fn test_verify_kid_too_long() {
        let header = format!(r#"{{"alg":"HS256","kid":"{}"}}"#, "k".repeat(MAX_KID_LENGTH + 1));
        let token = hs256_token(&header, "{}", SECRET);
        assert!(matches!(
            hmac_verifier().verify(&token, &KeySet::default()),
            Err(Error::HeaderFieldTooLong { field, .. }) if field == "kid"
        ));
    }

    #[test]
    fn test_dangerous_decode_unverified() {
        let token = hs256_token(
            r#"{"alg":"HS256","typ":"JWT"}"#,
            r#"{"sub":"user","scp":["openid"]}"#,
            b"never-checked",
        );
        let (header, claims) = dangerous_decode_unverified(&token).unwrap();
        assert_eq!(header.algorithm, "HS256");
        assert_eq!(header.token_type.as_deref(), Some("JWT"));
        assert_eq!(claims.get_string("sub").as_deref(), Some("user"));
    }

    #[test]
    fn test_dangerous_decode_unverified_payload_errors() {
        let token = hs256_token(r#"{"alg":"HS256"}"#, "[1,2]", SECRET);
        assert!(matches!(
            dangerous_decode_unverified(&token),
            Err(Error::MalformedToken(msg)) if msg.contains("not a JSON object")
        ));
    }
}
