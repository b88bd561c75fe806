//! # jwks-tokens
//!
//! Verify bearer tokens issued by an OpenID Connect / OAuth 2.0 provider
//! against the provider's JSON Web Key Set, then read their claims through
//! typed views for access, ID and refresh tokens.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwks_tokens::{AccessToken, KeySet, verify};
//!
//! let keys = KeySet::from_json(jwks_json)?;
//! let verified = verify(raw_token, &keys)?;
//!
//! let access = AccessToken::new(verified.claims());
//! println!("subject: {:?}, scope: {:?}", access.sub(), access.scopes());
//! ```
//!
//! ## Key Selection
//!
//! When the token header names a `kid`, only keys with exactly that ID are
//! tried. An unknown `kid` fails with [`Error::UnknownSigningKey`] even if some
//! other key in the set would verify the token. Several keys may share an ID;
//! they are tried in set order and, if all of them fail, the last failure is
//! reported as [`Error::SignatureOrClaims`].
//!
//! Without a `kid` every key is tried in set order and the first one that
//! verifies wins.
//!
//! ## Algorithms
//!
//! - **RSA**: RS256, RS384, RS512, PS256, PS384, PS512
//! - **ECDSA**: ES256, ES384, ES512 (P-256, P-384, P-521)
//! - **HMAC**: HS256, HS384, HS512, opt-in through [`AlgorithmPolicy`]
//!
//! `none` is always rejected. Signature math is done by `aws-lc-rs`.
//!
//! ## Claims
//!
//! [`Claims`] keeps the payload as untyped JSON and coerces on read, so a
//! numeric `sub` still reads as a string and a float `exp` still reads as an
//! integer. Expiry and not-before are exposed but never enforced here.
//!
//! ## Remote (feature `remote`, enabled by default)
//!
//! [`jwks::fetch_jwks`] downloads a key set, and [`discovery`] resolves the
//! `.well-known` OpenID and UMA2 configuration documents of a provider.

mod algorithm;
mod claims;
mod error;
mod header;
pub mod jwks;
pub mod tokens;
mod utils;
mod validator;

#[cfg(feature = "remote")]
pub mod discovery;
#[cfg(feature = "remote")]
mod url;

pub(crate) mod limits;

// Public Interface
pub use algorithm::{AlgorithmPolicy, AlgorithmType};
pub use claims::Claims;
pub use error::{Error, KeyFailure, Result};
pub use header::TokenHeader;
pub use jwks::{Jwk, KeySet};
pub use tokens::{AccessToken, IdToken, RefreshToken, TokenResponse, TokenType, TokenView};
pub use validator::{Verifier, VerifiedToken, dangerous_decode_unverified, verify};

/// Re-exported so callers can match on raw claim values
pub use miniserde::json::Value;
