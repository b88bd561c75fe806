//! Role-specific read-only views over verified claims
//!
//! Views borrow a [`Claims`] store and never verify anything themselves. Build
//! them from [`VerifiedToken::claims`](crate::VerifiedToken::claims) unless you
//! are deliberately inspecting an unverified token.
mod access;
mod id;
mod refresh;
mod response;

pub use access::AccessToken;
pub use id::IdToken;
pub use refresh::RefreshToken;
pub use response::TokenResponse;

use crate::claims::Claims;
use miniserde::json::Value;
use std::borrow::Cow;

/// Value of the `typ` claim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    Bearer,
    Refresh,
    /// OpenID Connect ID token (`ID`)
    Id,
    Other(String),
}

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Bearer => "Bearer",
            TokenType::Refresh => "Refresh",
            TokenType::Id => "ID",
            TokenType::Other(other) => other,
        }
    }
}

impl From<&str> for TokenType {
    fn from(value: &str) -> Self {
        match value {
            "Bearer" => TokenType::Bearer,
            "Refresh" => TokenType::Refresh,
            "ID" => TokenType::Id,
            other => TokenType::Other(other.into()),
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior shared by every token view
pub trait TokenView {
    /// The underlying claims store
    fn raw_claims(&self) -> &Claims;

    /// The `typ` claim, parsed
    fn token_type(&self) -> Option<TokenType> {
        self.raw_claims()
            .get_string("typ")
            .map(|typ| TokenType::from(typ.as_ref()))
    }
}

/// `scp` (ORY Hydra) takes precedence over `scope` (RFC 8693, Keycloak)
fn scope_claim(claims: &Claims) -> Option<&Value> {
    ["scp", "scope"]
        .into_iter()
        .find_map(|name| claims.get_claim(name))
}

fn scope(claims: &Claims) -> Option<Cow<'_, str>> {
    if claims.has_claim("scp") {
        claims.get_string("scp")
    } else {
        claims.get_string("scope")
    }
}

/// Scope as a list: a space-delimited string is split, an array yields its
/// string elements
fn scopes(claims: &Claims) -> Option<Vec<&str>> {
    match scope_claim(claims)? {
        Value::String(scope) => Some(scope.split_whitespace().collect()),
        Value::Array(values) => Some(
            values
                .iter()
                .filter_map(|value| match value {
                    Value::String(scope) => Some(scope.as_str()),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}
