use super::{TokenView, scope, scopes};
use crate::claims::Claims;
use miniserde::json::Value;
use std::borrow::Cow;

/// Refresh token view
///
/// Refresh tokens are usually opaque to clients; Keycloak issues them as JWTs
/// signed with the realm key.
#[derive(Debug, Clone, Copy)]
pub struct RefreshToken<'a> {
    claims: &'a Claims,
}

impl<'a> RefreshToken<'a> {
    pub fn new(claims: &'a Claims) -> Self {
        Self { claims }
    }

    /// Authorized party, the client the token was issued to
    pub fn azp(&self) -> Option<Cow<'a, str>> {
        self.claims.get_string("azp")
    }

    pub fn exp(&self) -> Option<i64> {
        self.claims.get_i64("exp")
    }

    pub fn iat(&self) -> Option<i64> {
        self.claims.get_i64("iat")
    }

    pub fn iss(&self) -> Option<Cow<'a, str>> {
        self.claims.get_string("iss")
    }

    pub fn jti(&self) -> Option<Cow<'a, str>> {
        self.claims.get_string("jti")
    }

    pub fn sub(&self) -> Option<Cow<'a, str>> {
        self.claims.get_string("sub")
    }

    pub fn typ(&self) -> Option<Cow<'a, str>> {
        self.claims.get_string("typ")
    }

    pub fn aud(&self) -> Option<&'a Value> {
        self.claims.get_claim("aud")
    }

    pub fn nbf(&self) -> Option<i64> {
        self.claims.get_i64("nbf")
    }

    /// Scope, read from `scp` when present and `scope` otherwise
    pub fn scope(&self) -> Option<Cow<'a, str>> {
        scope(self.claims)
    }

    pub fn scopes(&self) -> Option<Vec<&'a str>> {
        scopes(self.claims)
    }
}

impl TokenView for RefreshToken<'_> {
    fn raw_claims(&self) -> &Claims {
        self.claims
    }
}
