use super::{TokenView, scope, scopes};
use crate::claims::Claims;
use miniserde::json::Value;
use std::borrow::Cow;

/// OAuth 2.0 access token view
#[derive(Debug, Clone, Copy)]
pub struct AccessToken<'a> {
    claims: &'a Claims,
}

impl<'a> AccessToken<'a> {
    pub fn new(claims: &'a Claims) -> Self {
        Self { claims }
    }

    pub fn client_id(&self) -> Option<Cow<'a, str>> {
        self.claims.get_string("client_id")
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

    /// Audience, uncoerced: a string or an array of strings
    pub fn aud(&self) -> Option<&'a Value> {
        self.claims.get_claim("aud")
    }

    pub fn nbf(&self) -> Option<i64> {
        self.claims.get_i64("nbf")
    }

    /// Granted scope, read from `scp` when present and `scope` otherwise
    pub fn scope(&self) -> Option<Cow<'a, str>> {
        scope(self.claims)
    }

    /// Granted scope as individual values
    pub fn scopes(&self) -> Option<Vec<&'a str>> {
        scopes(self.claims)
    }
}

impl TokenView for AccessToken<'_> {
    fn raw_claims(&self) -> &Claims {
        self.claims
    }
}
