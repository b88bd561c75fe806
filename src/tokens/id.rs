use super::TokenView;
use crate::claims::Claims;
use miniserde::json::Value;
use std::borrow::Cow;

/// OpenID Connect ID token view
///
/// Standard claims from OpenID Connect Core 1.0 Section 5.1 plus the ID token
/// hash claims. Boolean claims are strict: `"true"` as a string reads as `None`.
#[derive(Debug, Clone, Copy)]
pub struct IdToken<'a> {
    claims: &'a Claims,
}

impl<'a> IdToken<'a> {
    pub fn new(claims: &'a Claims) -> Self {
        Self { claims }
    }

    fn string(&self, name: &str) -> Option<Cow<'a, str>> {
        self.claims.get_string(name)
    }

    pub fn sub(&self) -> Option<Cow<'a, str>> {
        self.string("sub")
    }

    pub fn name(&self) -> Option<Cow<'a, str>> {
        self.string("name")
    }

    pub fn family_name(&self) -> Option<Cow<'a, str>> {
        self.string("family_name")
    }

    pub fn middle_name(&self) -> Option<Cow<'a, str>> {
        self.string("middle_name")
    }

    pub fn nickname(&self) -> Option<Cow<'a, str>> {
        self.string("nickname")
    }

    pub fn preferred_username(&self) -> Option<Cow<'a, str>> {
        self.string("preferred_username")
    }

    pub fn profile(&self) -> Option<Cow<'a, str>> {
        self.string("profile")
    }

    pub fn picture(&self) -> Option<Cow<'a, str>> {
        self.string("picture")
    }

    pub fn website(&self) -> Option<Cow<'a, str>> {
        self.string("website")
    }

    pub fn email(&self) -> Option<Cow<'a, str>> {
        self.string("email")
    }

    pub fn email_verified(&self) -> Option<bool> {
        self.claims.get_bool("email_verified")
    }

    pub fn gender(&self) -> Option<Cow<'a, str>> {
        self.string("gender")
    }

    /// Birthday in `YYYY-MM-DD` or `YYYY` form
    pub fn birthdate(&self) -> Option<Cow<'a, str>> {
        self.string("birthdate")
    }

    pub fn zoneinfo(&self) -> Option<Cow<'a, str>> {
        self.string("zoneinfo")
    }

    pub fn phone_number(&self) -> Option<Cow<'a, str>> {
        self.string("phone_number")
    }

    pub fn phone_number_verified(&self) -> Option<bool> {
        self.claims.get_bool("phone_number_verified")
    }

    /// Seconds since the epoch of the last profile update
    pub fn updated_at(&self) -> Option<i64> {
        self.claims.get_i64("updated_at")
    }

    /// Postal address, a JSON object
    pub fn address(&self) -> Option<&'a Value> {
        self.claims.get_claim("address")
    }

    /// Access token hash
    pub fn at_hash(&self) -> Option<Cow<'a, str>> {
        self.string("at_hash")
    }

    /// Authorization code hash
    pub fn c_hash(&self) -> Option<Cow<'a, str>> {
        self.string("c_hash")
    }

    /// Public key used to check the signature of a self-issued token
    pub fn sub_jwk(&self) -> Option<&'a Value> {
        self.claims.get_claim("sub_jwk")
    }
}

impl TokenView for IdToken<'_> {
    fn raw_claims(&self) -> &Claims {
        self.claims
    }
}
