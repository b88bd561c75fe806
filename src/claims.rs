//! Claims store
//!
//! Claims are kept as untyped JSON values and coerced on read. Identity providers
//! disagree on encodings (a `sub` sent as a number, timestamps sent as floats), so
//! accessors are lenient: strings render any JSON value as text, numbers accept any
//! numeric representation, and booleans stay strict. Coercion never fails with an
//! error; a claim that is absent or of the wrong type reads as `None`.

use crate::error::KeyFailure;
use miniserde::json::{self, Number, Object, Value};
use std::borrow::Cow;

/// Decoded token claims
#[derive(Debug, Clone)]
pub struct Claims {
    inner: Object,
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            inner: Object::new(),
        }
    }
}

impl Claims {
    /// Parse a JSON object into claims
    ///
    /// Anything other than a JSON object (including valid JSON arrays or scalars)
    /// is rejected.
    pub fn from_json(json: &str) -> Result<Self, KeyFailure> {
        match json::from_str::<Value>(json) {
            Ok(Value::Object(inner)) => Ok(Self { inner }),
            Ok(_) => Err(KeyFailure::ClaimsInvalid(
                "payload is not a JSON object".into(),
            )),
            Err(e) => Err(KeyFailure::ClaimsInvalid(format!("invalid JSON: {e}"))),
        }
    }

    /// True if the claim is present, even when its value is `null`
    pub fn has_claim(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Raw claim value, without coercion
    pub fn get_claim(&self, name: &str) -> Option<&Value> {
        self.inner.get(name)
    }

    /// Claim as text
    ///
    /// Strings are returned verbatim. Other JSON values are rendered: integers
    /// and floats as decimal text, booleans as `true`/`false`, `null` as `null`,
    /// arrays and objects as compact JSON.
    pub fn get_string(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get_claim(name).map(render)
    }

    /// Claim as a signed integer
    ///
    /// Accepts unsigned, signed and floating point numbers. Floats are truncated
    /// toward zero. Values outside the `i64` range read as `None`.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get_claim(name)? {
            Value::Number(Number::I64(value)) => Some(*value),
            Value::Number(Number::U64(value)) => i64::try_from(*value).ok(),
            Value::Number(Number::F64(value)) => {
                let truncated = value.trunc();
                // i64::MAX as f64 rounds up to 2^63, which is out of range
                (i64::MIN as f64..i64::MAX as f64)
                    .contains(&truncated)
                    .then_some(truncated as i64)
            }
            _ => None,
        }
    }

    /// Claim as a float, from any numeric representation
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.get_claim(name)? {
            Value::Number(Number::I64(value)) => Some(*value as f64),
            Value::Number(Number::U64(value)) => Some(*value as f64),
            Value::Number(Number::F64(value)) => Some(*value),
            _ => None,
        }
    }

    /// Claim as a boolean; no truthiness coercion from numbers or strings
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get_claim(name)? {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Iterate over claim names and values in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if the token carried no claims
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn render(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(Number::I64(number)) => Cow::Owned(number.to_string()),
        Value::Number(Number::U64(number)) => Cow::Owned(number.to_string()),
        Value::Number(Number::F64(number)) => Cow::Owned(number.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(json::to_string(value)),
    }
}
