//! Opaque card payload.
//!
//! Cards carry whatever fields their pack author wrote next to `id` and
//! `type`: display text, localized content, pick counts, draw counts.
//! The catalog doesn't interpret them. They are kept as raw JSON values
//! behind a small typed accessor API.
//!
//! ## Common Keys
//!
//! - `content`: card text, either a string or a `{locale: text}` map
//! - `pick`: number of response cards a prompt asks for
//! - `draw`: extra cards dealt before a prompt is answered

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Locale used when a requested translation is missing.
pub const FALLBACK_LOCALE: &str = "en";

/// Key for accessing card attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    /// Create a new attribute key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl std::borrow::Borrow<str> for AttributeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AttributeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Collection of payload attributes.
///
/// Deserializes from any JSON object; unknown shapes are preserved as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(FxHashMap<AttributeKey, Value>);

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<AttributeKey>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Get a raw attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get an integer attribute with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    /// Get a boolean attribute with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Get a plain text attribute.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Get a localized text attribute.
    ///
    /// Plain strings are returned for every locale. Locale maps fall back
    /// to [`FALLBACK_LOCALE`] when `locale` has no entry.
    #[must_use]
    pub fn get_localized(&self, key: &str, locale: &str) -> Option<&str> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            Value::Object(map) => map
                .get(locale)
                .or_else(|| map.get(FALLBACK_LOCALE))
                .and_then(Value::as_str),
            _ => None,
        }
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.0.as_str(), v))
    }
}
