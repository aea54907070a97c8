//! Item-name patterns and their wire codec.
//!
//! On the wire a pattern is its source text, or `null`. Any other token is an
//! interop error.

use std::fmt;

use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::errors::ProtocolError;
use crate::json::token_kind;

/// A compiled item-name pattern that remembers its source text.
#[derive(Clone, Debug)]
pub struct ItemPattern {
    source: String,
    // anchored copy so `matches` tests the whole name
    whole: Regex,
}

impl ItemPattern {
    pub fn new(source: &str) -> Result<Self, ProtocolError> {
        let whole = Regex::new(&format!("^(?:{source})$")).map_err(|e| ProtocolError::InvalidPattern {
            source_text: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { source: source.to_string(), whole })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when the entire name matches the pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.whole.is_match(name)
    }
}

impl PartialEq for ItemPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ItemPattern {}

impl fmt::Display for ItemPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

pub fn encode(pattern: Option<&ItemPattern>) -> Value {
    match pattern {
        None => Value::Null,
        Some(p) => Value::String(p.source.clone()),
    }
}

pub fn decode(token: &Value) -> Result<Option<ItemPattern>, ProtocolError> {
    match token {
        Value::Null => Ok(None),
        Value::String(s) => ItemPattern::new(s).map(Some),
        other => Err(ProtocolError::UnsupportedEncoding { token: token_kind(other) }),
    }
}

impl Serialize for ItemPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for ItemPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PatternVisitor;

        impl<'de> Visitor<'de> for PatternVisitor {
            type Value = ItemPattern;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a regex pattern string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemPattern, E> {
                ItemPattern::new(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(PatternVisitor)
    }
}
