//! # Trait Values
//!
//! Identity traits are arbitrary JSON. [`TraitValue`] models them as a closed
//! variant type so equality is structural and recursive:
//!
//! | Variant  | Equal when                                             |
//! |----------|--------------------------------------------------------|
//! | `Null`   | both are `Null`                                        |
//! | `Bool`   | same boolean                                           |
//! | `Number` | same JSON number representation (`1` != `1.0`)         |
//! | `String` | same string                                            |
//! | `Array`  | same length, elements pairwise equal in order          |
//! | `Object` | same key set, values pairwise equal (key order ignored)|
//!
//! Values of different variants are never equal. `"1"` and `1` differ.
//!
//! Decoding goes through [`serde_json::Value`], whose visitor builds the tree
//! in one pass. Cost stays linear in body size however deep the nesting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// A single trait value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum TraitValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<TraitValue>),
    Object(BTreeMap<String, TraitValue>),
}

/// Trait name → value. Used for both the prior and the proposed traits.
pub type TraitSet = BTreeMap<String, TraitValue>;

impl TraitValue {
    /// `true` for the JSON `null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Serialize for TraitValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(map) => map.serialize(serializer),
        }
    }
}

impl Default for TraitValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<serde_json::Value> for TraitValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<TraitValue> for serde_json::Value {
    fn from(value: TraitValue) -> Self {
        match value {
            TraitValue::Null => Self::Null,
            TraitValue::Bool(b) => Self::Bool(b),
            TraitValue::Number(n) => Self::Number(n),
            TraitValue::String(s) => Self::String(s),
            TraitValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            TraitValue::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for TraitValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for TraitValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for TraitValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for TraitValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}
