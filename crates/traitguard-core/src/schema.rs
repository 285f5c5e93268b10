//! # Identity Schema and Read-only Trait Extraction
//!
//! The webhook reads one thing from an identity schema: for each entry of
//! `properties.traits.properties`, whether the read-only annotation is set.
//!
//! ```json
//! {
//!   "type": "object",
//!   "properties": {
//!     "traits": {
//!       "properties": {
//!         "email":    { "type": "string", "zolfa.dev/kratos-readonly": true },
//!         "username": { "type": "string", "zolfa.dev/kratos-readonly": false }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Only the JSON value `true` marks a trait read-only. A missing annotation,
//! `false`, or any non-boolean value leaves the trait mutable; non-boolean
//! values are logged so schema authors can spot the typo.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Annotation key marking a trait as read-only.
pub const DEFAULT_READONLY_ANNOTATION: &str = "zolfa.dev/kratos-readonly";

/// The part of an identity schema the webhook understands.
///
/// Every level defaults to empty so a schema without traits parses to an
/// empty trait table. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentitySchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default)]
    pub properties: SchemaProperties,
}

/// Top-level `properties` of an identity schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaProperties {
    #[serde(default)]
    pub traits: TraitsSchema,
}

/// The `traits` object schema: one metadata object per trait.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraitsSchema {
    #[serde(default)]
    pub properties: BTreeMap<String, Map<String, Value>>,
}

/// Names of the traits whose values may never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImmutableTraits(BTreeSet<String>);

impl ImmutableTraits {
    /// An empty set: every trait is mutable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the read-only traits from `schema` using `annotation` as the key.
    pub fn from_schema(schema: &IdentitySchema, annotation: &str) -> Self {
        let mut names = BTreeSet::new();
        for (name, metadata) in &schema.properties.traits.properties {
            match metadata.get(annotation) {
                Some(Value::Bool(true)) => {
                    names.insert(name.clone());
                }
                Some(Value::Bool(false)) | None => {}
                Some(other) => {
                    tracing::warn!(
                        trait_name = %name,
                        annotation,
                        value = %other,
                        "read-only annotation is not a boolean; treating trait as mutable"
                    );
                }
            }
        }
        Self(names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Trait names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ImmutableTraits {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
