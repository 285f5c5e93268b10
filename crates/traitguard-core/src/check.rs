//! # Immutability Check
//!
//! [`check_immutability`] compares the proposed traits against the prior
//! traits for every read-only trait name and reports each one whose value
//! would change.
//!
//! Rules, per read-only trait `t`:
//!
//! 1. `t` absent from the proposed traits: never a violation. The update is
//!    not touching `t`.
//! 2. `t` absent from the prior traits: the prior value is `null`. Any
//!    non-null proposed value is a violation.
//! 3. Otherwise: a violation iff the values are not structurally equal
//!    (see [`TraitValue`](crate::value::TraitValue)).
//!
//! At most one violation per trait. Output is ordered by trait name.

use serde::{Deserialize, Serialize};

use crate::schema::ImmutableTraits;
use crate::value::{TraitSet, TraitValue};

/// A read-only trait whose value the update would change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub trait_name: String,
    /// JSON pointer into the identity document, `#/traits/<name>`.
    pub instance_ptr: String,
}

impl Violation {
    pub fn new(trait_name: impl Into<String>) -> Self {
        let trait_name = trait_name.into();
        let instance_ptr = format!("#/traits/{}", escape_pointer_token(&trait_name));
        Self {
            trait_name,
            instance_ptr,
        }
    }
}

/// Escape a JSON pointer reference token (RFC 6901 §3).
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Return the read-only traits that `new_values` would change.
pub fn check_immutability(
    immutable: &ImmutableTraits,
    old_values: &TraitSet,
    new_values: &TraitSet,
) -> Vec<Violation> {
    const ABSENT: TraitValue = TraitValue::Null;

    immutable
        .iter()
        .filter(|name| match new_values.get(*name) {
            None => false,
            Some(proposed) => proposed != old_values.get(*name).unwrap_or(&ABSENT),
        })
        .map(Violation::new)
        .collect()
}
