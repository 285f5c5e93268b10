//! # traitguard-core: Read-only Trait Decision Core
//!
//! Everything the webhook needs to decide whether an identity update may
//! proceed, with no I/O:
//!
//! - [`value`]: the [`TraitValue`] tagged union and the [`TraitSet`] map of
//!   trait name to value.
//! - [`schema`]: the subset of an identity schema the webhook reads, and
//!   extraction of the [`ImmutableTraits`] set from its annotations.
//! - [`check`]: [`check_immutability`], the pure decision function.
//! - [`rejection`]: [`format_rejection`], the 409 payload builder.
//!
//! ## Crate Policy
//!
//! - No network, filesystem or environment access.
//! - No `.unwrap()` outside tests.
//! - Deterministic output: trait sets are `BTreeMap`/`BTreeSet` so violations
//!   always come out in lexicographic trait-name order.

pub mod check;
pub mod rejection;
pub mod schema;
pub mod value;

pub use check::{check_immutability, Violation};
pub use rejection::{
    format_rejection, MessageType, RejectionContainer, RejectionMessage, RejectionPayload,
    READ_ONLY_MESSAGE_ID, READ_ONLY_MESSAGE_TEXT,
};
pub use schema::{IdentitySchema, ImmutableTraits, DEFAULT_READONLY_ANNOTATION};
pub use value::{TraitSet, TraitValue};
