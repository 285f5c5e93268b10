//! # Route Modules
//!
//! - [`hooks`]: the read-only trait webhook.

pub mod hooks;
