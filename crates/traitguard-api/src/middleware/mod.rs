//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`metrics`]: Prometheus request and decision metrics.
//! - `TraceLayer` from `tower-http` is applied directly in [`crate::app`].

pub mod metrics;
