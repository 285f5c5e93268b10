//! # traitguard-api: Read-only Trait Webhook Service
//!
//! Axum service the identity server calls before persisting a settings
//! update. It looks up the identity schema, checks the proposed traits
//! against the read-only ones, and answers 200 (allow) or 409 (deny).
//!
//! ## API Surface
//!
//! | Route                               | Module             | Purpose              |
//! |-------------------------------------|--------------------|----------------------|
//! | `POST /hooks/check-readonly-traits` | [`routes::hooks`]  | Read-only trait gate |
//! | `GET /health/liveness`              | this module        | Liveness probe       |
//! | `GET /health/readiness`             | this module        | Readiness probe      |
//! | `GET /metrics`                      | this module        | Prometheus scrape    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Largest accepted webhook body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_on = state.config.metrics_enabled;

    let mut hooks = routes::hooks::router().layer(DefaultBodyLimit::max(MAX_BODY_BYTES));
    if metrics_on {
        hooks = hooks
            .route_layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(state.metrics.clone()));
    }

    let mut probes = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));
    if metrics_on {
        probes = probes.route("/metrics", axum::routing::get(prometheus_metrics));
    }

    Router::new()
        .merge(probes)
        .merge(hooks)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /metrics: Prometheus metrics scrape endpoint.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The service keeps no connections open between requests,
/// so once the router is serving it is ready.
async fn readiness() -> &'static str {
    "ready"
}
