//! # Read-only Trait Webhook
//!
//! `POST /hooks/check-readonly-traits`, called by the identity server before
//! it persists a settings update.
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | Body is not a webhook payload | 400 | error body, `Invalid JSON: ...` |
//! | `schema_id` is empty, `.` or `..` | 400 | error body, `Invalid schema id: ...` |
//! | Schema lookup failed | 500 | error body with the lookup failure |
//! | A read-only trait would change | 409 | [`RejectionPayload`](traitguard_core::RejectionPayload) |
//! | Otherwise | 200 | empty |

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Deserializer, Serialize};
use traitguard_core::{check_immutability, format_rejection, TraitSet};
use traitguard_schema_client::validate_schema_id;

use crate::error::AppError;
use crate::middleware::metrics::Decision;
use crate::state::AppState;

/// Webhook request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub schema_id: String,
    /// Traits as currently persisted.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub old_traits: TraitSet,
    /// Traits as the update would persist them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub new_traits: TraitSet,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TraitSet, D::Error> {
    Option::<TraitSet>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Build the webhook router.
pub fn router() -> Router<AppState> {
    Router::new().route("/hooks/check-readonly-traits", post(check_readonly_traits))
}

/// POST /hooks/check-readonly-traits: deny updates that change read-only traits.
async fn check_readonly_traits(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: WebhookRequest = serde_json::from_slice(&body).map_err(|e| {
        state.metrics.record_decision(Decision::InvalidRequest);
        AppError::InvalidJson(e.to_string())
    })?;

    tracing::info!(schema_id = %request.schema_id, "received update request");

    if let Err(e) = validate_schema_id(&request.schema_id) {
        state.metrics.record_decision(Decision::InvalidRequest);
        return Err(AppError::InvalidSchemaId(e.to_string()));
    }

    let immutable = state
        .schema_client
        .immutable_traits(&request.schema_id)
        .await
        .map_err(|e| {
            state.metrics.record_decision(Decision::LookupFailed);
            AppError::from(e)
        })?;

    let violations = check_immutability(&immutable, &request.old_traits, &request.new_traits);

    if !violations.is_empty() {
        let denied: Vec<&str> = violations.iter().map(|v| v.trait_name.as_str()).collect();
        tracing::info!(schema_id = %request.schema_id, ?denied, "update request denied");
        state.metrics.record_decision(Decision::Denied);
        return Ok((StatusCode::CONFLICT, Json(format_rejection(&violations))).into_response());
    }

    tracing::info!(schema_id = %request.schema_id, "update request accepted");
    state.metrics.record_decision(Decision::Accepted);
    Ok(StatusCode::OK.into_response())
}
