//! Lab-facing routes: submit training-run metadata, fetch the latest record.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use aegis_core::{content_fingerprint, validate_submission, Submission};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/lab/submit
///
/// The payload is taken untyped so validation owns the field-level error
/// reporting; the fingerprint is computed from the normalized draft, never
/// from anything the client sent verbatim.
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Submission>), ApiError> {
    let draft = validate_submission(&payload)?;
    let signature = content_fingerprint(&draft)?;
    let stored = state.store.insert(&draft, &signature)?;

    tracing::info!(
        id = stored.id,
        lab = %stored.lab_name,
        model = %stored.model_name,
        "Submission stored"
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/lab/latest
///
/// Returns the most recent submission, or JSON `null` when none exist.
pub async fn latest(State(state): State<AppState>) -> Result<Json<Option<Submission>>, ApiError> {
    let submission = state.store.latest()?;
    Ok(Json(submission))
}
