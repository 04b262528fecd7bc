//! Inspector-facing routes: compliance verdicts and certificate downloads.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use aegis_core::{evaluate, render_certificate, Verdict};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub submission_id: i64,
}

/// POST /api/inspection/verify
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<Verdict>, ApiError> {
    let submission = state.store.require(request.submission_id)?;
    let verdict = evaluate(&submission);

    tracing::info!(
        id = submission.id,
        compliant = verdict.compliant,
        "Submission verified"
    );
    Ok(Json(verdict))
}

/// GET /api/inspection/report/:id
///
/// Streams the rendered certificate as a PDF download.
pub async fn report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let submission = state.store.require(id)?;
    let verdict = evaluate(&submission);
    let pdf = render_certificate(&submission, &verdict)?;

    tracing::info!(id = submission.id, bytes = pdf.len(), "Certificate rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=AEGIS_Certificate_{}.pdf", submission.id),
            ),
        ],
        pdf,
    )
        .into_response())
}
