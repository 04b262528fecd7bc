//! Submission records and payload validation.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A stored training-run submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub lab_name: String,
    pub model_name: String,
    /// Training compute in FLOPs.
    pub compute: f64,
    pub cbrn_safeguards: bool,
    /// Content fingerprint computed at submission time (see [`crate::fingerprint`]).
    pub signature: String,
    pub created_at: String,
}

/// A validated payload, ready to be fingerprinted and stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
    pub lab_name: String,
    pub model_name: String,
    pub compute: f64,
    #[serde(default)]
    pub cbrn_safeguards: bool,
}

/// Fields only the server may assign.
const SERVER_FIELDS: [&str; 3] = ["id", "signature", "createdAt"];

/// Validate an untrusted submission payload.
///
/// Checks run in a fixed order and stop at the first violated constraint, so
/// the returned error always names a single field. Unknown extra fields are
/// ignored; server-assigned fields are rejected outright because the
/// signature is always recomputed on submission.
pub fn validate_submission(payload: &Value) -> Result<SubmissionDraft> {
    let object = payload
        .as_object()
        .ok_or_else(|| Error::validation("payload", "must be a JSON object"))?;

    for field in SERVER_FIELDS {
        if object.contains_key(field) {
            return Err(Error::validation(field, "is assigned by the server"));
        }
    }

    let lab_name = required_text(object, "labName")?;
    let model_name = required_text(object, "modelName")?;
    let compute = required_finite(object, "compute")?;
    let cbrn_safeguards = match object.get("cbrnSafeguards") {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => return Err(Error::validation("cbrnSafeguards", "must be a boolean")),
    };

    Ok(SubmissionDraft {
        lab_name,
        model_name,
        compute,
        cbrn_safeguards,
    })
}

fn required_text(object: &Map<String, Value>, field: &str) -> Result<String> {
    let value = object
        .get(field)
        .ok_or_else(|| Error::validation(field, "is required"))?;
    let text = value
        .as_str()
        .ok_or_else(|| Error::validation(field, "must be a string"))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn required_finite(object: &Map<String, Value>, field: &str) -> Result<f64> {
    let value = object
        .get(field)
        .ok_or_else(|| Error::validation(field, "is required"))?;
    let number = value
        .as_f64()
        .ok_or_else(|| Error::validation(field, "must be a number"))?;
    if !number.is_finite() {
        return Err(Error::validation(field, "must be a finite number"));
    }
    Ok(number)
}

/// Current UTC time as fixed-width RFC 3339 (microsecond precision).
///
/// Fixed width keeps lexicographic order on stored timestamps aligned with
/// chronological order.
pub fn now_rfc3339_micros() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
