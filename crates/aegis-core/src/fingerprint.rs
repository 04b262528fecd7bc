//! Content fingerprints over submission data.
//!
//! Every stored submission carries a "signature": a SHA-256 digest over a
//! canonical JSON rendering of the submitted fields, recomputed by the
//! server on every submission. It detects drift between what was submitted
//! and what is stored. No key material and no signer identity are involved,
//! so this is a content fingerprint rather than a cryptographic attestation
//! of origin.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::submission::SubmissionDraft;

/// Compute SHA-256 and return lowercase hex.
///
/// # Examples
///
/// ```rust
/// use aegis_core::fingerprint::sha256_hex;
///
/// // Known test vector
/// assert_eq!(
///     sha256_hex(b"hello"),
///     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
/// );
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Render a JSON value in canonical form: object keys sorted bytewise, no
/// insignificant whitespace, scalars in serde_json's standard rendering.
///
/// Structurally equal values canonicalize to the same string regardless of
/// key insertion order, which is what makes the digests below deterministic.
pub fn canonical_json(value: &Value) -> Result<String> {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<_> = map.iter().collect();
            pairs.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut out = String::from("{");
            for (idx, (key, val)) in pairs.into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                out.push_str(&canonical_json(val)?);
            }
            out.push('}');
            Ok(out)
        }
        Value::Array(items) => {
            let mut out = String::from("[");
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push_str(&canonical_json(item)?);
            }
            out.push(']');
            Ok(out)
        }
        scalar => Ok(serde_json::to_string(scalar)?),
    }
}

/// Fingerprint a validated submission draft.
///
/// Pure function of the draft's four fields: identical drafts always
/// produce identical fingerprints.
pub fn content_fingerprint(draft: &SubmissionDraft) -> Result<String> {
    let value = serde_json::to_value(draft)?;
    let canonical = canonical_json(&value)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

/// Digest over the compute value alone, printed on certificates as a
/// separate tamper-evidence line.
///
/// The value is rendered through the same serializer as [`canonical_json`],
/// so this digest and the content fingerprint always agree on number form.
pub fn compute_digest(compute: f64) -> String {
    // Finite by validation; non-finite values fall back to their Display form.
    let rendered = serde_json::Number::from_f64(compute)
        .and_then(|n| serde_json::to_string(&n).ok())
        .unwrap_or_else(|| compute.to_string());
    sha256_hex(rendered.as_bytes())
}
