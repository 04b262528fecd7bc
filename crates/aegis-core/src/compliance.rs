//! Compliance policy evaluation.
//!
//! The policy is fixed: a submission is compliant when its training compute
//! stays strictly below [`COMPUTE_THRESHOLD`] and CBRN safeguards are
//! attested. The verdict is all-or-nothing; there are no partial tiers.

use serde::{Deserialize, Serialize};

use crate::fingerprint::sha256_hex;
use crate::submission::{now_rfc3339_micros, Submission};

/// Training compute ceiling in FLOPs. Exactly the threshold fails.
pub const COMPUTE_THRESHOLD: f64 = 1e25;

/// Status label for a compliant submission.
pub const STATUS_PASS: &str = "PASS";

/// Status label naming the violated policy article.
pub const STATUS_FAIL: &str = "FAIL - ARTICLE 88 TRIGGERED";

/// Per-check outcomes reported alongside the verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceChecks {
    pub compute_check: bool,
    pub cbrn_check: bool,
}

/// Result of evaluating one submission against the policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub compliant: bool,
    pub status: String,
    /// Digest binding the verdict to the record: SHA-256 over the
    /// submission id and the compliance boolean, both stringified.
    pub proof_hash: String,
    pub timestamp: String,
    pub details: ComplianceChecks,
}

/// Evaluate a stored submission against the fixed policy.
///
/// Pure apart from the timestamp: repeated evaluation of the same record
/// yields the same `compliant`, `status`, `proof_hash`, and `details`.
pub fn evaluate(submission: &Submission) -> Verdict {
    let compute_check = submission.compute < COMPUTE_THRESHOLD;
    let cbrn_check = submission.cbrn_safeguards;
    let compliant = compute_check && cbrn_check;

    let status = if compliant { STATUS_PASS } else { STATUS_FAIL };
    let proof_hash = sha256_hex(format!("{}{}", submission.id, compliant).as_bytes());

    Verdict {
        compliant,
        status: status.to_string(),
        proof_hash,
        timestamp: now_rfc3339_micros(),
        details: ComplianceChecks {
            compute_check,
            cbrn_check,
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    fn submission(id: i64, compute: f64, cbrn_safeguards: bool) -> Submission {
        Submission {
            id,
            lab_name: "OMEGA-LABS-SF".to_string(),
            model_name: "TITAN-V9".to_string(),
            compute,
            cbrn_safeguards,
            signature: "aa11".to_string(),
            created_at: now_rfc3339_micros(),
        }
    }

    #[test]
    fn passes_under_threshold_with_safeguards() {
        let verdict = evaluate(&submission(1, 5e24, true));
        assert!(verdict.compliant);
        assert_eq!(verdict.status, STATUS_PASS);
        assert!(verdict.details.compute_check);
        assert!(verdict.details.cbrn_check);
        // sha256("1true")
        assert_eq!(
            verdict.proof_hash,
            "713fdf6f8cbe66f93270c055c6adaf50763a87d0609c40eca18cae035266d181"
        );
    }

    #[test]
    fn fails_at_exactly_the_threshold() {
        let verdict = evaluate(&submission(1, COMPUTE_THRESHOLD, true));
        assert!(!verdict.compliant);
        assert_eq!(verdict.status, STATUS_FAIL);
        assert!(!verdict.details.compute_check);
        assert!(verdict.details.cbrn_check);
    }

    #[test]
    fn passes_just_below_the_threshold() {
        // Largest f64 below 1e25.
        let verdict = evaluate(&submission(1, 9.999_999_999_999_998e24, true));
        assert!(verdict.details.compute_check);
        assert!(verdict.compliant);
    }

    #[test]
    fn fails_without_safeguards() {
        let verdict = evaluate(&submission(2, 5e24, false));
        assert!(!verdict.compliant);
        assert_eq!(verdict.status, STATUS_FAIL);
        assert!(verdict.details.compute_check);
        assert!(!verdict.details.cbrn_check);
        // sha256("2false")
        assert_eq!(
            verdict.proof_hash,
            "e36f65f4354837405d11261b86f084e8be42d16036a0b7061f863f47135e4f0c"
        );
    }

    #[test]
    fn fails_on_both_violations() {
        let verdict = evaluate(&submission(3, 2e25, false));
        assert!(!verdict.compliant);
        assert!(!verdict.details.compute_check);
        assert!(!verdict.details.cbrn_check);
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let record = submission(7, 5e24, true);
        let first = evaluate(&record);
        let second = evaluate(&record);
        assert_eq!(first.compliant, second.compliant);
        assert_eq!(first.status, second.status);
        assert_eq!(first.proof_hash, second.proof_hash);
        assert_eq!(first.details, second.details);
    }

    #[test]
    fn proof_hash_binds_the_submission_id() {
        let first = evaluate(&submission(1, 5e24, true));
        let second = evaluate(&submission(2, 5e24, true));
        assert_ne!(first.proof_hash, second.proof_hash);
    }
}
