#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

//! # aegis-core
//!
//! Domain logic for the AEGIS verification demo.
//!
//! This crate provides:
//! - Submission validation and the stored record type
//! - Content fingerprints (canonical JSON + SHA-256)
//! - The SQLite record store
//! - The fixed compliance policy and verdicts
//! - PDF certificate rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use aegis_core::{content_fingerprint, evaluate, validate_submission, SubmissionStore};
//! use serde_json::json;
//!
//! let store = SubmissionStore::in_memory()?;
//!
//! // Validate an untrusted payload, fingerprint it, store it.
//! let draft = validate_submission(&json!({
//!     "labName": "OMEGA-LABS-SF",
//!     "modelName": "TITAN-V9",
//!     "compute": 5e24,
//!     "cbrnSafeguards": true,
//! }))?;
//! let signature = content_fingerprint(&draft)?;
//! let stored = store.insert(&draft, &signature)?;
//!
//! // Evaluate it against the fixed policy.
//! let verdict = evaluate(&stored);
//! assert!(verdict.compliant);
//! assert_eq!(verdict.status, "PASS");
//! # Ok::<(), aegis_core::Error>(())
//! ```

pub mod certificate;
pub mod compliance;
pub mod error;
pub mod fingerprint;
pub mod store;
pub mod submission;

pub use certificate::render_certificate;
pub use compliance::{evaluate, ComplianceChecks, Verdict, COMPUTE_THRESHOLD};
pub use error::{Error, Result};
pub use fingerprint::{canonical_json, compute_digest, content_fingerprint, sha256_hex};
pub use store::SubmissionStore;
pub use submission::{validate_submission, Submission, SubmissionDraft};
