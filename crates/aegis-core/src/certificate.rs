//! PDF certificate rendering.
//!
//! Certificates restate a verdict for download: who submitted, which model,
//! the colored pass/fail status, and the integrity digests of the record.

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, Rgb};

use crate::compliance::Verdict;
use crate::error::{Error, Result};
use crate::fingerprint::compute_digest;
use crate::submission::{now_rfc3339_micros, Submission};

fn status_color(compliant: bool) -> Color {
    // #22c55e green / #ef4444 red
    if compliant {
        Color::Rgb(Rgb::new(0.133, 0.773, 0.369, None))
    } else {
        Color::Rgb(Rgb::new(0.937, 0.267, 0.267, None))
    }
}

fn builtin_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| Error::Render(e.to_string()))
}

/// Render a verification certificate as PDF bytes (A4 portrait).
///
/// The layout is fixed; only the render date varies between calls for the
/// same record and verdict.
pub fn render_certificate(submission: &Submission, verdict: &Verdict) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "AEGIS Verification Certificate",
        Mm(210.0),
        Mm(297.0),
        "certificate",
    );

    let regular = builtin_font(&doc, BuiltinFont::Helvetica)?;
    let bold = builtin_font(&doc, BuiltinFont::HelveticaBold)?;
    let mono = builtin_font(&doc, BuiltinFont::Courier)?;

    let layer = doc.get_page(page).get_layer(layer);

    layer.use_text(
        "AEGIS VERIFICATION CERTIFICATE",
        24.0,
        Mm(30.0),
        Mm(260.0),
        &bold,
    );

    layer.use_text(
        format!("Issued To: {}", submission.lab_name),
        12.0,
        Mm(25.0),
        Mm(238.0),
        &regular,
    );
    layer.use_text(
        format!("Model: {}", submission.model_name),
        12.0,
        Mm(25.0),
        Mm(230.0),
        &regular,
    );
    layer.use_text(
        format!("Date: {}", now_rfc3339_micros()),
        12.0,
        Mm(25.0),
        Mm(222.0),
        &regular,
    );
    layer.use_text(
        "Verification Protocol: ISO/IEC 42001 (AI)",
        12.0,
        Mm(25.0),
        Mm(214.0),
        &regular,
    );

    layer.set_fill_color(status_color(verdict.compliant));
    layer.use_text(
        format!("STATUS: {}", verdict.status),
        16.0,
        Mm(40.0),
        Mm(190.0),
        &bold,
    );
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

    layer.use_text("CRYPTOGRAPHIC PROOF:", 10.0, Mm(25.0), Mm(165.0), &mono);
    layer.use_text(
        format!("Signature: {}", submission.signature),
        10.0,
        Mm(25.0),
        Mm(158.0),
        &mono,
    );
    layer.use_text(
        format!("Compute Hash: {}", compute_digest(submission.compute)),
        10.0,
        Mm(25.0),
        Mm(151.0),
        &mono,
    );

    doc.save_to_bytes().map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use crate::compliance::evaluate;

    fn submission(compute: f64, cbrn_safeguards: bool) -> Submission {
        Submission {
            id: 1,
            lab_name: "OMEGA-LABS-SF".to_string(),
            model_name: "TITAN-V9".to_string(),
            compute,
            cbrn_safeguards,
            signature: "aa11bb22".to_string(),
            created_at: now_rfc3339_micros(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn renders_a_pass_certificate() {
        let record = submission(5e24, true);
        let verdict = evaluate(&record);
        let bytes = render_certificate(&record, &verdict).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, b"%%EOF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn renders_a_fail_certificate() {
        let record = submission(2e25, false);
        let verdict = evaluate(&record);
        let bytes = render_certificate(&record, &verdict).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, b"%%EOF"));
    }
}
