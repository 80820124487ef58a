//! Document → score: text extraction, field extraction, normalization, scoring.

use bytes::Bytes;
use tracing::debug;

use crate::documents::{extract_document, DocumentError, DocumentKind, ExtractedDocument};
use crate::resume::extractor::extract_fields;
use crate::resume::models::{CandidateFields, FieldValue, NormalizedResume, ScoreResult};
use crate::resume::normalizer::normalize_with_narrative;
use crate::resume::scoring::{earned_points, score_with_narrative};

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeReport {
    pub resume: NormalizedResume,
    pub score: ScoreResult,
}

/// Decodes an uploaded document off the async executor and scores it.
pub async fn analyze_document(bytes: Bytes, kind: DocumentKind) -> Result<ResumeReport, DocumentError> {
    let document = tokio::task::spawn_blocking(move || extract_document(&bytes, kind))
        .await
        .map_err(|e| DocumentError::Malformed(format!("decoder aborted: {e}")))??;

    debug!(
        chars = document.text.len(),
        page_count = ?document.page_count,
        "document decoded"
    );
    Ok(analyze_text(&document))
}

/// Scores already-extracted text. The document's page count, when known,
/// becomes `no_of_pages`.
pub fn analyze_text(document: &ExtractedDocument) -> ResumeReport {
    let mut candidate = extract_fields(&document.text);
    if let Some(pages) = document.page_count {
        candidate.no_of_pages = Some(FieldValue::from(i64::from(pages)));
    }
    analyze_candidate(candidate)
}

pub fn analyze_candidate(candidate: CandidateFields) -> ResumeReport {
    let (resume, narrative) = normalize_with_narrative(candidate);
    let score = score_with_narrative(&resume, &narrative);

    debug!(
        skills = resume.skills_count(),
        companies = resume.company_names.len(),
        pages = ?resume.no_of_pages,
        points = ?earned_points(&resume),
        score = score.value,
        tips = score.tips.len(),
        "resume scored"
    );

    ResumeReport { resume, score }
}
