use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::documents::DocumentKind;
use crate::errors::AppError;
use crate::resume::models::{CandidateFields, NormalizedResume, Tip, MAX_SCORE};
use crate::resume::pipeline::{analyze_candidate, analyze_document, ResumeReport};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ScoreSummary {
    pub value: u32,
    pub max: u32,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub ok: bool,
    pub data: NormalizedResume,
    pub score: ScoreSummary,
    pub tips: Vec<Tip>,
}

impl From<ResumeReport> for ParseResponse {
    fn from(report: ResumeReport) -> Self {
        Self {
            ok: true,
            data: report.resume,
            score: ScoreSummary {
                value: report.score.value,
                max: MAX_SCORE,
            },
            tips: report.score.tips,
        }
    }
}

/// POST /parse
/// Multipart upload with a `file` field (.pdf, .doc, .docx).
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
        details: None,
    })?;
    let limit = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let kind = DocumentKind::from_filename(&filename).ok_or(AppError::UnsupportedFileType)?;

        let bytes = field.bytes().await.map_err(|e| upload_error(e, limit))?;
        if bytes.len() > limit {
            return Err(AppError::FileTooLarge { limit_bytes: limit });
        }

        let request_id = Uuid::new_v4();
        info!(%request_id, %filename, size = bytes.len(), "resume upload received");

        let report = analyze_document(bytes, kind).await.map_err(|e| {
            warn!(%request_id, %filename, "resume unreadable: {e}");
            e
        })?;

        info!(
            %request_id,
            score = report.score.value,
            tips = report.score.tips.len(),
            "resume parsed"
        );
        return Ok(Json(ParseResponse::from(report)));
    }

    Err(AppError::BadRequest {
        message: format!("Missing multipart field '{FILE_FIELD}'"),
        details: None,
    })
}

/// POST /score
/// Scores candidate fields supplied as JSON, e.g. after the user edited them.
pub async fn handle_score(
    payload: Result<Json<CandidateFields>, JsonRejection>,
) -> Result<Json<ParseResponse>, AppError> {
    let Json(candidate) = payload?;
    Ok(Json(ParseResponse::from(analyze_candidate(candidate))))
}

fn upload_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge { limit_bytes: limit }
    } else {
        AppError::BadRequest {
            message: e.body_text(),
            details: None,
        }
    }
}
