use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::models::Tip;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub cv_text: String,
    #[serde(default)]
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub ok: bool,
    pub score: u32,
    pub tips: Vec<Tip>,
    pub analysis: Option<Map<String, Value>>,
}

/// POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = payload?;
    let cv_text = req.cv_text.trim();
    let job_text = req.job_text.trim();

    if cv_text.is_empty() || job_text.is_empty() {
        return Err(AppError::BadRequest {
            message: "cv_text and job_text are required".to_string(),
            details: Some(json!({
                "cv_text": !cv_text.is_empty(),
                "job_text": !job_text.is_empty(),
            })),
        });
    }

    let request_id = Uuid::new_v4();
    info!(%request_id, cv_chars = cv_text.len(), job_chars = job_text.len(), "analyze requested");

    let result = state
        .analyzer
        .analyze(cv_text, job_text)
        .await
        .map_err(|e| {
            warn!(%request_id, "analysis failed: {e}");
            e
        })?;

    info!(%request_id, score = result.score, tips = result.tips.len(), "analysis complete");
    Ok(Json(AnalyzeResponse {
        ok: true,
        score: result.score,
        tips: result.tips,
        analysis: result.analysis,
    }))
}
