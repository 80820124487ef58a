//! Validation of the model's JSON answer.
//!
//! Checks run loosest first so the error names the first thing wrong:
//! JSON at all, object, score, tips, tip shape, analysis, then strict decoding.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::analysis::AnalysisError;
use crate::llm_client::strip_json_fences;
use crate::resume::models::{Tip, MAX_SCORE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzeResult {
    pub score: u32,
    pub tips: Vec<Tip>,
    #[serde(default)]
    pub analysis: Option<Map<String, Value>>,
}

pub fn parse_model_output(raw: &str) -> Result<AnalyzeResult, AnalysisError> {
    let value: Value = serde_json::from_str(strip_json_fences(raw)).map_err(|_| {
        AnalysisError::InvalidModelOutput {
            message: None,
            details: None,
        }
    })?;

    let Value::Object(map) = value else {
        return Err(AnalysisError::invalid("Expected JSON object", None));
    };

    let score = map.get("score").cloned().unwrap_or(Value::Null);
    if !is_valid_score(&score) {
        return Err(AnalysisError::invalid(
            "Invalid score",
            Some(json!({ "score": score })),
        ));
    }

    let tips = map.get("tips").cloned().unwrap_or(Value::Null);
    let Some(tip_list) = tips.as_array().filter(|l| l.iter().all(Value::is_object)) else {
        return Err(AnalysisError::invalid(
            "Invalid tips",
            Some(json!({ "tips": tips })),
        ));
    };

    if let Some(tip) = tip_list.iter().find(|t| !has_tip_shape(t)) {
        return Err(AnalysisError::invalid(
            "Invalid tip shape",
            Some(json!({ "tip": tip })),
        ));
    }

    match map.get("analysis") {
        None | Some(Value::Null) | Some(Value::Object(_)) => {}
        Some(other) => {
            return Err(AnalysisError::invalid(
                "Invalid analysis",
                Some(json!({ "analysis": other })),
            ))
        }
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| {
        AnalysisError::invalid(
            "Invalid model output",
            Some(json!([{ "msg": e.to_string() }])),
        )
    })
}

fn is_valid_score(score: &Value) -> bool {
    match score {
        Value::Number(n) => n
            .as_u64()
            .map(|v| v <= u64::from(MAX_SCORE))
            .unwrap_or(false),
        _ => false,
    }
}

fn has_tip_shape(tip: &Value) -> bool {
    ["id", "message", "severity"]
        .iter()
        .all(|key| tip.get(key).map(Value::is_string).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::Severity;

    fn message_and_details(err: AnalysisError) -> (Option<String>, Option<Value>) {
        match err {
            AnalysisError::InvalidModelOutput { message, details } => (message, details),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_valid_output_parses() {
        let raw = r#"{
            "score": 640,
            "tips": [{"id": "skills", "message": "Add Kubernetes", "severity": "WARNING"}],
            "analysis": {"matched": ["Rust"]}
        }"#;
        let result = parse_model_output(raw).unwrap();
        assert_eq!(result.score, 640);
        assert_eq!(result.tips[0].severity, Severity::Warning);
        assert!(result.analysis.is_some());
    }

    #[test]
    fn test_fenced_output_parses() {
        let raw = "```json\n{\"score\": 0, \"tips\": []}\n```";
        let result = parse_model_output(raw).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.analysis, None);
    }

    #[test]
    fn test_non_json_is_code_only() {
        let (message, details) = message_and_details(parse_model_output("Sure! Here is").unwrap_err());
        assert_eq!(message, None);
        assert_eq!(details, None);
    }

    #[test]
    fn test_non_object() {
        let (message, _) = message_and_details(parse_model_output("[1, 2]").unwrap_err());
        assert_eq!(message.as_deref(), Some("Expected JSON object"));
    }

    #[test]
    fn test_invalid_scores() {
        for raw in [
            r#"{"tips": []}"#,
            r#"{"score": 1001, "tips": []}"#,
            r#"{"score": -1, "tips": []}"#,
            r#"{"score": 12.5, "tips": []}"#,
            r#"{"score": "700", "tips": []}"#,
        ] {
            let (message, _) = message_and_details(parse_model_output(raw).unwrap_err());
            assert_eq!(message.as_deref(), Some("Invalid score"), "{raw}");
        }
        let (_, details) =
            message_and_details(parse_model_output(r#"{"score": 1001, "tips": []}"#).unwrap_err());
        assert_eq!(details, Some(json!({"score": 1001})));
    }

    #[test]
    fn test_invalid_tips() {
        for raw in [
            r#"{"score": 1}"#,
            r#"{"score": 1, "tips": "none"}"#,
            r#"{"score": 1, "tips": ["text"]}"#,
        ] {
            let (message, _) = message_and_details(parse_model_output(raw).unwrap_err());
            assert_eq!(message.as_deref(), Some("Invalid tips"), "{raw}");
        }
    }

    #[test]
    fn test_invalid_tip_shape() {
        let raw = r#"{"score": 1, "tips": [{"id": "a", "message": 3, "severity": "GOOD"}]}"#;
        let (message, details) = message_and_details(parse_model_output(raw).unwrap_err());
        assert_eq!(message.as_deref(), Some("Invalid tip shape"));
        assert_eq!(details.unwrap()["tip"]["message"], 3);
    }

    #[test]
    fn test_invalid_analysis() {
        let raw = r#"{"score": 1, "tips": [], "analysis": "looks fine"}"#;
        let (message, _) = message_and_details(parse_model_output(raw).unwrap_err());
        assert_eq!(message.as_deref(), Some("Invalid analysis"));
    }

    #[test]
    fn test_null_analysis_is_accepted() {
        let raw = r#"{"score": 1, "tips": [], "analysis": null}"#;
        assert_eq!(parse_model_output(raw).unwrap().analysis, None);
    }

    #[test]
    fn test_strict_decoding_rejects_extras_and_unknown_severity() {
        for raw in [
            r#"{"score": 1, "tips": [], "verdict": "hire"}"#,
            r#"{"score": 1, "tips": [{"id": "a", "message": "b", "severity": "CRITICAL"}]}"#,
            r#"{"score": 1, "tips": [{"id": "a", "message": "b", "severity": "GOOD", "extra": 1}]}"#,
        ] {
            let (message, details) = message_and_details(parse_model_output(raw).unwrap_err());
            assert_eq!(message.as_deref(), Some("Invalid model output"), "{raw}");
            assert!(details.is_some());
        }
    }
}
