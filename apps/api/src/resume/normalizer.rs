//! Normalizer: coerces candidate fields into the stable ten-field schema.
//!
//! Pure and total: anything malformed becomes null or an empty list.
//! Applying it to an already-normalized resume reproduces that resume.

use std::collections::HashSet;

use serde_json::Value;

use crate::resume::models::{CandidateFields, FieldValue, Narrative, NormalizedResume};

#[allow(dead_code)]
pub fn normalize(candidate: CandidateFields) -> NormalizedResume {
    normalize_with_narrative(candidate).0
}

/// Normalizes the resume fields and, alongside, the free-text narrative fields.
pub fn normalize_with_narrative(candidate: CandidateFields) -> (NormalizedResume, Narrative) {
    let narrative = Narrative {
        summary: candidate
            .narrative
            .summary_like()
            .flat_map(to_list)
            .collect(),
        experience: candidate
            .narrative
            .experience_like()
            .flat_map(to_list)
            .collect(),
    };

    let resume = NormalizedResume {
        name: to_text(candidate.name.as_ref()),
        email: to_text(candidate.email.as_ref()),
        mobile_number: to_text(candidate.mobile_number.as_ref()),
        skills: dedup_skills(list_field(candidate.skills.as_ref())),
        total_experience: candidate.total_experience.as_ref().and_then(to_float),
        degree: list_field(candidate.degree.as_ref()),
        college_name: list_field(candidate.college_name.as_ref()),
        designation: list_field(candidate.designation.as_ref()),
        company_names: list_field(candidate.company_names.as_ref()),
        no_of_pages: candidate.no_of_pages.as_ref().and_then(to_int),
    };

    (resume, narrative)
}

fn to_text(value: Option<&FieldValue>) -> Option<String> {
    value
        .map(|v| v.to_string().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn list_field(value: Option<&FieldValue>) -> Vec<String> {
    value.map(to_list).unwrap_or_default()
}

/// A bare value becomes a one-element list; list items are stringified and
/// trimmed, with falsy and blank items dropped.
fn to_list(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::List(items) => items
            .iter()
            .filter(|item| item.is_truthy())
            .map(|item| item.to_string().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        FieldValue::Other(Value::Null) => vec![],
        other => to_text(Some(other)).into_iter().collect(),
    }
}

fn to_float(value: &FieldValue) -> Option<f64> {
    let parsed = match value {
        FieldValue::Number(n) => n.as_f64(),
        FieldValue::Text(s) | FieldValue::Other(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

fn to_int(value: &FieldValue) -> Option<i64> {
    to_float(value).map(|f| f.trunc() as i64)
}

/// Case-insensitive dedup; keeps the first spelling and the original order.
fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter(|skill| seen.insert(skill.to_lowercase()))
        .collect()
}
