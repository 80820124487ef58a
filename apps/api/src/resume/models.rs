//! Records handed between the pipeline stages.
//!
//! `CandidateFields` is loosely typed on purpose: it is what the extractor (or a
//! JSON caller) managed to find. `NormalizedResume` is the stable ten-field
//! schema every later stage relies on.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Upper bound of the completeness score.
pub const MAX_SCORE: u32 = 1000;

// ────────────────────────────────────────────────────────────────────────────
// Candidate values
// ────────────────────────────────────────────────────────────────────────────

/// A provisional field value before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Flag(bool),
    List(Vec<FieldValue>),
    /// Anything else a JSON caller sent (objects, nulls inside lists).
    Other(Value),
}

impl FieldValue {
    /// Empty strings, zero, `false`, empty containers and null are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
            FieldValue::Flag(b) => *b,
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Other(Value::Null) => false,
            FieldValue::Other(Value::Array(a)) => !a.is_empty(),
            FieldValue::Other(Value::Object(m)) => !m.is_empty(),
            FieldValue::Other(Value::String(s)) => !s.is_empty(),
            FieldValue::Other(_) => true,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Flag(b) => write!(f, "{b}"),
            FieldValue::List(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            FieldValue::Other(Value::String(s)) => f.write_str(s),
            FieldValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for FieldValue {
    fn from(items: Vec<S>) -> Self {
        FieldValue::List(items.into_iter().map(|s| FieldValue::Text(s.into())).collect())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Number::from_f64(v)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Other(Value::Null))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(Number::from(v))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CandidateFields
// ────────────────────────────────────────────────────────────────────────────

/// Extraction results prior to normalization. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_experience: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_name: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_names: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_pages: Option<FieldValue>,
    #[serde(flatten)]
    pub narrative: NarrativeFields,
}

/// Free-text fields read by the summary and quantified-impact heuristics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_text: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<FieldValue>,
}

impl NarrativeFields {
    pub fn summary_like(&self) -> impl Iterator<Item = &FieldValue> {
        [
            &self.summary,
            &self.professional_summary,
            &self.profile,
            &self.objective,
            &self.about,
        ]
        .into_iter()
        .flatten()
    }

    pub fn experience_like(&self) -> impl Iterator<Item = &FieldValue> {
        [
            &self.experience_text,
            &self.experience,
            &self.work_experience,
            &self.responsibilities,
            &self.achievements,
        ]
        .into_iter()
        .flatten()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalized records
// ────────────────────────────────────────────────────────────────────────────

/// Canonical resume record. All ten keys are always serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub skills: Vec<String>,
    pub total_experience: Option<f64>,
    pub degree: Vec<String>,
    pub college_name: Vec<String>,
    pub designation: Vec<String>,
    pub company_names: Vec<String>,
    pub no_of_pages: Option<i64>,
}

impl NormalizedResume {
    pub fn has_name(&self) -> bool {
        has_text(&self.name)
    }

    pub fn has_email(&self) -> bool {
        has_text(&self.email)
    }

    pub fn has_mobile_number(&self) -> bool {
        has_text(&self.mobile_number)
    }

    pub fn skills_count(&self) -> usize {
        count_non_blank(&self.skills)
    }

    /// At least one degree.
    pub fn has_education(&self) -> bool {
        count_non_blank(&self.degree) > 0
    }

    /// At least one employer.
    pub fn has_experience(&self) -> bool {
        count_non_blank(&self.company_names) > 0
    }

    /// Page count in the range the length tip reports on (one or more).
    pub fn known_pages(&self) -> Option<i64> {
        self.no_of_pages.filter(|p| *p >= 1)
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn count_non_blank(items: &[String]) -> usize {
    items.iter().filter(|s| !s.trim().is_empty()).count()
}

impl From<NormalizedResume> for CandidateFields {
    fn from(r: NormalizedResume) -> Self {
        CandidateFields {
            name: r.name.map(FieldValue::Text),
            email: r.email.map(FieldValue::Text),
            mobile_number: r.mobile_number.map(FieldValue::Text),
            skills: Some(r.skills.into()),
            total_experience: r.total_experience.map(FieldValue::from),
            degree: Some(r.degree.into()),
            college_name: Some(r.college_name.into()),
            designation: Some(r.designation.into()),
            company_names: Some(r.company_names.into()),
            no_of_pages: r.no_of_pages.map(FieldValue::from),
            narrative: NarrativeFields::default(),
        }
    }
}

/// Normalized prose that accompanies a resume into scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub summary: Vec<String>,
    pub experience: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Good,
    Warning,
    NeedsWork,
}

/// A single feedback item. Identity is the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tip {
    pub id: String,
    pub message: String,
    pub severity: Severity,
}

impl Tip {
    pub fn new(id: &str, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: id.to_string(),
            message: message.into(),
            severity,
        }
    }

    pub fn good(id: &str, message: impl Into<String>) -> Self {
        Self::new(id, message, Severity::Good)
    }

    pub fn warning(id: &str, message: impl Into<String>) -> Self {
        Self::new(id, message, Severity::Warning)
    }

    pub fn needs_work(id: &str, message: impl Into<String>) -> Self {
        Self::new(id, message, Severity::NeedsWork)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub value: u32,
    pub tips: Vec<Tip>,
}
