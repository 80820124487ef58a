//! Field Extractor: derives candidate fields from plain resume text.
//!
//! Pure pattern heuristics; total over any input. Experience years and page
//! count are never derived here: page count comes from the document decoder.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::models::{CandidateFields, FieldValue};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[\s.-]?)?(\(?\d{2,4}\)?[\s.-]?)?\d{3,4}[\s.-]?\d{3,4}").unwrap()
});

/// An all-caps line such as `EXPERIENCE` or `WORK HISTORY`.
static UPPERCASE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s]{2,}$").unwrap());

static SKILL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,•|/]\s*").unwrap());

static COMPANY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(Inc|LLC|Ltd|AB|GmbH|Company)\b").unwrap());

/// (pattern, label) pairs, scanned in this order.
static DEGREES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bB\.?Sc\b", "BSc"),
        (r"(?i)\bM\.?Sc\b", "MSc"),
        (r"(?i)\bB\.?E\b", "BE"),
        (r"(?i)\bB\.?Tech\b", "BTech"),
        (r"(?i)\bM\.?Tech\b", "MTech"),
        (r"(?i)\bMBA\b", "MBA"),
        (r"(?i)\bPh\.?D\b", "PhD"),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).unwrap(), label))
    .collect()
});

const SKILLS_SCAN_LINES: usize = 7;
const MAX_COMPANY_LINES: usize = 5;
const MAX_COMPANY_LINE_CHARS: usize = 120;
const MAX_SECTION_LINES: usize = 40;

const SUMMARY_HEADERS: &[&str] = &[
    "summary",
    "professional summary",
    "profile",
    "professional profile",
    "objective",
    "career objective",
    "about",
    "about me",
];

const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment",
    "employment history",
    "work history",
];

/// Headers that end a prose section without starting one we collect.
const OTHER_HEADERS: &[&str] = &[
    "skills",
    "technical skills",
    "education",
    "projects",
    "certifications",
    "languages",
    "interests",
    "references",
    "contact",
    "publications",
    "awards",
];

/// Derives candidate fields from raw text. Never fails.
pub fn extract_fields(raw_text: &str) -> CandidateFields {
    let lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let email = EMAIL.find(raw_text).map(|m| m.as_str().to_string());
    let mobile_number = PHONE.find(raw_text).map(|m| m.as_str().to_string());

    let name = lines.first().and_then(|first| match &email {
        Some(e) if first.contains(e.as_str()) => None,
        _ => Some(first.to_string()),
    });

    let mut candidate = CandidateFields {
        name: name.map(FieldValue::Text),
        email: email.map(FieldValue::Text),
        mobile_number: mobile_number.map(FieldValue::Text),
        skills: Some(extract_skills(&lines).into()),
        total_experience: None,
        degree: Some(extract_degrees(raw_text).into()),
        college_name: Some(FieldValue::List(vec![])),
        designation: Some(FieldValue::List(vec![])),
        company_names: Some(extract_company_lines(&lines).into()),
        no_of_pages: None,
        ..Default::default()
    };
    candidate.narrative.summary = section_body(&lines, SUMMARY_HEADERS).map(FieldValue::Text);
    candidate.narrative.experience_text =
        section_body(&lines, EXPERIENCE_HEADERS).map(FieldValue::Text);
    candidate
}

/// Tokens from the lines following the first line reading exactly "skills".
fn extract_skills(lines: &[&str]) -> Vec<String> {
    let Some(start) = lines.iter().position(|l| l.eq_ignore_ascii_case("skills")) else {
        return vec![];
    };

    let mut skills = Vec::new();
    for line in lines.iter().skip(start + 1).take(SKILLS_SCAN_LINES) {
        if UPPERCASE_HEADER.is_match(line) {
            break;
        }
        skills.extend(
            SKILL_SEPARATOR
                .split(line)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
        );
    }
    skills
}

/// One label per match, so repeated mentions repeat.
fn extract_degrees(text: &str) -> Vec<String> {
    DEGREES
        .iter()
        .flat_map(|(re, label)| re.find_iter(text).map(move |_| label.to_string()))
        .collect()
}

fn extract_company_lines(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter(|l| COMPANY_SUFFIX.is_match(l))
        .take(MAX_COMPANY_LINES)
        .map(|l| l.chars().take(MAX_COMPANY_LINE_CHARS).collect())
        .collect()
}

fn header_key(line: &str) -> String {
    line.trim_end_matches(':').trim().to_lowercase()
}

fn is_section_header(line: &str) -> bool {
    let key = header_key(line);
    [SUMMARY_HEADERS, EXPERIENCE_HEADERS, OTHER_HEADERS]
        .iter()
        .any(|set| set.contains(&key.as_str()))
        || UPPERCASE_HEADER.is_match(line)
}

/// Body of the first section whose header is in `headers`.
fn section_body(lines: &[&str], headers: &[&str]) -> Option<String> {
    let start = lines
        .iter()
        .position(|l| headers.contains(&header_key(l).as_str()))?;

    let body: Vec<&str> = lines
        .iter()
        .skip(start + 1)
        .take_while(|l| !is_section_header(l))
        .take(MAX_SECTION_LINES)
        .copied()
        .collect();

    if body.is_empty() {
        None
    } else {
        Some(body.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Ada Lovelace
ada.lovelace@example.com | +1 (555) 123-4567

Summary
Backend engineer focused on reliability.

Skills
Python, Rust | SQL / Docker
• Kubernetes
EDUCATION
BSc Computer Science, 2015

Experience
Acme Inc — Senior Engineer
Reduced latency by 40% for 2M users
Globex GmbH — Engineer
";

    fn texts(v: &Option<FieldValue>) -> Vec<String> {
        match v {
            Some(FieldValue::List(items)) => items.iter().map(|i| i.to_string()).collect(),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_extracts_contact_fields() {
        let c = extract_fields(SAMPLE);
        assert_eq!(c.name, Some(FieldValue::Text("Ada Lovelace".into())));
        assert_eq!(
            c.email,
            Some(FieldValue::Text("ada.lovelace@example.com".into()))
        );
        match c.mobile_number {
            Some(FieldValue::Text(phone)) => assert_eq!(phone, "+1 (555) 123-4567"),
            other => panic!("no phone: {other:?}"),
        }
    }

    #[test]
    fn test_name_absent_when_first_line_holds_email() {
        let c = extract_fields("jane@example.org\nSoftware Engineer");
        assert_eq!(c.name, None);
        assert_eq!(c.email, Some(FieldValue::Text("jane@example.org".into())));
    }

    #[test]
    fn test_name_is_first_non_blank_line() {
        let c = extract_fields("\n\n   Grace Hopper  \nAdmiral");
        assert_eq!(c.name, Some(FieldValue::Text("Grace Hopper".into())));
        assert_eq!(c.email, None);
    }

    #[test]
    fn test_skills_split_and_stop_at_uppercase_header() {
        let c = extract_fields(SAMPLE);
        assert_eq!(
            texts(&c.skills),
            vec!["Python", "Rust", "SQL", "Docker", "Kubernetes"]
        );
    }

    #[test]
    fn test_skills_scan_limited_to_seven_lines() {
        let mut text = String::from("Name\nskills\n");
        for i in 0..10 {
            text.push_str(&format!("skill{i}\n"));
        }
        let c = extract_fields(&text);
        assert_eq!(texts(&c.skills).len(), 7);
    }

    #[test]
    fn test_no_skills_header_yields_empty() {
        let c = extract_fields("Name\nMy skills include Python");
        assert!(texts(&c.skills).is_empty());
    }

    #[test]
    fn test_degrees_repeat_per_mention() {
        let c = extract_fields("Name\nB.Sc in Physics\nbsc again\nMBA, Ph.D");
        assert_eq!(texts(&c.degree), vec!["BSc", "BSc", "MBA", "PhD"]);
    }

    #[test]
    fn test_company_lines_truncated_and_capped() {
        let long = format!("Initech LLC {}", "x".repeat(200));
        let mut text = format!("Name\n{long}\n");
        for i in 0..6 {
            text.push_str(&format!("Company number {i}\n"));
        }
        let c = extract_fields(&text);
        let companies = texts(&c.company_names);
        assert_eq!(companies.len(), 5);
        assert_eq!(companies[0].chars().count(), 120);
    }

    #[test]
    fn test_company_suffix_is_whole_word() {
        let c = extract_fields("Name\nIncredible work at Abacus\nWorked at Acme Inc.");
        assert_eq!(texts(&c.company_names), vec!["Worked at Acme Inc."]);
    }

    #[test]
    fn test_narrative_sections() {
        let c = extract_fields(SAMPLE);
        assert_eq!(
            c.narrative.summary,
            Some(FieldValue::Text(
                "Backend engineer focused on reliability.".into()
            ))
        );
        match &c.narrative.experience_text {
            Some(FieldValue::Text(t)) => {
                assert!(t.contains("40%"));
                assert!(t.contains("Globex GmbH"));
            }
            other => panic!("no experience: {other:?}"),
        }
    }

    fn section_text(value: &Option<FieldValue>) -> &str {
        match value {
            Some(FieldValue::Text(t)) => t,
            other => panic!("expected a text section, got {other:?}"),
        }
    }

    #[test]
    fn test_section_body_capped_at_forty_lines() {
        let mut text = String::from("Name\nExperience\n");
        for i in 0..50 {
            text.push_str(&format!("Shipped release {i}\n"));
        }
        let c = extract_fields(&text);
        let body = section_text(&c.narrative.experience_text);
        assert_eq!(body.lines().count(), MAX_SECTION_LINES);
        assert_eq!(body.lines().last(), Some("Shipped release 39"));
    }

    #[test]
    fn test_only_first_section_of_a_kind_is_taken() {
        let text = "Name\nExperience\nFirst job at a startup\nEducation\nBSc Physics\n\
                    Experience\nSecond job at a bank";
        let c = extract_fields(text);
        assert_eq!(
            section_text(&c.narrative.experience_text),
            "First job at a startup"
        );
    }

    #[test]
    fn test_section_ends_at_other_known_header() {
        let text = "Name\nSummary\nCalm under pressure\nSkills\nRust, Go";
        let c = extract_fields(text);
        assert_eq!(section_text(&c.narrative.summary), "Calm under pressure");
    }

    #[test]
    fn test_header_with_trailing_colon() {
        let text = "Name\nProfessional Summary:\nBuilds data platforms\nWork Experience:\nData engineer";
        let c = extract_fields(text);
        assert_eq!(section_text(&c.narrative.summary), "Builds data platforms");
        assert_eq!(section_text(&c.narrative.experience_text), "Data engineer");
    }

    #[test]
    fn test_experience_and_page_count_never_derived() {
        let c = extract_fields(SAMPLE);
        assert_eq!(c.total_experience, None);
        assert_eq!(c.no_of_pages, None);
    }
}
