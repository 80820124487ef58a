//! Tip heuristics. Each is an independent pure function; `HEURISTICS` fixes
//! the order in which they are evaluated and therefore the order of tips.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::impact::{is_quantified, quantify_advice};
use crate::resume::models::{Narrative, NormalizedResume, Tip};

pub type Heuristic = fn(&NormalizedResume, &Narrative) -> Option<Tip>;

pub const HEURISTICS: &[Heuristic] = &[
    name_presence,
    email_presence,
    phone_presence,
    skills_coverage,
    education_presence,
    experience_presence,
    quantified_impact,
    skills_structure,
    education_experience_balance,
    professional_summary,
    total_experience_presence,
    resume_length,
];

/// Lists longer than this should be grouped into categories.
const FLAT_SKILLS_LIMIT: usize = 10;

/// `Category: items` or `Category - items`, category being 3–25 characters.
static GROUPED_SKILL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[A-Za-z][A-Za-z &/]{2,24}\s*(?::|\s[-–]\s)\s*\S").unwrap()
});

pub fn evaluate(resume: &NormalizedResume, narrative: &Narrative) -> Vec<Tip> {
    HEURISTICS
        .iter()
        .filter_map(|heuristic| heuristic(resume, narrative))
        .collect()
}

fn name_presence(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    Some(if r.has_name() {
        Tip::good("name_good", "Clear name provided")
    } else {
        Tip::needs_work("name", "Missing name")
    })
}

fn email_presence(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    Some(if r.has_email() {
        Tip::good("email_good", "Professional email included")
    } else {
        Tip::needs_work("email", "Missing email")
    })
}

fn phone_presence(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    Some(if r.has_mobile_number() {
        Tip::good("mobile_number_good", "Phone number detected")
    } else {
        Tip::needs_work("mobile_number", "Phone number is missing")
    })
}

fn skills_coverage(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    let count = r.skills_count();
    Some(match count {
        0..=2 => Tip::needs_work("skills", format!("Low skills coverage (found {count})")),
        3 | 4 => Tip::warning("skills", format!("Low skills coverage (found {count})")),
        _ => Tip::good(
            "skills_good",
            format!("Strong skills section ({count} skills listed)"),
        ),
    })
}

fn education_presence(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    Some(if r.has_education() {
        Tip::good("education_good", "Education section included")
    } else {
        Tip::warning("education", "Education not detected")
    })
}

fn experience_presence(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    Some(if r.has_experience() {
        Tip::good("experience_good", "Relevant work experience included")
    } else {
        Tip::warning("experience", "Work experience not detected")
    })
}

/// Only evaluated when there is some experience signal to judge.
fn quantified_impact(r: &NormalizedResume, n: &Narrative) -> Option<Tip> {
    if !r.has_experience() && n.experience.is_empty() {
        return None;
    }
    let text = n.experience.join("\n");
    Some(if is_quantified(&text) {
        Tip::good(
            "quantified_impact_good",
            "Experience highlights measurable impact",
        )
    } else {
        Tip::warning("quantified_impact", quantify_advice(&text))
    })
}

fn skills_structure(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    if r.skills.iter().any(|s| GROUPED_SKILL.is_match(s)) {
        return Some(Tip::good(
            "skills_structure_good",
            "Skills are grouped by category",
        ));
    }
    let count = r.skills_count();
    (count > FLAT_SKILLS_LIMIT).then(|| {
        Tip::warning(
            "skills_structure",
            format!(
                "Consider grouping your {count} skills into categories (e.g. \"Languages: Python, Java\")"
            ),
        )
    })
}

fn education_experience_balance(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    match (r.has_education(), r.has_experience()) {
        (true, true) => Some(Tip::good(
            "education_experience_balance_good",
            "Education and work experience are both represented",
        )),
        (false, true) => Some(Tip::warning(
            "education_experience_balance",
            "Add an education section to complement your work experience",
        )),
        (true, false) => Some(Tip::warning(
            "education_experience_balance",
            "Add work experience, internships, or projects to complement your education",
        )),
        (false, false) => None,
    }
}

fn professional_summary(_: &NormalizedResume, n: &Narrative) -> Option<Tip> {
    Some(if n.summary.is_empty() {
        Tip::warning(
            "summary",
            "Add a short professional summary at the top of your resume",
        )
    } else {
        Tip::good("summary_good", "Professional summary included")
    })
}

fn total_experience_presence(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    Some(if r.total_experience.is_some() {
        Tip::good("total_experience_good", "Total experience detected")
    } else {
        Tip::warning(
            "total_experience",
            "Total years of experience not specified",
        )
    })
}

fn resume_length(r: &NormalizedResume, _: &Narrative) -> Option<Tip> {
    let pages = r.known_pages()?;
    Some(if pages > 2 {
        Tip::warning(
            "length",
            format!("Resume is {pages} pages (consider shortening)"),
        )
    } else {
        let unit = if pages == 1 { "page" } else { "pages" };
        Tip::good(
            "length_good",
            format!("Resume length looks good ({pages} {unit})"),
        )
    })
}
