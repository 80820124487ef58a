//! Scoring Engine: weighted completeness score plus ordered tips.
//!
//! score = round(1000 × earned / possible), clamped to [0, 1000], where each
//! criterion earns `weight × fraction` and `possible` is the sum of weights.

use crate::resume::models::{Narrative, NormalizedResume, ScoreResult, MAX_SCORE};
use crate::resume::tips;

/// Fraction of a criterion's weight a resume earns, in [0, 1].
type Earned = fn(&NormalizedResume) -> f64;

/// Skill count at which the skills criterion is fully earned.
const SKILLS_FOR_FULL_CREDIT: f64 = 10.0;

const CRITERIA: &[(&str, f64, Earned)] = &[
    ("name", 1.0, name_earned),
    ("email", 1.0, email_earned),
    ("mobile_number", 1.0, phone_earned),
    ("skills", 2.0, skills_earned),
    ("education", 1.0, education_earned),
    ("experience", 1.0, experience_earned),
    ("total_experience", 1.0, total_experience_earned),
    ("length", 0.5, length_earned),
];

#[allow(dead_code)]
pub fn score(resume: &NormalizedResume) -> ScoreResult {
    score_with_narrative(resume, &Narrative::default())
}

/// Scores a resume together with its summary and experience prose.
pub fn score_with_narrative(resume: &NormalizedResume, narrative: &Narrative) -> ScoreResult {
    ScoreResult {
        value: completeness_score(resume),
        tips: tips::evaluate(resume, narrative),
    }
}

/// Points earned per criterion, in table order.
pub fn earned_points(resume: &NormalizedResume) -> Vec<(&'static str, f64)> {
    CRITERIA
        .iter()
        .map(|(key, weight, earned)| (*key, weight * earned(resume).clamp(0.0, 1.0)))
        .collect()
}

pub fn completeness_score(resume: &NormalizedResume) -> u32 {
    let possible: f64 = CRITERIA.iter().map(|(_, weight, _)| weight).sum();
    if possible <= 0.0 {
        return 0;
    }
    let earned: f64 = earned_points(resume).iter().map(|(_, points)| points).sum();
    let max = f64::from(MAX_SCORE);
    (max * earned / possible).round().clamp(0.0, max) as u32
}

fn full_if(present: bool) -> f64 {
    if present {
        1.0
    } else {
        0.0
    }
}

fn name_earned(r: &NormalizedResume) -> f64 {
    full_if(r.has_name())
}

fn email_earned(r: &NormalizedResume) -> f64 {
    full_if(r.has_email())
}

fn phone_earned(r: &NormalizedResume) -> f64 {
    full_if(r.has_mobile_number())
}

/// Linear ramp, capped at ten skills.
fn skills_earned(r: &NormalizedResume) -> f64 {
    (r.skills_count() as f64 / SKILLS_FOR_FULL_CREDIT).min(1.0)
}

fn education_earned(r: &NormalizedResume) -> f64 {
    full_if(r.has_education())
}

fn experience_earned(r: &NormalizedResume) -> f64 {
    full_if(r.has_experience())
}

fn total_experience_earned(r: &NormalizedResume) -> f64 {
    full_if(r.total_experience.is_some())
}

/// Full at two pages or fewer, half when unknown, nothing beyond two.
fn length_earned(r: &NormalizedResume) -> f64 {
    match r.no_of_pages {
        Some(pages) if pages <= 2 => 1.0,
        Some(_) => 0.0,
        None => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::Severity;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn full_resume() -> NormalizedResume {
        NormalizedResume {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            mobile_number: Some("070 123 45 67".into()),
            skills: strings(&[
                "Python",
                "FastAPI",
                "SQL",
                "Docker",
                "Kubernetes",
                "AWS",
                "ML",
                "NLP",
                "CI",
                "Git",
            ]),
            total_experience: Some(5.0),
            degree: strings(&["BSc"]),
            company_names: strings(&["Acme Inc"]),
            no_of_pages: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_weights_sum_to_eight_and_a_half() {
        let possible: f64 = CRITERIA.iter().map(|(_, w, _)| w).sum();
        assert!((possible - 8.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_resume_scores_low() {
        // only half of the length weight: 0.25 / 8.5
        let result = score(&NormalizedResume::default());
        assert_eq!(result.value, 29);
    }

    #[test]
    fn test_full_resume_scores_max_with_good_skills_tip() {
        let result = score(&full_resume());
        assert_eq!(result.value, 1000);
        let skills = result.tips.iter().find(|t| t.id == "skills_good").unwrap();
        assert_eq!(skills.severity, Severity::Good);
        assert!(result.value > 800);
        assert!(score(&NormalizedResume::default()).value < 200);
    }

    #[test]
    fn test_skills_ramp_is_linear_and_capped() {
        let five = NormalizedResume {
            skills: strings(&["a", "b", "c", "d", "e"]),
            ..Default::default()
        };
        // (1.0 + 0.25) / 8.5
        assert_eq!(completeness_score(&five), 147);

        let many = NormalizedResume {
            skills: (0..1000).map(|i| format!("s{i}")).collect(),
            ..Default::default()
        };
        let ten = NormalizedResume {
            skills: (0..10).map(|i| format!("s{i}")).collect(),
            ..Default::default()
        };
        assert_eq!(completeness_score(&many), completeness_score(&ten));
    }

    #[test]
    fn test_length_weight() {
        let points = |pages: Option<i64>| {
            let r = NormalizedResume {
                no_of_pages: pages,
                ..Default::default()
            };
            earned_points(&r)
                .into_iter()
                .find(|(key, _)| *key == "length")
                .map(|(_, p)| p)
                .unwrap()
        };
        assert_eq!(points(Some(1)), 0.5);
        assert_eq!(points(Some(2)), 0.5);
        assert_eq!(points(Some(3)), 0.0);
        assert_eq!(points(None), 0.25);
    }

    #[test]
    fn test_zero_or_negative_pages_earn_full_length_weight() {
        for pages in [0, -4] {
            let r = NormalizedResume {
                no_of_pages: Some(pages),
                ..Default::default()
            };
            // 0.5 / 8.5
            assert_eq!(completeness_score(&r), 59, "pages = {pages}");
            assert!(score(&r)
                .tips
                .iter()
                .all(|t| t.id != "length" && t.id != "length_good"));
        }
    }

    #[test]
    fn test_score_always_within_bounds() {
        let weird = [
            NormalizedResume::default(),
            NormalizedResume {
                skills: vec!["a".into(); 1000],
                no_of_pages: Some(999),
                ..Default::default()
            },
            NormalizedResume {
                name: Some("x".into()),
                email: Some("x@y.z".into()),
                mobile_number: Some("1".into()),
                skills: vec!["a".into(); 100],
                no_of_pages: Some(-4),
                ..Default::default()
            },
            full_resume(),
        ];
        for r in &weird {
            assert!(score(r).value <= MAX_SCORE);
        }
    }

    #[test]
    fn test_adding_signals_never_lowers_score() {
        let empty = score(&NormalizedResume::default()).value;
        let partial = NormalizedResume {
            name: Some("Ada".into()),
            degree: strings(&["BSc"]),
            ..Default::default()
        };
        let partial_score = score(&partial).value;
        let full_score = score(&full_resume()).value;
        assert!(empty <= partial_score);
        assert!(partial_score <= full_score);
    }

    #[test]
    fn test_blank_entries_earn_nothing() {
        let blank = NormalizedResume {
            name: Some("   ".into()),
            degree: strings(&["  "]),
            ..Default::default()
        };
        assert_eq!(
            completeness_score(&blank),
            completeness_score(&NormalizedResume::default())
        );
    }

    #[test]
    fn test_score_is_deterministic() {
        let narrative = Narrative {
            summary: vec!["Engineer".into()],
            experience: vec!["Shipped 3 products".into()],
        };
        let a = score_with_narrative(&full_resume(), &narrative);
        let b = score_with_narrative(&full_resume(), &narrative);
        assert_eq!(a, b);
    }
}
