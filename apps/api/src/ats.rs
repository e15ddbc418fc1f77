//! ATS readiness check — scores a (possibly partial) resume record against the
//! basics applicant tracking systems look for. Advisory only; nothing is rejected.

use serde::{Deserialize, Serialize};

use crate::models::resume::PartialResumeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsIssue {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    /// 0 – 100
    pub score: u32,
    /// Sorted critical → warning → success.
    pub issues: Vec<AtsIssue>,
}

const ACTION_VERBS: &[&str] = &[
    "led",
    "developed",
    "managed",
    "created",
    "designed",
    "implemented",
    "analyzed",
    "collaborated",
    "improved",
    "increased",
    "reduced",
    "saved",
    "launched",
    "mentored",
    "architected",
    "engineered",
];

const RECOMMENDED_SKILLS: usize = 5;

struct Tally {
    score: i32,
    issues: Vec<AtsIssue>,
}

impl Tally {
    fn deduct(&mut self, severity: Severity, points: i32, message: impl Into<String>) {
        self.score -= points;
        self.issues.push(AtsIssue {
            severity,
            message: message.into(),
        });
    }
}

pub fn evaluate(record: &PartialResumeRecord) -> AtsReport {
    let mut tally = Tally {
        score: 100,
        issues: Vec::new(),
    };
    let info = &record.personal_info;

    if is_blank(&info.email) {
        tally.deduct(Severity::Critical, 20, "Missing email address");
    }
    if is_blank(&info.phone) {
        tally.deduct(Severity::Critical, 20, "Missing phone number");
    }
    if is_blank(&info.location) {
        tally.deduct(
            Severity::Warning,
            5,
            "Adding a general location (City, State) helps with local searches",
        );
    }

    if record.experience.is_empty() {
        tally.deduct(Severity::Critical, 30, "No work experience listed");
    }
    for exp in &record.experience {
        let company = exp.company.as_deref().unwrap_or("an unnamed company");
        if exp.description.is_empty() {
            tally.deduct(
                Severity::Warning,
                5,
                format!("Experience at {company} has no description details"),
            );
        } else if !exp.description.iter().any(|d| opens_with_action_verb(d)) {
            tally.deduct(
                Severity::Warning,
                5,
                format!(
                    "Consider starting bullet points for {company} with strong action verbs (e.g., Led, Developed)"
                ),
            );
        }
    }

    if record.skills.is_empty() {
        tally.deduct(
            Severity::Critical,
            20,
            "No skills listed. ATS systems rely heavily on keywords from this section.",
        );
    } else if record.skills.len() < RECOMMENDED_SKILLS {
        tally.deduct(
            Severity::Warning,
            5,
            "Consider adding more relevant skills (aim for 5+)",
        );
    }

    if record.education.is_empty() {
        tally.deduct(Severity::Warning, 10, "Education section is empty");
    }

    if tally.score == 100 {
        tally.issues.push(AtsIssue {
            severity: Severity::Success,
            message: "Resume looks great! All basic ATS requirements met.".to_string(),
        });
    }

    tally.issues.sort_by_key(|issue| issue.severity);
    AtsReport {
        score: tally.score.max(0) as u32,
        issues: tally.issues,
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn opens_with_action_verb(line: &str) -> bool {
    let lower = line.trim_start().to_lowercase();
    ACTION_VERBS.iter().any(|verb| lower.starts_with(verb))
}
