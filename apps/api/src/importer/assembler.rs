//! Result assembler — runs segmentation and the section parsers over a line
//! stream and folds everything into one `PartialResumeRecord`.

use tracing::{debug, info};

use crate::importer::parsers::parse_section;
use crate::importer::segmenter::{scan_global_contact, segment};
use crate::models::resume::PartialResumeRecord;

/// Builds a record from reconstructed lines. Blank lines are dropped first.
///
/// Document-wide contact fallbacks are applied before any section is parsed, so
/// the contact parser only fills what they left empty (name, phone, links) and
/// may replace the fallback location with a tighter contact-block match.
pub fn import_lines<S: AsRef<str>>(lines: &[S]) -> PartialResumeRecord {
    let lines: Vec<&str> = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect();

    let mut record = PartialResumeRecord::default();

    let global = scan_global_contact(&lines);
    record.personal_info.email = global.email;
    record.personal_info.location = global.location;

    let buffers = segment(&lines);
    debug!(lines = lines.len(), buffers = buffers.len(), "Document segmented");

    for buffer in &buffers {
        parse_section(buffer, &mut record);
    }

    info!(
        experience = record.experience.len(),
        education = record.education.len(),
        projects = record.projects.len(),
        skills = record.skills.len(),
        achievements = record.achievements.len(),
        has_name = record.personal_info.full_name.is_some(),
        has_email = record.personal_info.email.is_some(),
        "Resume import assembled"
    );

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    const JANE: &[&str] = &[
        "Jane Smith",
        "jane@x.com",
        "555-123-4567",
        "EXPERIENCE",
        "Globex Inc, Remote",
        "Senior Engineer",
        "2019 - Present",
        "Built things",
        "EDUCATION",
        "State University",
        "Bachelor of Science",
        "2015",
    ];

    #[test]
    fn test_end_to_end_scenario() {
        let record = import_lines(JANE);
        let info = &record.personal_info;
        assert_eq!(info.full_name.as_deref(), Some("Jane Smith"));
        assert_eq!(info.email.as_deref(), Some("jane@x.com"));
        assert_eq!(info.phone.as_deref(), Some("555-123-4567"));

        assert_eq!(record.experience.len(), 1);
        let exp = &record.experience[0];
        assert_eq!(exp.company.as_deref(), Some("Globex Inc"));
        assert_eq!(exp.location.as_deref(), Some("Remote"));
        assert_eq!(exp.position.as_deref(), Some("Senior Engineer"));
        assert!(exp.start_date.as_deref().unwrap().contains("2019"));
        assert!(exp.current);
        assert_eq!(exp.description, vec!["Built things"]);

        assert_eq!(record.education.len(), 1);
        let edu = &record.education[0];
        assert_eq!(edu.school.as_deref(), Some("State University"));
        assert!(edu.degree.as_deref().unwrap().contains("Bachelor"));
        assert!(edu.end_date.as_deref().unwrap().contains("2015"));

        assert!(record.projects.is_empty());
        assert!(record.skills.is_empty());
        assert!(record.achievements.is_empty());
    }

    #[test]
    fn test_email_outside_contact_block_is_recorded() {
        let record = import_lines(&[
            "Jane Smith",
            "EXPERIENCE",
            "Acme Corp",
            "Reach my former manager via jane.ref@acme.io for references",
        ]);
        assert_eq!(record.personal_info.email.as_deref(), Some("jane.ref@acme.io"));
    }

    #[test]
    fn test_contact_location_replaces_global_fallback() {
        let record = import_lines(&[
            "Jane Smith",
            "Based near Portland, OR and open to relocation anywhere",
            "Portland, OR",
        ]);
        assert_eq!(record.personal_info.location.as_deref(), Some("Portland, OR"));
    }

    #[test]
    fn test_global_location_kept_when_contact_has_none() {
        let record = import_lines(&["Jane Smith", "EXPERIENCE", "Initech, Austin, TX"]);
        assert_eq!(
            record.personal_info.location.as_deref(),
            Some("Initech, Austin, TX")
        );
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let record = import_lines(&["", "   ", "Jane Smith", "", "SKILLS", "", "Rust, Go"]);
        assert_eq!(record.personal_info.full_name.as_deref(), Some("Jane Smith"));
        assert_eq!(record.skills.len(), 2);
    }

    #[test]
    fn test_unrecognisable_text_fabricates_nothing() {
        let record = import_lines(&["PROJECTS", "- ~~~ ::: ### ;;; ,,, ... ???  !!! ___ +++ === ***"]);
        assert!(record.projects.is_empty());
        assert_eq!(record.personal_info, Default::default());
    }

    #[test]
    fn test_ids_fresh_across_runs() {
        let first = import_lines(JANE);
        let second = import_lines(JANE);
        assert_ne!(first.experience[0].id, second.experience[0].id);
        assert_ne!(first.education[0].id, second.education[0].id);
    }

    #[test]
    fn test_empty_document() {
        let lines: [&str; 0] = [];
        assert_eq!(import_lines(&lines), PartialResumeRecord::default());
    }
}
