//! Section-specific parsers. Each converts one section buffer into entries on the
//! record. Heuristics never fail: an unmatched line simply leaves fields unset.

pub mod achievements;
pub mod contact;
pub mod education;
pub mod experience;
pub mod projects;
pub mod skills;

use tracing::debug;

use crate::importer::segmenter::{Section, SectionBuffer};
use crate::models::resume::PartialResumeRecord;

/// One heuristic in an ordered cascade: `matches` decides, `apply` folds the
/// line into the parser's draft.
pub struct Rule<D> {
    pub name: &'static str,
    pub matches: fn(&D, &str) -> bool,
    pub apply: fn(&mut D, &str),
}

/// Runs the first rule whose predicate accepts the line. Returns its name.
pub fn apply_first<D>(rules: &[Rule<D>], draft: &mut D, line: &str) -> Option<&'static str> {
    let rule = rules.iter().find(|rule| (rule.matches)(draft, line))?;
    (rule.apply)(draft, line);
    Some(rule.name)
}

/// Dispatches a flushed buffer to the parser registered for its section.
pub fn parse_section(buffer: &SectionBuffer, record: &mut PartialResumeRecord) {
    let lines = buffer.lines.as_slice();
    debug!(section = %buffer.section, lines = lines.len(), "Parsing section buffer");

    match buffer.section {
        Section::Contact => contact::parse(lines, &mut record.personal_info),
        Section::Experience => record.experience.extend(experience::parse(lines)),
        Section::Education => record.education.extend(education::parse(lines)),
        Section::Skills => record.skills.extend(skills::parse(lines)),
        Section::Projects => record.projects.extend(projects::parse(lines)),
        Section::Achievements => record.achievements.extend(achievements::parse(lines)),
    }
}

/// Trimmed text, or `None` when nothing is left.
pub(crate) fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
