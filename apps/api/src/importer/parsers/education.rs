//! Education parser. A school-keyword line opens an entry; degree and year lines
//! fill the open entry (last one wins). Entries without a school are discarded.

use crate::importer::parsers::{apply_first, Rule};
use crate::importer::patterns::{DEGREE, SCHOOL, YEAR};
use crate::models::resume::EducationEntry;

#[derive(Default)]
struct Draft {
    entry: EducationEntry,
    done: Vec<EducationEntry>,
}

const LINE_RULES: &[Rule<Draft>] = &[
    Rule {
        name: "school",
        matches: names_school,
        apply: open_school,
    },
    Rule {
        name: "degree",
        matches: names_degree,
        apply: set_degree,
    },
    Rule {
        name: "year",
        matches: carries_year,
        apply: set_end_date,
    },
];

pub fn parse(lines: &[String]) -> Vec<EducationEntry> {
    let mut draft = Draft::default();
    for line in lines {
        apply_first(LINE_RULES, &mut draft, line);
    }
    if draft.entry.school.is_some() {
        draft.done.push(draft.entry);
    }
    draft.done
}

fn names_school(_draft: &Draft, line: &str) -> bool {
    SCHOOL.is_match(line)
}

fn open_school(draft: &mut Draft, line: &str) {
    if draft.entry.school.is_some() {
        let finished = std::mem::take(&mut draft.entry);
        draft.done.push(finished);
    }
    draft.entry.school = Some(line.to_string());
}

fn names_degree(_draft: &Draft, line: &str) -> bool {
    DEGREE.is_match(line)
}

fn set_degree(draft: &mut Draft, line: &str) {
    draft.entry.degree = Some(line.to_string());
}

fn carries_year(_draft: &Draft, line: &str) -> bool {
    YEAR.is_match(line)
}

fn set_end_date(draft: &mut Draft, line: &str) {
    draft.entry.end_date = Some(line.to_string());
}
