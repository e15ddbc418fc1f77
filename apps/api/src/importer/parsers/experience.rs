//! Experience parser — groups lines into entries.
//!
//! A line is a *header candidate* when it carries a date marker (a year, "Present",
//! "Current") or is short and not a bullet. Header candidates fill, in order:
//! company (+ location after the first comma), then position, then description.
//! Everything else is a description bullet.
//!
//! Flush conditions are deliberately asymmetric:
//! - mid-buffer, a header candidate closes the entry only once it has a company
//!   AND at least one description line;
//! - at the end of the buffer, a company alone is enough.

use crate::importer::parsers::{apply_first, non_empty, Rule};
use crate::importer::patterns::{
    char_len, starts_with_bullet, DATE_MARKER, DATE_TOKEN, LEADING_BULLET, OPEN_ENDED,
    TRAILING_DATE,
};
use crate::models::resume::ExperienceEntry;

const HEADER_MAX_LEN: usize = 60;
/// Header-like lines after company and position are metadata unless this long.
const DETAIL_MIN_LEN: usize = 50;

#[derive(Default)]
struct Draft {
    entry: ExperienceEntry,
    done: Vec<ExperienceEntry>,
}

impl Draft {
    fn ready_to_close(&self) -> bool {
        self.entry.company.is_some() && !self.entry.description.is_empty()
    }

    fn close(&mut self) {
        let entry = std::mem::take(&mut self.entry);
        self.done.push(entry);
    }
}

/// Field cascade for header-candidate lines. First match wins.
const HEADER_FIELDS: &[Rule<Draft>] = &[
    Rule {
        name: "company",
        matches: missing_company,
        apply: set_company,
    },
    Rule {
        name: "position",
        matches: missing_position,
        apply: set_position,
    },
    Rule {
        name: "detail",
        matches: is_detail,
        apply: push_detail,
    },
];

pub fn parse(lines: &[String]) -> Vec<ExperienceEntry> {
    let mut draft = Draft::default();

    for line in lines {
        let has_date = DATE_MARKER.is_match(line);
        let header_candidate =
            has_date || (char_len(line) < HEADER_MAX_LEN && !starts_with_bullet(line));

        if !header_candidate {
            draft
                .entry
                .description
                .push(LEADING_BULLET.replace(line, "").into_owned());
            continue;
        }

        if draft.ready_to_close() {
            draft.close();
        }
        if has_date {
            apply_dates(&mut draft.entry, line);
        }
        apply_first(HEADER_FIELDS, &mut draft, line);
    }

    if draft.entry.company.is_some() {
        draft.close();
    }
    draft.done
}

/// First date token is the start; the second is the end, or marks the role as
/// current when it is open-ended ("Present"/"Current").
fn apply_dates(entry: &mut ExperienceEntry, line: &str) {
    let mut tokens = DATE_TOKEN.find_iter(line).map(|m| m.as_str());

    let Some(start) = tokens.next() else {
        return;
    };
    entry.start_date = Some(start.to_string());

    match tokens.next() {
        Some(end) if OPEN_ENDED.is_match(end) => entry.current = true,
        Some(end) => entry.end_date = Some(end.to_string()),
        None if OPEN_ENDED.is_match(line) => entry.current = true,
        None => {}
    }
}

fn missing_company(draft: &Draft, _line: &str) -> bool {
    draft.entry.company.is_none()
}

/// "Amazon, Bangalore, India" → company "Amazon", location "Bangalore, India".
/// A line without a comma leaves any earlier location in place.
fn set_company(draft: &mut Draft, line: &str) {
    match line.split_once(',') {
        Some((company, rest)) => {
            draft.entry.company = non_empty(company);
            draft.entry.location = non_empty(rest);
        }
        None => draft.entry.company = non_empty(line),
    }
}

fn missing_position(draft: &Draft, _line: &str) -> bool {
    draft.entry.position.is_none()
}

fn set_position(draft: &mut Draft, line: &str) {
    draft.entry.position = non_empty(&TRAILING_DATE.replace(line, ""));
}

/// Short date-bearing lines are metadata and dropped; anything else is kept.
fn is_detail(_draft: &Draft, line: &str) -> bool {
    char_len(line) > DETAIL_MIN_LEN || !DATE_MARKER.is_match(line)
}

fn push_detail(draft: &mut Draft, line: &str) {
    draft.entry.description.push(line.to_string());
}
