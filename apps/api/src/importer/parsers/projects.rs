//! Projects parser. Short, unbulleted lines are titles; everything else extends
//! the running description. Technologies are never inferred.

use crate::importer::parsers::{apply_first, Rule};
use crate::importer::patterns::{char_len, starts_with_bullet};
use crate::models::resume::ProjectEntry;

const TITLE_MAX_LEN: usize = 50;

#[derive(Default)]
struct Draft {
    entry: ProjectEntry,
    done: Vec<ProjectEntry>,
}

impl Draft {
    fn close(&mut self) {
        let mut entry = std::mem::take(&mut self.entry);
        entry.description.truncate(entry.description.trim_end().len());
        self.done.push(entry);
    }
}

const LINE_RULES: &[Rule<Draft>] = &[
    Rule {
        name: "title",
        matches: looks_like_title,
        apply: open_project,
    },
    Rule {
        name: "description",
        matches: always,
        apply: extend_description,
    },
];

pub fn parse(lines: &[String]) -> Vec<ProjectEntry> {
    let mut draft = Draft::default();
    for line in lines {
        apply_first(LINE_RULES, &mut draft, line);
    }
    if draft.entry.name.is_some() {
        draft.close();
    }
    draft.done
}

fn looks_like_title(_draft: &Draft, line: &str) -> bool {
    char_len(line) < TITLE_MAX_LEN && !starts_with_bullet(line)
}

fn open_project(draft: &mut Draft, line: &str) {
    if draft.entry.name.is_some() {
        draft.close();
    }
    draft.entry.name = Some(line.to_string());
}

fn always(_draft: &Draft, _line: &str) -> bool {
    true
}

fn extend_description(draft: &mut Draft, line: &str) {
    draft.entry.description.push_str(line);
    draft.entry.description.push(' ');
}
