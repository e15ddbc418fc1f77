//! Section segmentation — partitions reconstructed lines into labeled buffers.
//!
//! The scan is a left fold over the lines carrying `(current section, buffer,
//! flushed buffers)`. Short lines matching a section keyword close the active
//! buffer and switch the label; the header line itself is never buffered.
//! Lines before the first recognised header belong to `Contact`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::importer::patterns::{char_len, EMAIL, LOCATION};

/// Lines at or above this length are never treated as section headers.
pub const HEADER_MAX_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Contact,
    Experience,
    Education,
    Skills,
    Projects,
    Achievements,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Achievements => "achievements",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header keyword patterns, evaluated in this order; the first match wins.
static HEADER_PATTERNS: LazyLock<Vec<(Section, Regex)>> = LazyLock::new(|| {
    [
        (Section::Experience, r"(?i)experience|employment|work history"),
        (Section::Education, r"(?i)education|academic"),
        (Section::Skills, r"(?i)skills|technologies"),
        (Section::Projects, r"(?i)projects"),
        (
            Section::Achievements,
            r"(?i)achievements|awards|honors|certifications",
        ),
    ]
    .into_iter()
    .map(|(section, pattern)| (section, Regex::new(pattern).unwrap()))
    .collect()
});

/// Returns the section a line opens, if it reads like a section header.
pub fn detect_header(line: &str) -> Option<Section> {
    if char_len(line) >= HEADER_MAX_LEN {
        return None;
    }
    HEADER_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(line))
        .map(|(section, _)| *section)
}

/// Lines accumulated under one section label.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBuffer {
    pub section: Section,
    pub lines: Vec<String>,
}

struct ScanState {
    current: Section,
    buffer: Vec<String>,
    flushed: Vec<SectionBuffer>,
}

impl ScanState {
    fn new() -> Self {
        Self {
            current: Section::Contact,
            buffer: Vec::new(),
            flushed: Vec::new(),
        }
    }

    fn step(mut self, line: &str) -> Self {
        match detect_header(line) {
            Some(next) => {
                self.flush();
                self.current = next;
            }
            None => self.buffer.push(line.to_string()),
        }
        self
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        self.flushed.push(SectionBuffer {
            section: self.current,
            lines: std::mem::take(&mut self.buffer),
        });
    }

    fn finish(mut self) -> Vec<SectionBuffer> {
        self.flush();
        self.flushed
    }
}

/// Splits the document into section buffers, in document order.
/// Empty buffers (e.g. two consecutive headers) are not emitted.
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Vec<SectionBuffer> {
    lines
        .iter()
        .fold(ScanState::new(), |state, line| state.step(line.as_ref()))
        .finish()
}

/// Contact details picked up anywhere in the document, regardless of section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalContact {
    /// First e-mail-shaped substring.
    pub email: Option<String>,
    /// First line containing a "City, ST" shape.
    pub location: Option<String>,
}

pub fn scan_global_contact<S: AsRef<str>>(lines: &[S]) -> GlobalContact {
    let mut found = GlobalContact::default();
    for line in lines.iter().map(AsRef::as_ref) {
        if found.email.is_none() {
            found.email = EMAIL.find(line).map(|m| m.as_str().to_string());
        }
        if found.location.is_none() && LOCATION.is_match(line) {
            found.location = Some(line.to_string());
        }
        if found.email.is_some() && found.location.is_some() {
            break;
        }
    }
    found
}
