//! Compiled heuristics shared by the segmenter and the section parsers.

use regex::Regex;
use std::sync::LazyLock;

pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9._-]+").unwrap());

/// Optional `+country` prefix, then a 3-3-4 digit grouping with optional separators.
pub static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+[0-9]{1,3}[- ]?)?\(?[0-9]{3}\)?[- ]?[0-9]{3}[- ]?[0-9]{4}").unwrap()
});

/// "City, ST" shape: capitalized word, comma, two capital letters.
pub static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+, [A-Z]{2}").unwrap());

/// Five consecutive digits; usually a postal code, never part of a name.
pub static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{5}").unwrap());

pub static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").unwrap());

/// A year or an open-ended marker anywhere in the line.
pub static DATE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:(?:19|20)[0-9]{2}|present|current)\b").unwrap());

/// Month-year, numeric month/year, bare year, or an open-ended marker.
pub static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+[0-9]{4}|[0-9]{1,2}/[0-9]{4}|[0-9]{4}|present|current)",
    )
    .unwrap()
});

pub static OPEN_ENDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)present|current").unwrap());

/// Everything from the first four-digit run to the end of the line.
pub static TRAILING_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}.*").unwrap());

pub static LEADING_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[•-]\s*").unwrap());

pub static SCHOOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)university|college|school|institute").unwrap());

pub static DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:degree|bachelor|master|phd|bs|ms|ba|ma|b\.s|m\.s)\b").unwrap()
});

pub static SKILL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,•|]|\s{2,}").unwrap());

/// Bullet markers that open a description line.
pub fn starts_with_bullet(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('•')
}

/// Length in characters, not bytes; thresholds are tuned for visible text.
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}
