//! Contact block: everything before the first recognised section header.

use crate::importer::patterns::{char_len, EMAIL, LOCATION, PHONE, POSTAL_CODE};
use crate::models::resume::PersonalInfo;

const NAME_MAX_LEN: usize = 50;
const LOCATION_MAX_LEN: usize = 30;

/// Fills contact fields from the buffer. Name, e-mail and phone keep the first
/// value found; profile links and location take the last matching line.
pub fn parse(lines: &[String], info: &mut PersonalInfo) {
    if info.full_name.is_none() {
        info.full_name = lines.first().filter(|line| looks_like_name(line)).cloned();
    }

    let block = lines.join(" ");
    if info.email.is_none() {
        info.email = EMAIL.find(&block).map(|m| m.as_str().to_string());
    }
    if info.phone.is_none() {
        info.phone = PHONE.find(&block).map(|m| m.as_str().to_string());
    }

    for line in lines {
        let lower = line.to_lowercase();
        if lower.contains("linkedin.com") {
            info.linkedin = Some(line.clone());
        }
        if lower.contains("github.com") {
            info.github = Some(line.clone());
        }
        if char_len(line) < LOCATION_MAX_LEN && LOCATION.is_match(line) {
            info.location = Some(line.clone());
        }
    }
}

/// Short, no `@`, and no five-digit run (postal codes sit on address lines).
fn looks_like_name(line: &str) -> bool {
    char_len(line) < NAME_MAX_LEN && !line.contains('@') && !POSTAL_CODE.is_match(line)
}
