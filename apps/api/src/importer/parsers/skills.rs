//! Skills parser: a flat token list, one entry per token.

use uuid::Uuid;

use crate::importer::patterns::{char_len, SKILL_SEPARATOR};
use crate::models::resume::SkillEntry;

pub const DEFAULT_CATEGORY: &str = "General";

/// Tokens must be longer than this...
const MIN_LEN: usize = 1;
/// ...and shorter than this to count as a skill.
const MAX_LEN: usize = 30;

/// Joins the buffer with `, ` and re-splits on commas, bullets, pipes, or runs
/// of two or more spaces.
pub fn parse(lines: &[String]) -> Vec<SkillEntry> {
    let joined = lines.join(", ");
    SKILL_SEPARATOR
        .split(&joined)
        .map(str::trim)
        .filter(|token| {
            let len = char_len(token);
            len > MIN_LEN && len < MAX_LEN
        })
        .map(|name| SkillEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        })
        .collect()
}
