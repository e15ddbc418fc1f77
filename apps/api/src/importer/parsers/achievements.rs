//! Achievements parser: one entry per line, title verbatim.

use uuid::Uuid;

use crate::importer::patterns::char_len;
use crate::models::resume::AchievementEntry;

const MIN_LEN: usize = 3;

pub fn parse(lines: &[String]) -> Vec<AchievementEntry> {
    lines
        .iter()
        .filter(|line| char_len(line) > MIN_LEN)
        .map(|line| AchievementEntry {
            id: Uuid::new_v4(),
            title: line.clone(),
            description: None,
            date: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_line_becomes_an_achievement() {
        let entries = parse(&[
            "AWS Certified Solutions Architect (2022)".to_string(),
            "N/A".to_string(),
            "Hackathon winner".to_string(),
        ]);
        let titles: Vec<_> = entries.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["AWS Certified Solutions Architect (2022)", "Hackathon winner"]
        );
        // No date or description extraction.
        assert!(entries.iter().all(|a| a.date.is_none() && a.description.is_none()));
    }
}
