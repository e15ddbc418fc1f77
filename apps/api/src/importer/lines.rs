//! Line reconstruction — turns positioned fragments into reading-order lines.
//!
//! Coordinates are PDF user space: origin bottom-left, larger `y` is higher on the page.
//! Fragments are banded top-to-bottom (fragments within `LINE_TOLERANCE` of a band's
//! highest fragment share the band), left-to-right inside a band, then walked once.
//! During the walk a new line starts whenever a fragment sits more than
//! `LINE_TOLERANCE` away from the y of the fragment that opened the current line.

use std::cmp::Ordering;

use crate::importer::extract::PositionedFragment;

/// Maximum vertical distance, in PDF units, between fragments on the same visual line.
pub const LINE_TOLERANCE: f64 = 5.0;

/// Reconstructs the lines of a single page. Output lines are trimmed and never empty.
pub fn reconstruct_page(fragments: &[PositionedFragment]) -> Vec<String> {
    let ordered = reading_order(fragments);

    let mut lines = Vec::new();
    let mut current: Option<(String, f64)> = None;

    for fragment in ordered {
        let starts_new_line = match &current {
            None => true,
            Some((_, reference_y)) => (fragment.y - reference_y).abs() > LINE_TOLERANCE,
        };

        if starts_new_line {
            if let Some((text, _)) = current.take() {
                push_line(&mut lines, &text);
            }
            current = Some((fragment.text.clone(), fragment.y));
        } else if let Some((text, _)) = current.as_mut() {
            append_fragment(text, &fragment.text);
        }
    }

    if let Some((text, _)) = current {
        push_line(&mut lines, &text);
    }

    lines
}

/// Reconstructs every page in document order and concatenates the results.
/// Page boundaries leave no marker; segmentation is page-agnostic.
pub fn reconstruct_document(pages: &[Vec<PositionedFragment>]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| reconstruct_page(page))
        .collect()
}

/// Sorts fragments top-to-bottom, then left-to-right within each tolerance band.
///
/// A pairwise "within tolerance → compare x" comparator is not transitive, so the
/// bands are formed explicitly and the sort itself stays a total order.
fn reading_order(fragments: &[PositionedFragment]) -> Vec<&PositionedFragment> {
    let mut by_height: Vec<&PositionedFragment> = fragments.iter().collect();
    by_height.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut ordered = Vec::with_capacity(by_height.len());
    let mut band: Vec<&PositionedFragment> = Vec::new();
    let mut band_top = f64::NAN;

    for fragment in by_height {
        if band.is_empty() || (band_top - fragment.y).abs() > LINE_TOLERANCE {
            flush_band(&mut band, &mut ordered);
            band_top = fragment.y;
        }
        band.push(fragment);
    }
    flush_band(&mut band, &mut ordered);

    ordered
}

fn flush_band<'a>(band: &mut Vec<&'a PositionedFragment>, out: &mut Vec<&'a PositionedFragment>) {
    band.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    out.append(band);
}

fn append_fragment(line: &mut String, fragment: &str) {
    let line_ends_blank = line.chars().last().map_or(true, char::is_whitespace);
    let fragment_starts_blank = fragment.chars().next().map_or(true, char::is_whitespace);
    if !line_ends_blank && !fragment_starts_blank {
        line.push(' ');
    }
    line.push_str(fragment);
}

fn push_line(lines: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f64, y: f64) -> PositionedFragment {
        PositionedFragment {
            text: text.to_string(),
            x,
            y,
            height: 10.0,
        }
    }

    #[test]
    fn test_same_line_fragments_merge_left_to_right() {
        let fragments = vec![frag("C", 0.0, 50.0), frag("B", 50.0, 100.0), frag("A", 0.0, 100.0)];
        assert_eq!(reconstruct_page(&fragments), vec!["A B", "C"]);
    }

    #[test]
    fn test_gap_above_tolerance_splits_lines() {
        let fragments = vec![frag("top", 0.0, 100.0), frag("bottom", 0.0, 94.0)];
        assert_eq!(reconstruct_page(&fragments), vec!["top", "bottom"]);
    }

    #[test]
    fn test_gap_within_tolerance_merges() {
        let fragments = vec![frag("left", 0.0, 100.0), frag("right", 40.0, 96.0)];
        assert_eq!(reconstruct_page(&fragments), vec!["left right"]);
    }

    #[test]
    fn test_gap_exactly_at_tolerance_merges() {
        let fragments = vec![frag("a", 0.0, 100.0), frag("b", 10.0, 95.0)];
        assert_eq!(reconstruct_page(&fragments), vec!["a b"]);
    }

    #[test]
    fn test_no_double_space_when_fragment_carries_whitespace() {
        let fragments = vec![frag("Senior ", 0.0, 100.0), frag("Engineer", 30.0, 100.0)];
        assert_eq!(reconstruct_page(&fragments), vec!["Senior Engineer"]);

        let fragments = vec![frag("Senior", 0.0, 100.0), frag(" Engineer", 30.0, 100.0)];
        assert_eq!(reconstruct_page(&fragments), vec!["Senior Engineer"]);
    }

    #[test]
    fn test_whitespace_only_lines_are_dropped() {
        let fragments = vec![frag("   ", 0.0, 200.0), frag("text", 0.0, 100.0)];
        assert_eq!(reconstruct_page(&fragments), vec!["text"]);
    }

    #[test]
    fn test_reference_y_is_line_start_not_band_average() {
        // 100 → 96 merges (Δ4), 96 → 92 is measured against 100 (Δ8) and splits.
        let fragments = vec![
            frag("one", 0.0, 100.0),
            frag("two", 10.0, 96.0),
            frag("three", 0.0, 92.0),
        ];
        assert_eq!(reconstruct_page(&fragments), vec!["one two", "three"]);
    }

    #[test]
    fn test_empty_page_yields_no_lines() {
        assert!(reconstruct_page(&[]).is_empty());
    }

    #[test]
    fn test_pages_concatenate_in_order() {
        let pages = vec![
            vec![frag("page one", 0.0, 700.0)],
            vec![frag("page two", 0.0, 700.0)],
        ];
        assert_eq!(reconstruct_document(&pages), vec!["page one", "page two"]);
    }
}
