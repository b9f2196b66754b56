//! Caption matching by spatial proximity.
//!
//! Captions are not linked to tables by relationships; they are free text
//! lines sitting just above the table region. The matcher scans LINE blocks
//! on the table's page and picks the closest qualifying one.

use crate::analysis::types::Block;
use crate::types::Caption;

/// Find the caption line for a table, if any.
///
/// A line qualifies when it is on the same page, carries text, and its
/// bounding-box bottom edge lies within `search_ratio` of page height at or
/// above the table's top edge. Among qualifiers the one with the greatest
/// `top` (immediately above the table) wins; ties keep the first
/// encountered. Tables or lines without geometry never match, and `None`
/// is a common, valid outcome.
pub fn match_caption(table: &Block, lines: &[&Block], search_ratio: f64) -> Option<Caption> {
    let table_box = table.bounding_box()?;
    let table_page = table.page_or_default();

    let mut best: Option<&Block> = None;
    let mut best_top = f64::NEG_INFINITY;

    for line in lines {
        if line.page_or_default() != table_page {
            continue;
        }
        let Some(line_box) = line.bounding_box() else {
            continue;
        };
        let Some(text) = line.text.as_deref() else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        let gap = table_box.top - line_box.bottom();
        if gap < 0.0 || gap > search_ratio {
            continue;
        }

        if line_box.top > best_top {
            best_top = line_box.top;
            best = Some(line);
        }
    }

    best.map(|line| Caption {
        text: line.text.clone().unwrap_or_default(),
        confidence: line.confidence.unwrap_or(0.0),
        bounding_box: line.bounding_box(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_at(top: f64) -> Block {
        serde_json::from_str(&format!(
            r#"{{"Id": "t1", "BlockType": "TABLE", "Page": 1,
                "Geometry": {{"BoundingBox": {{"Width": 0.8, "Height": 0.3, "Left": 0.1, "Top": {top}}}}}}}"#
        ))
        .unwrap()
    }

    fn line_at(id: &str, page: u32, top: f64, height: f64, text: &str) -> Block {
        serde_json::from_str(&format!(
            r#"{{"Id": "{id}", "BlockType": "LINE", "Page": {page}, "Text": "{text}",
                "Confidence": 91.0,
                "Geometry": {{"BoundingBox": {{"Width": 0.5, "Height": {height}, "Left": 0.1, "Top": {top}}}}}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_line_one_percent_above_matches() {
        let table = table_at(0.40);
        // Bottom edge at 0.39: 1% above the table top.
        let line = line_at("l1", 1, 0.37, 0.02, "Table 3. Revenue");
        let lines = vec![&line];
        let caption = match_caption(&table, &lines, 0.02).unwrap();
        assert_eq!(caption.text, "Table 3. Revenue");
        assert_eq!(caption.confidence, 91.0);
        assert!(caption.bounding_box.is_some());
    }

    #[test]
    fn test_line_five_percent_above_does_not_match() {
        let table = table_at(0.40);
        // Bottom edge at 0.35: 5% above the table top.
        let line = line_at("l1", 1, 0.33, 0.02, "Too far");
        let lines = vec![&line];
        assert!(match_caption(&table, &lines, 0.02).is_none());
    }

    #[test]
    fn test_closest_line_wins() {
        let table = table_at(0.40);
        let farther = line_at("l1", 1, 0.375, 0.01, "farther");
        let closer = line_at("l2", 1, 0.385, 0.01, "closer");
        let lines = vec![&farther, &closer];
        let caption = match_caption(&table, &lines, 0.02).unwrap();
        assert_eq!(caption.text, "closer");
    }

    #[test]
    fn test_other_page_ignored() {
        let table = table_at(0.40);
        let line = line_at("l1", 2, 0.385, 0.01, "wrong page");
        let lines = vec![&line];
        assert!(match_caption(&table, &lines, 0.02).is_none());
    }

    #[test]
    fn test_line_below_table_top_ignored() {
        let table = table_at(0.40);
        // Bottom edge at 0.45, below the table top: inside the table.
        let line = line_at("l1", 1, 0.42, 0.03, "inside");
        let lines = vec![&line];
        assert!(match_caption(&table, &lines, 0.02).is_none());
    }

    #[test]
    fn test_textless_line_ignored() {
        let table = table_at(0.40);
        let line: Block = serde_json::from_str(
            r#"{"Id": "l1", "BlockType": "LINE", "Page": 1,
                "Geometry": {"BoundingBox": {"Width": 0.5, "Height": 0.01, "Left": 0.1, "Top": 0.385}}}"#,
        )
        .unwrap();
        let lines = vec![&line];
        assert!(match_caption(&table, &lines, 0.02).is_none());
    }

    #[test]
    fn test_table_without_geometry_has_no_caption() {
        let table: Block =
            serde_json::from_str(r#"{"Id": "t1", "BlockType": "TABLE", "Page": 1}"#).unwrap();
        let line = line_at("l1", 1, 0.385, 0.01, "caption");
        let lines = vec![&line];
        assert!(match_caption(&table, &lines, 0.02).is_none());
    }

    #[test]
    fn test_no_lines_no_caption() {
        let table = table_at(0.40);
        assert!(match_caption(&table, &[], 0.02).is_none());
    }
}
