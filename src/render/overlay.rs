//! Z-order composition of rectangles.
//!
//! [`overlay`] merges a child rectangle on top of a parent at the origin.
//! The crux is the shadowing rule: only columns within the child's
//! *authored* width shadow the parent. Padding added to align the child
//! to the result width never shadows, so a narrow dialog floating over a
//! wide background leaves the background visible to its right.
//!
//! The character-level merge works on ANSI-stripped text; styling inside
//! the overlapped region is dropped rather than risk splicing escape
//! sequences mid-parameter. Plain-text shadowing is a deliberate scope
//! limit of this composition step.

use crate::measure::{strip_ansi, visual_width};
use crate::render::rect::Rect;

/// Composite `child` over `parent` at the origin. Result dimensions are
/// the component-wise max of the two.
pub fn overlay(parent: &Rect, child: &Rect) -> Rect {
    let width = parent.width.max(child.width);
    let height = parent.height.max(child.height);

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let base = match parent.lines.get(row) {
            Some(line) => pad_to(line, width),
            None => " ".repeat(width),
        };
        let merged = match child.lines.get(row) {
            Some(line) => overlay_line(&base, &pad_to(line, width), child.width),
            None => base,
        };
        lines.push(merged);
    }

    Rect {
        width,
        height,
        lines,
    }
}

fn pad_to(line: &str, width: usize) -> String {
    let line_width = visual_width(line);
    if line_width < width {
        format!("{line}{}", " ".repeat(width - line_width))
    } else {
        line.to_string()
    }
}

/// Merge one row. Columns below `shadow_width` come from the child; past
/// it the parent shows through the child's alignment padding.
fn overlay_line(parent: &str, child: &str, shadow_width: usize) -> String {
    if shadow_width == 0 {
        return parent.to_string();
    }

    let parent_chars: Vec<char> = strip_ansi(parent).chars().collect();
    let child_chars: Vec<char> = strip_ansi(child).chars().collect();
    let len = parent_chars.len().max(child_chars.len());

    let mut out = String::with_capacity(len);
    for col in 0..len {
        if col < shadow_width && col < child_chars.len() {
            out.push(child_chars[col]);
        } else if col < parent_chars.len() {
            out.push(parent_chars[col]);
        } else {
            out.push(' ');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(lines: &[&str]) -> Rect {
        Rect::from_rendered(&lines.join("\n"))
    }

    #[test]
    fn test_child_shadows_only_authored_width() {
        let parent = rect(&["AAAAA"]);
        let child = rect(&["B"]);
        assert_eq!(overlay(&parent, &child).to_string(), "BAAAA");
    }

    #[test]
    fn test_result_is_componentwise_max() {
        let parent = rect(&["AAA", "AAA"]);
        let child = rect(&["BBBB"]);
        let result = overlay(&parent, &child);
        assert_eq!((result.width, result.height), (4, 2));
        assert_eq!(result.to_string(), "BBBB\nAAA ");
    }

    #[test]
    fn test_child_spaces_within_width_do_shadow() {
        // A dialog's interior blanks out what is behind it.
        let parent = rect(&["XXXXX"]);
        let child = rect(&["A B"]);
        assert_eq!(overlay(&parent, &child).to_string(), "A BXX");
    }

    #[test]
    fn test_parent_shows_through_missing_child_rows() {
        let parent = rect(&["AAA", "AAA", "AAA"]);
        let child = rect(&["BB"]);
        assert_eq!(overlay(&parent, &child).to_string(), "BBA\nAAA\nAAA");
    }

    #[test]
    fn test_stacking_order_is_top_down() {
        let base = rect(&["AAAAAA"]);
        let mid = rect(&["BBBB"]);
        let top = rect(&["CC"]);
        let composed = overlay(&overlay(&base, &mid), &top);
        assert_eq!(composed.to_string(), "CCBBAA");

        let swapped = overlay(&overlay(&base, &top), &mid);
        assert_eq!(swapped.to_string(), "BBBBAA");
    }

    #[test]
    fn test_overlay_drops_ansi_in_merged_rows() {
        let parent = rect(&["\x1b[31mAAAA\x1b[0m"]);
        let child = rect(&["B"]);
        let result = overlay(&parent, &child);
        assert_eq!(result.lines[0], "BAAA");
    }

    #[test]
    fn test_zero_width_child_is_identity() {
        let parent = rect(&["AA"]);
        let child = Rect {
            width: 0,
            height: 1,
            lines: vec![String::new()],
        };
        assert_eq!(overlay(&parent, &child).to_string(), "AA");
    }
}
