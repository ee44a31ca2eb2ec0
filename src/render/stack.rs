//! Stacking primitives for container layout.

use crate::dom::props::Align;
use crate::measure::visual_width;
use crate::render::rect::Rect;

/// Stack rectangles top to bottom. Width is the widest child, height the
/// sum of child heights.
pub fn stack_vertically(rects: &[Rect]) -> Rect {
    if rects.is_empty() {
        return Rect::zero();
    }
    let width = rects.iter().map(|r| r.width).max().unwrap_or(0);
    let height = rects.iter().map(|r| r.height).sum();
    let lines = rects.iter().flat_map(|r| r.lines.iter().cloned()).collect();
    Rect {
        width,
        height,
        lines,
    }
}

/// Stack rectangles left to right. Every child is first aligned to the
/// tallest child's height, then same-row lines are concatenated. Each
/// child's lines are padded to its own width so later columns line up.
pub fn stack_horizontally(rects: &[Rect], align: Align) -> Rect {
    if rects.is_empty() {
        return Rect::zero();
    }
    let width = rects.iter().map(|r| r.width).sum();
    let height = rects.iter().map(|r| r.height).max().unwrap_or(0);

    let padded: Vec<Rect> = rects
        .iter()
        .map(|r| pad_vertical(r, height, align))
        .collect();

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let mut line = String::new();
        for rect in &padded {
            let cell = rect.lines.get(row).map(String::as_str).unwrap_or("");
            line.push_str(cell);
            let fill = rect.width.saturating_sub(visual_width(cell));
            if fill > 0 {
                line.push_str(&" ".repeat(fill));
            }
        }
        lines.push(line);
    }

    Rect {
        width,
        height,
        lines,
    }
}

/// Grow a rectangle to `target_height` by inserting blank rows per the
/// alignment: top pads below, bottom pads above, center splits with the
/// extra row below.
pub fn pad_vertical(rect: &Rect, target_height: usize, align: Align) -> Rect {
    if rect.height >= target_height {
        return rect.clone();
    }
    let padding = target_height - rect.height;
    let blank = " ".repeat(rect.width);

    let (above, below) = match align {
        Align::Top => (0, padding),
        Align::Bottom => (padding, 0),
        Align::Center => (padding / 2, padding - padding / 2),
    };

    let mut lines = Vec::with_capacity(target_height);
    lines.extend(std::iter::repeat_n(blank.clone(), above));
    lines.extend(rect.lines.iter().cloned());
    lines.extend(std::iter::repeat_n(blank, below));

    Rect {
        width: rect.width,
        height: target_height,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(lines: &[&str]) -> Rect {
        Rect::from_rendered(&lines.join("\n"))
    }

    #[test]
    fn test_stack_vertically_sums_heights() {
        let result = stack_vertically(&[rect(&["aa"]), rect(&["b", "b"])]);
        assert_eq!((result.width, result.height), (2, 3));
        assert_eq!(result.to_string(), "aa\nb \nb ");
    }

    #[test]
    fn test_stack_horizontally_concatenates_rows() {
        let result = stack_horizontally(&[rect(&["Hello"]), rect(&["World"])], Align::Top);
        assert_eq!((result.width, result.height), (10, 1));
        assert_eq!(result.to_string(), "HelloWorld");
    }

    #[test]
    fn test_stack_horizontally_pads_ragged_child_lines() {
        let result = stack_horizontally(&[rect(&["aa", "b"]), rect(&["X", "Y"])], Align::Top);
        assert_eq!(result.to_string(), "aaX\nb Y");
    }

    #[test]
    fn test_align_top_pads_below() {
        let result = stack_horizontally(&[rect(&["a", "a"]), rect(&["X"])], Align::Top);
        assert_eq!(result.to_string(), "aX\na ");
    }

    #[test]
    fn test_align_bottom_pads_above() {
        let result = stack_horizontally(&[rect(&["a", "a"]), rect(&["X"])], Align::Bottom);
        assert_eq!(result.to_string(), "a \naX");
    }

    #[test]
    fn test_align_center_extra_row_goes_below() {
        let padded = pad_vertical(&rect(&["X"]), 4, Align::Center);
        assert_eq!(padded.lines, vec![" ", "X", " ", " "]);
    }

    #[test]
    fn test_empty_input_is_zero_rect() {
        assert!(stack_vertically(&[]).is_empty());
        assert!(stack_horizontally(&[], Align::Top).is_empty());
    }
}
