//! Visual width and height of rendered text.

use unicode_width::UnicodeWidthStr;

use super::ansi::strip_ansi;

/// Terminal cell width of the visible text (escape sequences excluded,
/// East Asian wide characters counted as two columns).
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_ref())
}

/// Widest line of a multi-line rendered string.
pub fn max_line_width(s: &str) -> usize {
    s.split('\n').map(visual_width).max().unwrap_or(0)
}

/// Number of rendered lines. Empty input still occupies one line.
pub fn line_count(s: &str) -> usize {
    s.split('\n').count()
}
