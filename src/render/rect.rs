//! Rendered rectangles.
//!
//! A [`Rect`] is the unit of composition: a block of lines with a known
//! visual width and height. Lines may carry ANSI escapes and may be
//! ragged while a rectangle is under construction; [`Rect`] normalizes on
//! display so every emitted line is exactly `width` columns.

use std::fmt;

use crate::measure::{truncate_visible, visual_width};

/// A rendered box: `height` lines of `width` visual columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rect {
    /// Visual columns, ANSI excluded.
    pub width: usize,
    /// Line count.
    pub height: usize,
    /// Rendered content; normalized to exactly `height` lines of `width`
    /// columns by [`Rect::to_string`].
    pub lines: Vec<String>,
}

impl Rect {
    /// The zero-size rectangle.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A `width` x `height` block of spaces.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            lines: vec![" ".repeat(width); height],
        }
    }

    /// Wrap an already-rendered string. Width is the widest line's visual
    /// width; a trailing newline is dropped first.
    ///
    /// Note the empty string still yields one (empty) line, so callers
    /// wanting a zero-size rectangle must not pass `""` here.
    pub fn from_rendered(content: &str) -> Self {
        let content = content.strip_suffix('\n').unwrap_or(content);
        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let width = lines.iter().map(|l| visual_width(l)).max().unwrap_or(0);
        Self {
            width,
            height: lines.len(),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// One normalized line: truncated when too wide (escapes preserved),
    /// space-padded when too narrow, blank when missing.
    fn normalized_line(&self, row: usize) -> String {
        let line = self.lines.get(row).map(String::as_str).unwrap_or("");
        let line_width = visual_width(line);
        if line_width > self.width {
            truncate_visible(line, self.width)
        } else {
            format!("{line}{}", " ".repeat(self.width - line_width))
        }
    }
}

/// Emits exactly `height` lines, each exactly `width` visual columns.
impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&self.normalized_line(row))?;
        }
        Ok(())
    }
}
