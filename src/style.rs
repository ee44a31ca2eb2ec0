//! Style engine: flat styling applied as ANSI output.
//!
//! A [`Style`] captures the flat property set the toolkit understands
//! (colors, weight, padding, an optional rounded border, an optional fixed
//! width) and renders text through it. Rendering is line oriented: every
//! line is padded to a common width so the result is always a rectangular
//! block, which is what the compositor stacks and overlays.
//!
//! The [`StyleSheet`] holds the renderer's base style per node kind;
//! node-level style props are merged on top of the base unless the override
//! opts out with `no_default`.

use std::fmt::Write as _;

use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::measure::visual_width;

// =============================================================================
// STYLE
// =============================================================================

/// Padding inside a styled block (rows above/below, columns left/right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Padding {
    /// Symmetric padding: `vertical` rows and `horizontal` columns.
    pub const fn symmetric(vertical: usize, horizontal: usize) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Flat style for one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub dim: bool,
    pub reverse: bool,
    /// Draw a rounded border around the block.
    pub border: bool,
    pub border_color: Option<Color>,
    pub padding: Padding,
    /// Fixed content width; content narrower than this is padded out.
    pub width: Option<usize>,
    /// When set on a node override, the renderer's base style is ignored.
    pub no_default: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border = true;
        self.border_color = Some(color);
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Layer `over` on top of this style. Colors and sizes set in `over`
    /// win; boolean attributes accumulate.
    pub fn merge(&self, over: &Style) -> Style {
        Style {
            fg: over.fg.or(self.fg),
            bg: over.bg.or(self.bg),
            bold: self.bold || over.bold,
            italic: self.italic || over.italic,
            underline: self.underline || over.underline,
            strikethrough: self.strikethrough || over.strikethrough,
            dim: self.dim || over.dim,
            reverse: self.reverse || over.reverse,
            border: self.border || over.border,
            border_color: over.border_color.or(self.border_color),
            padding: if over.padding.is_zero() {
                self.padding
            } else {
                over.padding
            },
            width: over.width.or(self.width),
            no_default: false,
        }
    }

    /// Render `text` through this style into an ANSI string.
    ///
    /// The result is rectangular: every line is padded to the common content
    /// width before colors and the border are applied.
    pub fn render(&self, text: &str) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let content_width = lines
            .iter()
            .map(|l| visual_width(l))
            .max()
            .unwrap_or(0)
            .max(self.width.unwrap_or(0));
        let padded_width = content_width + self.padding.left + self.padding.right;

        let mut rows: Vec<String> = Vec::with_capacity(
            lines.len() + self.padding.top + self.padding.bottom + if self.border { 2 } else { 0 },
        );
        for _ in 0..self.padding.top {
            rows.push(" ".repeat(padded_width));
        }
        for line in &lines {
            let fill = content_width - visual_width(line);
            rows.push(format!(
                "{}{}{}{}",
                " ".repeat(self.padding.left),
                line,
                " ".repeat(fill),
                " ".repeat(self.padding.right),
            ));
        }
        for _ in 0..self.padding.bottom {
            rows.push(" ".repeat(padded_width));
        }

        let sgr = self.sgr_prefix();
        if !sgr.is_empty() {
            let reset = format!("{}", SetAttribute(Attribute::Reset));
            for row in &mut rows {
                *row = format!("{sgr}{row}{reset}");
            }
        }

        if self.border {
            rows = self.draw_border(rows, padded_width);
        }

        rows.join("\n")
    }

    fn sgr_prefix(&self) -> String {
        let mut out = String::new();
        if let Some(fg) = self.fg {
            let _ = write!(out, "{}", SetForegroundColor(fg));
        }
        if let Some(bg) = self.bg {
            let _ = write!(out, "{}", SetBackgroundColor(bg));
        }
        if self.bold {
            let _ = write!(out, "{}", SetAttribute(Attribute::Bold));
        }
        if self.italic {
            let _ = write!(out, "{}", SetAttribute(Attribute::Italic));
        }
        if self.underline {
            let _ = write!(out, "{}", SetAttribute(Attribute::Underlined));
        }
        if self.strikethrough {
            let _ = write!(out, "{}", SetAttribute(Attribute::CrossedOut));
        }
        if self.dim {
            let _ = write!(out, "{}", SetAttribute(Attribute::Dim));
        }
        if self.reverse {
            let _ = write!(out, "{}", SetAttribute(Attribute::Reverse));
        }
        out
    }

    fn draw_border(&self, rows: Vec<String>, inner_width: usize) -> Vec<String> {
        let paint = |s: String| -> String {
            match self.border_color {
                Some(color) => format!(
                    "{}{}{}",
                    SetForegroundColor(color),
                    s,
                    SetAttribute(Attribute::Reset)
                ),
                None => s,
            }
        };
        let edge = |left: char, right: char| {
            paint(format!("{left}{}{right}", "─".repeat(inner_width)))
        };
        let side = paint("│".to_string());

        let mut out = Vec::with_capacity(rows.len() + 2);
        out.push(edge('╭', '╮'));
        for row in rows {
            out.push(format!("{side}{row}{side}"));
        }
        out.push(edge('╰', '╯'));
        out
    }
}

// =============================================================================
// STYLE SHEET
// =============================================================================

/// The renderer's base styles, one per node kind that carries a default.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    pub title: Style,
    pub subtitle: Style,
    pub text: Style,
    pub button: Style,
    pub input: Style,
    pub placeholder: Style,
    pub list_item: Style,
    pub list_item_selected: Style,
    pub plain: Style,
}

impl StyleSheet {
    /// Responsive variant for a terminal width: inputs widen with the
    /// window, clamped to a readable range.
    pub fn for_window(&self, width: usize) -> StyleSheet {
        let mut sheet = self.clone();
        if width > 0 {
            sheet.input.width = Some(width.saturating_sub(8).clamp(30, 80));
        }
        sheet
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: Style::new().bold().fg(Color::Cyan),
            subtitle: Style::new().bold(),
            text: Style::new(),
            button: Style::new().bold(),
            input: Style::new().bordered(),
            placeholder: Style::new().dim().italic(),
            list_item: Style::new(),
            list_item_selected: Style::new().fg(Color::Green),
            plain: Style::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{strip_ansi, visual_width};

    #[test]
    fn test_plain_style_is_identity_per_line() {
        assert_eq!(Style::new().render("hello"), "hello");
    }

    #[test]
    fn test_multi_line_render_is_rectangular() {
        let out = Style::new().render("ab\nabcd");
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines, vec!["ab  ", "abcd"]);
    }

    #[test]
    fn test_fg_wraps_with_sgr() {
        let out = Style::new().fg(Color::Red).render("x");
        assert!(out.contains('\x1b'));
        assert_eq!(strip_ansi(&out), "x");
        assert_eq!(visual_width(&out), 1);
    }

    #[test]
    fn test_padding_grows_the_block() {
        let out = Style::new()
            .padding(Padding::symmetric(1, 2))
            .render("hi");
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines, vec!["      ", "  hi  ", "      "]);
    }

    #[test]
    fn test_border_adds_frame() {
        let out = Style::new().bordered().render("hi");
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines, vec!["╭──╮", "│hi│", "╰──╯"]);
        assert_eq!(visual_width(lines[0]), 4);
    }

    #[test]
    fn test_fixed_width_pads_content() {
        let out = Style::new().width(5).render("ab");
        assert_eq!(out, "ab   ");
    }

    #[test]
    fn test_for_window_clamps_input_width() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.for_window(100).input.width, Some(80));
        assert_eq!(sheet.for_window(50).input.width, Some(42));
        assert_eq!(sheet.for_window(20).input.width, Some(30));
        assert_eq!(sheet.for_window(0).input.width, None);
    }

    #[test]
    fn test_merge_prefers_override_colors_and_ors_attributes() {
        let base = Style::new().bold().fg(Color::Red);
        let over = Style::new().italic().fg(Color::Blue);
        let merged = base.merge(&over);
        assert_eq!(merged.fg, Some(Color::Blue));
        assert!(merged.bold);
        assert!(merged.italic);
    }
}
