//! Rectangle layout engine.
//!
//! [`Renderer`] turns a node plus an available width/height budget into a
//! [`Rect`], recursively:
//!
//! - text-bearing leaves render through the style engine and are measured
//!   ANSI-aware
//! - vertical containers stack children against the same width and a
//!   decreasing height budget
//! - horizontal containers stack children against the same height and a
//!   decreasing width budget, distributing leftover width across spacers
//! - overlay containers composite children back-to-front via [`overlay`]
//!
//! Rendering is pure: a fresh rectangle tree per call, no state carried
//! between frames.

pub mod overlay;
pub mod rect;
pub mod stack;

use std::fmt::Write as _;

use crossterm::style::{Attribute, SetAttribute};
use tracing::trace;

use crate::dom::node::{Node, NodeKind};
use crate::dom::props::{Align, Props, SpacerProps};
use crate::render::overlay::overlay;
use crate::render::rect::Rect;
use crate::render::stack::{stack_horizontally, stack_vertically};
use crate::style::{Style, StyleSheet};

/// Renders node trees into rectangles with a fixed style sheet.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    styles: StyleSheet,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_styles(styles: StyleSheet) -> Self {
        Self { styles }
    }

    /// Render a whole frame: the root against the terminal budget with the
    /// style sheet adjusted to the window width, normalized to a printable
    /// string.
    pub fn render_to_string(&self, root: &Node, width: usize, height: usize) -> String {
        let frame = Self {
            styles: self.styles.for_window(width),
        };
        frame.render(root, width, height).to_string()
    }

    /// Render one node against a width/height budget.
    pub fn render(&self, node: &Node, width: usize, height: usize) -> Rect {
        match &node.kind {
            NodeKind::Text => self.render_text(node),
            NodeKind::Span
            | NodeKind::Heading1
            | NodeKind::Heading2
            | NodeKind::Paragraph => self.render_leaf(node),
            NodeKind::Button => self.render_button(node),
            NodeKind::Input => self.render_input(node),
            NodeKind::ListItem => self.render_list_item(node),
            NodeKind::Div => self.render_div(node, width, height),
            NodeKind::List | NodeKind::Fragment => self.stack_vertical(node, width, height),
            NodeKind::HDiv => self.render_hdiv(node, width, height),
            NodeKind::ZDiv => self.render_zdiv(node, width, height),
            NodeKind::LineBreak => Rect {
                width: 0,
                height: 1,
                lines: vec![String::new()],
            },
            NodeKind::Spacer => spacer_standalone(&node.props),
            NodeKind::FixedSpacer => fixed_spacer_horizontal(&node.props),
            NodeKind::Custom(_) => self.render_unknown(node, width, height),
        }
    }

    // =========================================================================
    // LEAVES
    // =========================================================================

    fn node_style(&self, node: &Node) -> Style {
        let base = match &node.kind {
            NodeKind::Heading1 => &self.styles.title,
            NodeKind::Heading2 => &self.styles.subtitle,
            NodeKind::Paragraph | NodeKind::Text => &self.styles.text,
            NodeKind::Button => &self.styles.button,
            NodeKind::Input => &self.styles.input,
            NodeKind::ListItem => &self.styles.list_item,
            _ => &self.styles.plain,
        };
        match node.props.style() {
            Some(over) if over.no_default => over.clone(),
            Some(over) => base.merge(over),
            None => base.clone(),
        }
    }

    fn render_text(&self, node: &Node) -> Rect {
        if node.text.is_empty() {
            return Rect::zero();
        }
        Rect::from_rendered(&self.node_style(node).render(&node.text))
    }

    fn render_leaf(&self, node: &Node) -> Rect {
        Rect::from_rendered(&self.node_style(node).render(&node.text))
    }

    fn render_button(&self, node: &Node) -> Rect {
        let mut style = self.node_style(node);
        if node.props.focused() {
            style.reverse = true;
        }
        Rect::from_rendered(&style.render(&node.text))
    }

    fn render_list_item(&self, node: &Node) -> Rect {
        let selected = matches!(&node.props, Props::Text(p) if p.selected);
        let prefix = if selected { "> " } else { "• " };
        let style = if selected {
            self.styles.list_item_selected.clone()
        } else {
            self.node_style(node)
        };
        Rect::from_rendered(&style.render(&format!("{prefix}{}", node.text)))
    }

    /// Inputs render their value (or placeholder) with a block cursor when
    /// focused, wrapped in the input style.
    fn render_input(&self, node: &Node) -> Rect {
        let input = node.props.as_input();
        let mut content = String::new();

        if input.value.is_empty() {
            if input.focused {
                let _ = write!(
                    content,
                    "{} {}",
                    SetAttribute(Attribute::Reverse),
                    SetAttribute(Attribute::Reset)
                );
            } else {
                content = self.styles.placeholder.render(&input.placeholder);
            }
        } else if input.focused {
            let chars: Vec<char> = input.value.chars().collect();
            let cursor = input.cursor_position.min(chars.len());
            let before: String = chars[..cursor].iter().collect();
            let under: String = chars.get(cursor).map(|c| c.to_string()).unwrap_or(" ".into());
            let after: String = chars.get(cursor + 1..).map(|c| c.iter().collect()).unwrap_or_default();
            let _ = write!(
                content,
                "{before}{}{under}{}{after}",
                SetAttribute(Attribute::Reverse),
                SetAttribute(Attribute::Reset)
            );
        } else {
            content = input.value.clone();
        }

        Rect::from_rendered(&self.node_style(node).render(&content))
    }

    // =========================================================================
    // CONTAINERS
    // =========================================================================

    /// Vertical flow shared by lists and fragments: same width, shrinking
    /// height budget, children stacked top to bottom.
    fn stack_vertical(&self, node: &Node, width: usize, height: usize) -> Rect {
        let mut rects = Vec::new();
        let mut remaining = height;
        for child in &node.children {
            if remaining == 0 {
                break;
            }
            // In a vertical flow a fixed spacer consumes height, not width.
            let rect = if child.kind == NodeKind::FixedSpacer {
                fixed_spacer_vertical(&child.props)
            } else {
                self.render(child, width, remaining)
            };
            if rect.height > 0 {
                remaining = remaining.saturating_sub(rect.height);
                rects.push(rect);
            }
        }
        stack_vertically(&rects)
    }

    fn render_div(&self, node: &Node, width: usize, height: usize) -> Rect {
        let content = self.stack_vertical(node, width, height);
        let style = self.node_style(node);
        if style == Style::default() {
            return content;
        }
        if content.is_empty() {
            return content;
        }
        // Border and padding wrap the stacked content as one more pass
        // through the style engine, then the result is re-measured.
        Rect::from_rendered(&style.render(&content.to_string()))
    }

    fn render_hdiv(&self, node: &Node, width: usize, height: usize) -> Rect {
        let mut rects: Vec<Rect> = Vec::new();
        let mut spacers: Vec<(usize, SpacerProps)> = Vec::new();
        let mut remaining = width;

        for child in &node.children {
            if remaining == 0 {
                break;
            }
            match child.kind {
                NodeKind::FixedSpacer => {
                    let rect = fixed_spacer_horizontal(&child.props);
                    remaining = remaining.saturating_sub(rect.width);
                    rects.push(rect);
                }
                NodeKind::Spacer => {
                    // Deferred: a zero-width placeholder of the row's height,
                    // widened after the other children are measured.
                    spacers.push((rects.len(), child.props.as_spacer()));
                    rects.push(Rect {
                        width: 0,
                        height,
                        lines: vec![String::new(); height],
                    });
                }
                _ => {
                    let rect = self.render(child, remaining, height);
                    if rect.width > 0 {
                        remaining = remaining.saturating_sub(rect.width);
                        rects.push(rect);
                    }
                }
            }
        }

        if rects.is_empty() {
            return Rect::zero();
        }
        if remaining > 0 && !spacers.is_empty() {
            distribute_spacers(&mut rects, &spacers, remaining);
        }

        let align = match &node.props {
            Props::Div(p) => p.align,
            _ => Align::default(),
        };
        stack_horizontally(&rects, align)
    }

    fn render_zdiv(&self, node: &Node, width: usize, height: usize) -> Rect {
        let mut layers = Vec::new();
        for child in &node.children {
            // Fixed spacers have no meaning in a z-stack.
            if child.kind == NodeKind::FixedSpacer {
                continue;
            }
            let rect = self.render(child, width, height);
            if !rect.is_empty() {
                layers.push(rect);
            }
        }
        let Some((base, rest)) = layers.split_first() else {
            return Rect::zero();
        };
        rest.iter().fold(base.clone(), |acc, layer| overlay(&acc, layer))
    }

    fn render_unknown(&self, node: &Node, width: usize, height: usize) -> Rect {
        trace!(tag = node.kind.tag(), "rendering unknown node kind");
        let tag = node.kind.tag();
        let inner = self.stack_vertical(node, width, height.saturating_sub(2));
        let mut rects = vec![Rect::from_rendered(&format!("<{tag}>"))];
        if !inner.is_empty() {
            rects.push(inner);
        }
        rects.push(Rect::from_rendered(&format!("</{tag}>")));
        stack_vertically(&rects)
    }
}

// =============================================================================
// SPACERS
// =============================================================================

fn spacer_standalone(props: &Props) -> Rect {
    let min = props.as_spacer().min_size.max(1);
    Rect {
        width: min,
        height: 1,
        lines: vec![" ".repeat(min)],
    }
}

fn fixed_spacer_horizontal(props: &Props) -> Rect {
    let space = props.as_fixed_spacer().space.max(1);
    Rect {
        width: space,
        height: 1,
        lines: vec![" ".repeat(space)],
    }
}

fn fixed_spacer_vertical(props: &Props) -> Rect {
    let space = props.as_fixed_spacer().space.max(1);
    Rect {
        width: 0,
        height: space,
        lines: vec![String::new(); space],
    }
}

/// Split leftover row width across deferred spacers: every spacer but the
/// last gets the floor share, the last takes the remainder. When there is
/// less leftover than spacers, each gets a single column. A spacer's
/// max-size clamp applies after distribution.
fn distribute_spacers(rects: &mut [Rect], spacers: &[(usize, SpacerProps)], remaining: usize) {
    let count = spacers.len();
    let share = if remaining < count { 1 } else { remaining / count };

    for (slot, &(idx, props)) in spacers.iter().enumerate() {
        let mut width = if slot + 1 == count && remaining >= count {
            remaining - share * (count - 1)
        } else {
            share
        };
        if props.max_size > 0 && width > props.max_size {
            width = props.max_size;
        }
        rects[idx].width = width;
        for line in &mut rects[idx].lines {
            *line = " ".repeat(width);
        }
    }
}
