//! The UI node tree.
//!
//! Applications build a fresh [`Node`] tree on every render pass with the
//! constructor functions below, then hand it to [`crate::dom::Dom`] for
//! event dispatch and to [`crate::render::Renderer`] for layout. Nodes own
//! their children; parent links and the focus chain are derived when the
//! tree is installed, never stored here.
//!
//! # Example
//!
//! ```ignore
//! use termdom::dom::node::{div, h1, input, button};
//!
//! let tree = div(vec![
//!     h1("Login"),
//!     input(InputProps { placeholder: "user".into(), ..Default::default() }),
//!     button("Submit", ButtonProps::default()),
//! ]);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::props::{
    ButtonProps, DivProps, FixedSpacerProps, InputProps, Props, SpacerProps, TextProps,
};

/// What a node is. Closed set plus a diagnostic escape hatch for kinds the
/// renderer does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Div,
    HDiv,
    ZDiv,
    Heading1,
    Heading2,
    Paragraph,
    Span,
    Button,
    Input,
    List,
    ListItem,
    LineBreak,
    Spacer,
    FixedSpacer,
    Fragment,
    Custom(String),
}

impl NodeKind {
    /// Tag name used by the diagnostic bracket rendering.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Text => "text",
            NodeKind::Div => "div",
            NodeKind::HDiv => "hdiv",
            NodeKind::ZDiv => "zdiv",
            NodeKind::Heading1 => "h1",
            NodeKind::Heading2 => "h2",
            NodeKind::Paragraph => "p",
            NodeKind::Span => "span",
            NodeKind::Button => "button",
            NodeKind::Input => "input",
            NodeKind::List => "ul",
            NodeKind::ListItem => "li",
            NodeKind::LineBreak => "br",
            NodeKind::Spacer => "spacer",
            NodeKind::FixedSpacer => "fixed-spacer",
            NodeKind::Fragment => "fragment",
            NodeKind::Custom(tag) => tag,
        }
    }

    /// Whether nodes of this kind take focus unless overridden. Inputs and
    /// buttons do; everything else opts in explicitly.
    pub fn default_focusable(&self) -> bool {
        matches!(self, NodeKind::Input | NodeKind::Button)
    }
}

/// Shared handle to the current terminal dimensions, attached to the tree
/// at setup so any node's handler can query available space.
#[derive(Debug, Clone, Default)]
pub struct WindowSize(Rc<Cell<(u16, u16)>>);

impl WindowSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self(Rc::new(Cell::new((width, height))))
    }

    pub fn get(&self) -> (u16, u16) {
        self.0.get()
    }

    pub fn update(&self, width: u16, height: u16) {
        self.0.set((width, height));
    }

    pub fn width(&self) -> u16 {
        self.0.get().0
    }

    pub fn height(&self) -> u16 {
        self.0.get().1
    }
}

/// One element of the UI tree.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub kind: NodeKind,
    pub props: Props,
    pub children: Vec<Node>,
    /// Payload for text nodes only.
    pub text: String,
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Text
    }
}

impl Node {
    pub fn new(kind: NodeKind, props: Props, children: Vec<Node>) -> Self {
        Self {
            kind,
            props,
            children,
            text: String::new(),
        }
    }
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

/// A bare text leaf.
pub fn text(content: impl Into<String>) -> Node {
    Node {
        kind: NodeKind::Text,
        props: Props::Empty,
        children: Vec::new(),
        text: content.into(),
    }
}

/// A text leaf with an explicit style override.
pub fn text_styled(content: impl Into<String>, style: crate::style::Style) -> Node {
    Node {
        kind: NodeKind::Text,
        props: Props::Text(TextProps {
            style: Some(style),
            ..Default::default()
        }),
        children: Vec::new(),
        text: content.into(),
    }
}

/// Vertical container.
pub fn div(children: Vec<Node>) -> Node {
    Node::new(NodeKind::Div, Props::Div(DivProps::default()), children)
}

/// Vertical container with explicit properties.
pub fn div_with(props: DivProps, children: Vec<Node>) -> Node {
    Node::new(NodeKind::Div, Props::Div(props), children)
}

/// Horizontal container.
pub fn hdiv(children: Vec<Node>) -> Node {
    Node::new(NodeKind::HDiv, Props::Div(DivProps::default()), children)
}

/// Horizontal container with explicit properties.
pub fn hdiv_with(props: DivProps, children: Vec<Node>) -> Node {
    Node::new(NodeKind::HDiv, Props::Div(props), children)
}

/// Overlay container; later children shadow earlier ones.
pub fn zdiv(children: Vec<Node>) -> Node {
    Node::new(NodeKind::ZDiv, Props::Div(DivProps::default()), children)
}

pub fn zdiv_with(props: DivProps, children: Vec<Node>) -> Node {
    Node::new(NodeKind::ZDiv, Props::Div(props), children)
}

fn text_leaf(kind: NodeKind, content: impl Into<String>, props: TextProps) -> Node {
    Node {
        kind,
        props: Props::Text(props),
        children: Vec::new(),
        text: content.into(),
    }
}

pub fn span(content: impl Into<String>) -> Node {
    text_leaf(NodeKind::Span, content, TextProps::default())
}

pub fn span_with(content: impl Into<String>, props: TextProps) -> Node {
    text_leaf(NodeKind::Span, content, props)
}

pub fn h1(content: impl Into<String>) -> Node {
    text_leaf(NodeKind::Heading1, content, TextProps::default())
}

pub fn h2(content: impl Into<String>) -> Node {
    text_leaf(NodeKind::Heading2, content, TextProps::default())
}

pub fn p(content: impl Into<String>) -> Node {
    text_leaf(NodeKind::Paragraph, content, TextProps::default())
}

pub fn button(label: impl Into<String>, props: ButtonProps) -> Node {
    Node {
        kind: NodeKind::Button,
        props: Props::Button(props),
        children: Vec::new(),
        text: label.into(),
    }
}

pub fn input(props: InputProps) -> Node {
    Node::new(NodeKind::Input, Props::Input(props), Vec::new())
}

pub fn list(children: Vec<Node>) -> Node {
    Node::new(NodeKind::List, Props::Empty, children)
}

pub fn list_item(content: impl Into<String>, props: TextProps) -> Node {
    text_leaf(NodeKind::ListItem, content, props)
}

/// Line break: one empty line.
pub fn br() -> Node {
    Node::new(NodeKind::LineBreak, Props::Empty, Vec::new())
}

/// Proportional spacer; absorbs leftover width in a horizontal stack.
pub fn spacer() -> Node {
    Node::new(
        NodeKind::Spacer,
        Props::Spacer(SpacerProps::default()),
        Vec::new(),
    )
}

pub fn spacer_with(props: SpacerProps) -> Node {
    Node::new(NodeKind::Spacer, Props::Spacer(props), Vec::new())
}

/// Fixed spacer: `space` columns horizontally, `space` rows vertically.
pub fn fixed_spacer(space: usize) -> Node {
    Node::new(
        NodeKind::FixedSpacer,
        Props::FixedSpacer(FixedSpacerProps { space }),
        Vec::new(),
    )
}

/// Transparent grouping node; renders exactly like a vertical stack but
/// carries no style of its own.
pub fn fragment(children: Vec<Node>) -> Node {
    Node::new(NodeKind::Fragment, Props::Empty, children)
}

/// A node of a kind the renderer has no rule for; rendered as a
/// diagnostic bracket tag.
pub fn custom(tag: impl Into<String>, children: Vec<Node>) -> Node {
    Node::new(NodeKind::Custom(tag.into()), Props::Empty, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_focusable_per_kind() {
        assert!(NodeKind::Input.default_focusable());
        assert!(NodeKind::Button.default_focusable());
        assert!(!NodeKind::Div.default_focusable());
        assert!(!NodeKind::Text.default_focusable());
    }

    #[test]
    fn test_window_size_is_shared() {
        let size = WindowSize::new(80, 24);
        let alias = size.clone();
        size.update(120, 40);
        assert_eq!(alias.get(), (120, 40));
    }

    #[test]
    fn test_constructors_set_kind_and_payload() {
        let node = text("hi");
        assert_eq!(node.kind, NodeKind::Text);
        assert_eq!(node.text, "hi");

        let node = button("Ok", ButtonProps::default());
        assert_eq!(node.kind, NodeKind::Button);
        assert_eq!(node.text, "Ok");

        let node = custom("widget", vec![text("x")]);
        assert_eq!(node.kind.tag(), "widget");
        assert_eq!(node.children.len(), 1);
    }
}
