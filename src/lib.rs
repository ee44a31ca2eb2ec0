//! # termdom
//!
//! DOM-style terminal UI toolkit.
//!
//! Applications describe each frame as a tree of typed nodes (containers,
//! headings, inputs, buttons, spacers) built fresh from application state.
//! Two engines consume the tree:
//!
//! - the **DOM engine** ([`dom`]) wires parent links and the focus chain,
//!   dispatches key events with upward bubbling, applies default behavior
//!   (focus navigation, rune-correct input editing), and broadcasts
//!   window resizes
//! - the **rectangle engine** ([`render`]) lays the tree out into a
//!   [`render::rect::Rect`] with ANSI-aware measurement: vertical and
//!   horizontal stacking, proportional spacer distribution, and z-order
//!   overlay with authored-width shadowing
//!
//! ```text
//! state → build tree → Dom (events mutate state via callbacks)
//!                    → Renderer → Rect → String → terminal
//! ```
//!
//! The whole pipeline is synchronous and single-threaded; every frame is a
//! full re-render, there is no retained state between frames beyond what
//! the application holds itself.
//!
//! ## Modules
//!
//! - [`dom`] - node tree, typed props, events, focus, input editing
//! - [`render`] - rectangle layout, stacking, overlay composition
//! - [`style`] - flat styling rendered as ANSI escapes
//! - [`measure`] - escape-aware width measurement and truncation
//! - [`layout`] - node-level column merge helpers

pub mod dom;
pub mod layout;
pub mod measure;
pub mod render;
pub mod style;

pub use dom::event::{DomEvent, EventKind, Key, KeyEvent, Modifiers};
pub use dom::node::{Node, NodeKind, WindowSize};
pub use dom::props::{Align, CursorMove, Props};
pub use dom::Dom;
pub use measure::{strip_ansi, truncate_visible, visual_width};
pub use render::overlay::overlay;
pub use render::rect::Rect;
pub use render::Renderer;
pub use style::{Padding, Style, StyleSheet};
