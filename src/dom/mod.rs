//! DOM event and focus engine.
//!
//! [`Dom`] wraps a freshly-built node tree for one frame:
//!
//! - wires parent links in a single pre-order pass
//! - records the focusable nodes in traversal order (tab order equals
//!   declaration order)
//! - dispatches key events to the focused node with upward bubbling
//! - applies default key behavior (focus navigation, input editing) when no
//!   handler claimed the event
//! - broadcasts window resizes to every node that listens
//!
//! Nodes are addressed by [`NodeId`], their pre-order index, so linear
//! iteration over the flattened tree is depth-first traversal order.
//!
//! # Example
//!
//! ```ignore
//! use termdom::dom::{Dom, node::WindowSize};
//!
//! let window = WindowSize::new(80, 24);
//! let mut dom = Dom::new(build_tree(&state), window.clone());
//! dom.dispatch_key_down(key);   // mutates state via property callbacks
//! let tree = build_tree(&state); // host rebuilds and re-renders
//! ```

pub mod event;
pub mod node;
pub mod props;
pub mod text_edit;

use tracing::{debug, trace};

use crate::dom::event::{DomEvent, EventKind, Key, KeyEvent};
use crate::dom::node::{Node, NodeKind, WindowSize};
use crate::dom::props::{ChangeHandler, CursorHandler, CursorMove, EventHandler};
use crate::dom::text_edit::update_input_value;

/// Index of a node in pre-order traversal; the root is always 0.
pub type NodeId = usize;

/// One frame's tree plus the derived dispatch state.
pub struct Dom {
    root: Node,
    window: WindowSize,
    /// Parent of each node by pre-order index; `None` for the root.
    parents: Vec<Option<NodeId>>,
    /// Focusable nodes in traversal order.
    focusables: Vec<NodeId>,
    /// The engine's notion of focus. Seeded from the tree's `focused`
    /// props at setup, then advanced by focus navigation.
    focused: Option<NodeId>,
}

impl Dom {
    /// Install a tree: derive parent links, the focus chain, and the
    /// initially-focused node in one depth-first pass.
    pub fn new(root: Node, window: WindowSize) -> Self {
        let mut parents = Vec::new();
        let mut focusables = Vec::new();
        let mut focused = None;
        setup(&root, None, &mut parents, &mut focusables, &mut focused);
        trace!(
            nodes = parents.len(),
            focusables = focusables.len(),
            focused = ?focused,
            "dom installed"
        );
        Self {
            root,
            window,
            parents,
            focusables,
            focused,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn window(&self) -> &WindowSize {
        &self.window
    }

    pub fn node_count(&self) -> usize {
        self.parents.len()
    }

    // =========================================================================
    // FOCUS CHAIN
    // =========================================================================

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focusable nodes in tab order.
    pub fn focusables(&self) -> &[NodeId] {
        &self.focusables
    }

    pub fn first_focusable(&self) -> Option<NodeId> {
        self.focusables.first().copied()
    }

    pub fn last_focusable(&self) -> Option<NodeId> {
        self.focusables.last().copied()
    }

    /// Last focusable before the focused node in traversal order.
    pub fn previous_focusable(&self) -> Option<NodeId> {
        let focused = self.focused?;
        self.focusables
            .iter()
            .rev()
            .find(|&&id| id < focused)
            .copied()
    }

    /// First focusable after the focused node in traversal order.
    pub fn next_focusable(&self) -> Option<NodeId> {
        let focused = self.focused?;
        self.focusables.iter().find(|&&id| id > focused).copied()
    }

    /// Move focus along the tab order, wrapping at the ends. Blur and focus
    /// callbacks fire on the nodes losing and gaining focus. Returns whether
    /// any focusable node exists.
    pub fn move_focus(&mut self, direction: i32) -> bool {
        if self.focusables.is_empty() {
            return false;
        }
        let candidate = if direction > 0 {
            self.next_focusable().or(self.first_focusable())
        } else {
            self.previous_focusable().or(self.last_focusable())
        };
        let Some(candidate) = candidate else {
            return false;
        };
        if self.focused == Some(candidate) {
            return true;
        }
        debug!(from = ?self.focused, to = candidate, "focus moved");

        let blur = self.focused.and_then(|id| self.node(id).props.blur_handler());
        let focus = self.node(candidate).props.focus_handler();
        self.focused = Some(candidate);
        if let Some(handler) = blur {
            handler();
        }
        if let Some(handler) = focus {
            handler();
        }
        true
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Dispatch a key press: bubble it from the focused node (or the root
    /// when nothing is focused), then apply default behavior unless a
    /// handler prevented it.
    pub fn dispatch_key_down(&mut self, key: KeyEvent) {
        let target = self.focused.unwrap_or(0);
        debug!(?key, target, "dispatch keydown");
        let mut event = DomEvent::key_down(key, target);
        self.bubble(target, &mut event);
        if !event.default_prevented() {
            self.apply_default(target, &mut event);
        }
    }

    /// Upward single-pass propagation from `target` to the root.
    fn bubble(&self, target: NodeId, event: &mut DomEvent) {
        let mut current = Some(target);
        while let Some(id) = current {
            if event.propagation_stopped() {
                break;
            }
            event.current = id;
            let handler: Option<EventHandler> = match event.kind {
                EventKind::KeyDown(_) => self.node(id).props.key_down_handler(),
                EventKind::Resize { .. } => self.node(id).props.resize_handler(),
            };
            if let Some(handler) = handler {
                handler(event);
            }
            current = self.parents[id];
        }
    }

    /// Built-in key handling, reached only when no handler claimed the
    /// event: Up/Down navigate focus, Enter activates a focused button,
    /// everything else edits the focused input.
    fn apply_default(&mut self, target: NodeId, event: &mut DomEvent) {
        let Some(key) = event.key().cloned() else {
            return;
        };

        match key.key {
            Key::Up | Key::Down => {
                let direction = if key.key == Key::Up { -1 } else { 1 };
                if self.move_focus(direction) {
                    event.prevent_default();
                    event.stop_propagation();
                }
                return;
            }
            _ => {}
        }

        let node = self.node(target);
        if node.kind == NodeKind::Button && key.key == Key::Enter {
            let on_click = node.props.as_button().on_click.clone();
            if let Some(handler) = on_click {
                event.prevent_default();
                handler();
            }
            return;
        }
        if node.kind != NodeKind::Input {
            return;
        }
        let input = node.props.as_input();
        let (value, cursor) = (input.value.clone(), input.cursor_position);
        let on_change: Option<ChangeHandler> = input.on_change.clone();
        let on_cursor_move: Option<CursorHandler> = input.on_cursor_move.clone();

        match key.key {
            Key::Left | Key::Right => {
                let delta = if key.key == Key::Left { -1 } else { 1 };
                if let Some(handler) = on_cursor_move {
                    handler(CursorMove::Delta(delta));
                }
            }
            _ => {
                let (new_value, new_cursor) = update_input_value(&value, cursor, &key);
                if new_value != value {
                    if let Some(handler) = on_change {
                        handler(new_value);
                    }
                }
                if new_cursor != cursor {
                    if let Some(handler) = on_cursor_move {
                        handler(CursorMove::Seek(new_cursor));
                    }
                }
            }
        }
    }

    /// Broadcast a resize to every node in depth-first order. Unlike
    /// bubbling there is no stop-propagation; every listener runs.
    pub fn dispatch_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "dispatch resize");
        self.window.update(width, height);
        let mut event = DomEvent::resize(width, height);
        let handlers: Vec<(NodeId, EventHandler)> = flatten(&self.root)
            .into_iter()
            .enumerate()
            .filter_map(|(id, node)| node.props.resize_handler().map(|h| (id, h)))
            .collect();
        for (id, handler) in handlers {
            event.current = id;
            handler(&mut event);
        }
    }

    /// Node lookup by pre-order index. Ids come from this tree's own
    /// setup pass, so the position always exists.
    fn node(&self, id: NodeId) -> &Node {
        flatten(&self.root)[id]
    }
}

/// Pre-order flatten; index in the result is the node's [`NodeId`].
fn flatten(root: &Node) -> Vec<&Node> {
    let mut out = Vec::new();
    fn walk<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
        out.push(node);
        for child in &node.children {
            walk(child, out);
        }
    }
    walk(root, &mut out);
    out
}

fn is_focusable(node: &Node) -> bool {
    node.props
        .focusable_override()
        .unwrap_or_else(|| node.kind.default_focusable())
}

fn setup(
    node: &Node,
    parent: Option<NodeId>,
    parents: &mut Vec<Option<NodeId>>,
    focusables: &mut Vec<NodeId>,
    focused: &mut Option<NodeId>,
) {
    let id = parents.len();
    parents.push(parent);
    if is_focusable(node) {
        focusables.push(id);
    }
    // First node reporting itself focused wins.
    if focused.is_none() && node.props.focused() {
        *focused = Some(id);
    }
    for child in &node.children {
        setup(child, Some(id), parents, focusables, focused);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::event::Modifiers;
    use crate::dom::node::{button, div, input, text};
    use crate::dom::props::{ButtonProps, DivProps, InputProps};

    fn key(k: Key) -> KeyEvent {
        KeyEvent::new(k)
    }

    #[test]
    fn test_setup_assigns_parents_in_preorder() {
        let tree = div(vec![text("a"), div(vec![text("b")])]);
        let dom = Dom::new(tree, WindowSize::new(80, 24));
        // 0 root, 1 "a", 2 inner div, 3 "b"
        assert_eq!(dom.parents, vec![None, Some(0), Some(0), Some(2)]);
    }

    #[test]
    fn test_focus_chain_in_declaration_order() {
        let tree = div(vec![
            input(InputProps::default()),
            text("label"),
            button("ok", ButtonProps::default()),
        ]);
        let dom = Dom::new(tree, WindowSize::new(80, 24));
        assert_eq!(dom.focusables, vec![1, 3]);
        assert_eq!(dom.first_focusable(), Some(1));
        assert_eq!(dom.last_focusable(), Some(3));
        assert_eq!(dom.focused(), None);
    }

    #[test]
    fn test_focused_seeded_from_props() {
        let tree = div(vec![
            input(InputProps::default()),
            input(InputProps {
                focused: true,
                ..Default::default()
            }),
        ]);
        let dom = Dom::new(tree, WindowSize::new(80, 24));
        assert_eq!(dom.focused(), Some(2));
        assert_eq!(dom.previous_focusable(), Some(1));
        assert_eq!(dom.next_focusable(), None);
    }

    #[test]
    fn test_move_focus_wraps() {
        let tree = div(vec![
            input(InputProps::default()),
            input(InputProps::default()),
            input(InputProps {
                focused: true,
                ..Default::default()
            }),
        ]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        assert_eq!(dom.focused(), Some(3));
        assert!(dom.move_focus(1));
        assert_eq!(dom.focused(), Some(1));
        assert!(dom.move_focus(-1));
        assert_eq!(dom.focused(), Some(3));
    }

    #[test]
    fn test_move_focus_without_focusables() {
        let mut dom = Dom::new(div(vec![text("x")]), WindowSize::new(80, 24));
        assert!(!dom.move_focus(1));
        assert_eq!(dom.focused(), None);
    }

    #[test]
    fn test_down_focuses_first_then_second() {
        let tree = div(vec![
            input(InputProps::default()),
            input(InputProps::default()),
            input(InputProps::default()),
        ]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        assert_eq!(dom.focused(), None);
        dom.dispatch_key_down(key(Key::Down));
        assert_eq!(dom.focused(), Some(1));
        dom.dispatch_key_down(key(Key::Down));
        assert_eq!(dom.focused(), Some(2));
    }

    #[test]
    fn test_bubbling_reaches_ancestors_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let tag = |name: &'static str| {
            let log = log.clone();
            Some(Rc::new(move |_: &mut DomEvent| {
                log.borrow_mut().push(name);
            }) as EventHandler)
        };
        let tree = div_with_handler(
            tag("outer"),
            vec![div_with_handler(
                tag("inner"),
                vec![input(InputProps {
                    focused: true,
                    on_key_down: tag("input"),
                    ..Default::default()
                })],
            )],
        );
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.dispatch_key_down(KeyEvent::char('x'));
        assert_eq!(*log.borrow(), vec!["input", "inner", "outer"]);
    }

    #[test]
    fn test_stop_propagation_halts_bubbling() {
        let reached = Rc::new(RefCell::new(false));
        let outer = {
            let reached = reached.clone();
            Some(Rc::new(move |_: &mut DomEvent| {
                *reached.borrow_mut() = true;
            }) as EventHandler)
        };
        let tree = div_with_handler(
            outer,
            vec![input(InputProps {
                focused: true,
                on_key_down: Some(Rc::new(|event: &mut DomEvent| {
                    event.stop_propagation();
                })),
                ..Default::default()
            })],
        );
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.dispatch_key_down(KeyEvent::char('x'));
        assert!(!*reached.borrow());
    }

    #[test]
    fn test_prevent_default_suppresses_editing() {
        let changed = Rc::new(RefCell::new(false));
        let on_change = {
            let changed = changed.clone();
            Rc::new(move |_: String| {
                *changed.borrow_mut() = true;
            })
        };
        let tree = div(vec![input(InputProps {
            focused: true,
            value: "abc".into(),
            cursor_position: 3,
            on_change: Some(on_change),
            on_key_down: Some(Rc::new(|event: &mut DomEvent| {
                event.prevent_default();
            })),
            ..Default::default()
        })]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.dispatch_key_down(key(Key::Backspace));
        assert!(!*changed.borrow());
    }

    #[test]
    fn test_default_editing_fires_change_and_cursor() {
        let seen = Rc::new(RefCell::new((String::new(), None::<CursorMove>)));
        let on_change = {
            let seen = seen.clone();
            Rc::new(move |value: String| {
                seen.borrow_mut().0 = value;
            })
        };
        let on_cursor = {
            let seen = seen.clone();
            Rc::new(move |cursor: CursorMove| {
                seen.borrow_mut().1 = Some(cursor);
            })
        };
        let tree = div(vec![input(InputProps {
            focused: true,
            value: "hello".into(),
            cursor_position: 3,
            on_change: Some(on_change),
            on_cursor_move: Some(on_cursor),
            ..Default::default()
        })]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.dispatch_key_down(key(Key::Backspace));
        let seen = seen.borrow();
        assert_eq!(seen.0, "helo");
        assert_eq!(seen.1, Some(CursorMove::Seek(2)));
    }

    #[test]
    fn test_left_right_move_cursor_by_delta() {
        let moved = Rc::new(RefCell::new(None));
        let on_cursor = {
            let moved = moved.clone();
            Rc::new(move |cursor: CursorMove| {
                *moved.borrow_mut() = Some(cursor);
            })
        };
        let tree = div(vec![input(InputProps {
            focused: true,
            value: "hello".into(),
            cursor_position: 2,
            on_cursor_move: Some(on_cursor),
            ..Default::default()
        })]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.dispatch_key_down(key(Key::Right));
        assert_eq!(*moved.borrow(), Some(CursorMove::Delta(1)));
        dom.dispatch_key_down(key(Key::Left));
        assert_eq!(*moved.borrow(), Some(CursorMove::Delta(-1)));
    }

    #[test]
    fn test_enter_on_focused_button_fires_click() {
        let clicked = Rc::new(RefCell::new(false));
        let on_click = {
            let clicked = clicked.clone();
            Rc::new(move || {
                *clicked.borrow_mut() = true;
            })
        };
        let tree = div(vec![button(
            "ok",
            ButtonProps {
                focused: true,
                on_click: Some(on_click),
                ..Default::default()
            },
        )]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.dispatch_key_down(key(Key::Enter));
        assert!(*clicked.borrow());
    }

    #[test]
    fn test_unfocused_dispatch_falls_back_to_root() {
        let reached = Rc::new(RefCell::new(false));
        let handler = {
            let reached = reached.clone();
            Some(Rc::new(move |_: &mut DomEvent| {
                *reached.borrow_mut() = true;
            }) as EventHandler)
        };
        let tree = div_with_handler(handler, vec![text("plain")]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.dispatch_key_down(KeyEvent::char('q'));
        assert!(*reached.borrow());
    }

    #[test]
    fn test_resize_broadcast_visits_every_listener() {
        let count = Rc::new(RefCell::new(0));
        let listener = || {
            let count = count.clone();
            Some(Rc::new(move |_: &mut DomEvent| {
                *count.borrow_mut() += 1;
            }) as EventHandler)
        };
        let tree = resize_div(
            listener(),
            vec![resize_div(listener(), vec![]), resize_div(listener(), vec![])],
        );
        let window = WindowSize::new(80, 24);
        let mut dom = Dom::new(tree, window.clone());
        dom.dispatch_resize(120, 40);
        assert_eq!(*count.borrow(), 3);
        assert_eq!(window.get(), (120, 40));
    }

    #[test]
    fn test_focus_and_blur_callbacks_fire_on_move() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let note = |name: &'static str| {
            let log = log.clone();
            Some(Rc::new(move || {
                log.borrow_mut().push(name);
            }) as Rc<dyn Fn()>)
        };
        let tree = div(vec![
            input(InputProps {
                focused: true,
                on_blur: note("blur-a"),
                ..Default::default()
            }),
            input(InputProps {
                on_focus: note("focus-b"),
                ..Default::default()
            }),
        ]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.move_focus(1);
        assert_eq!(*log.borrow(), vec!["blur-a", "focus-b"]);
    }

    #[test]
    fn test_ctrl_modifier_keys_ignore_shift_only_chords() {
        // A shift-modified char still inserts.
        let seen = Rc::new(RefCell::new(String::new()));
        let on_change = {
            let seen = seen.clone();
            Rc::new(move |value: String| {
                *seen.borrow_mut() = value;
            })
        };
        let tree = div(vec![input(InputProps {
            focused: true,
            value: "a".into(),
            cursor_position: 1,
            on_change: Some(on_change),
            ..Default::default()
        })]);
        let mut dom = Dom::new(tree, WindowSize::new(80, 24));
        dom.dispatch_key_down(KeyEvent::with_modifiers(Key::Char('B'), Modifiers::SHIFT));
        assert_eq!(*seen.borrow(), "aB");
    }

    fn div_with_handler(handler: Option<EventHandler>, children: Vec<Node>) -> Node {
        crate::dom::node::div_with(
            DivProps {
                on_key_down: handler,
                ..Default::default()
            },
            children,
        )
    }

    fn resize_div(handler: Option<EventHandler>, children: Vec<Node>) -> Node {
        crate::dom::node::div_with(
            DivProps {
                on_window_resize: handler,
                ..Default::default()
            },
            children,
        )
    }
}
