//! Event types flowing through the node tree.
//!
//! Key presses enter the tree as a [`DomEvent`] targeted at the focused
//! node and bubble toward the root; window resizes are broadcast to every
//! node that listens. Propagation control lives on the event itself:
//! a handler calls [`DomEvent::stop_propagation`] to end bubbling and
//! [`DomEvent::prevent_default`] to suppress the built-in key behavior.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent as CtKeyEvent, KeyModifiers};

use crate::dom::NodeId;

// =============================================================================
// KEYS
// =============================================================================

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
    }
}

/// Logical key identity, decoupled from the terminal backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Esc,
    F(u8),
}

/// A single key press with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    pub fn ctrl(c: char) -> Self {
        Self::with_modifiers(Key::Char(c), Modifiers::CTRL)
    }

    /// Convert a crossterm key event. Returns `None` for keys the toolkit
    /// has no notion of (media keys, keypad specials).
    pub fn from_crossterm(event: CtKeyEvent) -> Option<Self> {
        let mut modifiers = Modifiers::empty();
        if event.modifiers.contains(KeyModifiers::SHIFT) {
            modifiers |= Modifiers::SHIFT;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            modifiers |= Modifiers::CTRL;
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            modifiers |= Modifiers::ALT;
        }

        let key = match event.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Esc => Key::Esc,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(Self { key, modifiers })
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    KeyDown(KeyEvent),
    Resize { width: u16, height: u16 },
}

/// An event in flight through the tree.
///
/// Carries the propagation flags mutated by handlers during dispatch.
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub kind: EventKind,
    /// The node the event was dispatched at.
    pub target: NodeId,
    /// The node whose handler is currently running; advances toward the
    /// root while bubbling.
    pub current: NodeId,
    stopped: bool,
    default_prevented: bool,
}

impl DomEvent {
    pub fn key_down(key: KeyEvent, target: NodeId) -> Self {
        Self {
            kind: EventKind::KeyDown(key),
            target,
            current: target,
            stopped: false,
            default_prevented: false,
        }
    }

    /// Resize events always target the root.
    pub fn resize(width: u16, height: u16) -> Self {
        Self {
            kind: EventKind::Resize { width, height },
            target: 0,
            current: 0,
            stopped: false,
            default_prevented: false,
        }
    }

    /// Stop the event from bubbling to ancestor nodes.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Keep the toolkit from applying its default key behavior.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.stopped
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The key press, when this is a key event.
    pub fn key(&self) -> Option<&KeyEvent> {
        match &self.kind {
            EventKind::KeyDown(key) => Some(key),
            EventKind::Resize { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_crossterm_char() {
        let ev = KeyEvent::from_crossterm(CtKeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(ev.key, Key::Char('a'));
        assert!(ev.modifiers.is_empty());
    }

    #[test]
    fn test_from_crossterm_ctrl_modifier() {
        let ev =
            KeyEvent::from_crossterm(CtKeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL))
                .unwrap();
        assert_eq!(ev, KeyEvent::ctrl('w'));
    }

    #[test]
    fn test_from_crossterm_unmapped_key() {
        assert!(
            KeyEvent::from_crossterm(CtKeyEvent::new(KeyCode::CapsLock, KeyModifiers::NONE))
                .is_none()
        );
    }

    #[test]
    fn test_from_crossterm_back_tab() {
        let ev = KeyEvent::from_crossterm(CtKeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
            .unwrap();
        assert_eq!(ev.key, Key::BackTab);
    }

    #[test]
    fn test_propagation_flags_start_clear() {
        let mut ev = DomEvent::key_down(KeyEvent::char('x'), 0);
        assert!(!ev.propagation_stopped());
        assert!(!ev.default_prevented());
        ev.stop_propagation();
        ev.prevent_default();
        assert!(ev.propagation_stopped());
        assert!(ev.default_prevented());
    }
}
