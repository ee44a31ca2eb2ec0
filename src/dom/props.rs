//! Typed node properties.
//!
//! Each node kind carries its own configuration struct inside the closed
//! [`Props`] enum. Components extract the concrete struct as early as
//! possible via the `as_*` accessors; asking for the wrong shape is a
//! construction bug and panics. The one place that stays polymorphic is
//! [`Props::get`], the string-keyed read used by generic dispatch, where a
//! missing or mis-shaped property is simply absent.

use std::rc::Rc;

use crate::dom::event::DomEvent;
use crate::style::Style;

// =============================================================================
// HANDLERS
// =============================================================================

/// Event handler invoked during bubbling or broadcast.
pub type EventHandler = Rc<dyn Fn(&mut DomEvent)>;

/// Fired when a button is activated.
pub type ClickHandler = Rc<dyn Fn()>;

/// Fired with the input's new value after an edit.
pub type ChangeHandler = Rc<dyn Fn(String)>;

/// Fired when the built-in editing moves an input's cursor.
pub type CursorHandler = Rc<dyn Fn(CursorMove)>;

/// Fired on focus gain or loss.
pub type FocusHandler = Rc<dyn Fn()>;

/// How an input's cursor should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// Relative movement in code points; the owner clamps to the value.
    Delta(i32),
    /// Absolute position in code points.
    Seek(usize),
}

// =============================================================================
// PER-KIND PROPERTY STRUCTS
// =============================================================================

/// Properties for text-bearing leaf nodes (text, span, headings, paragraph,
/// list items).
#[derive(Clone, Default)]
pub struct TextProps {
    pub style: Option<Style>,
    pub focused: bool,
    pub focusable: Option<bool>,
    pub selected: bool,
    pub on_key_down: Option<EventHandler>,
}

/// Properties for vertical, horizontal, and overlay containers.
#[derive(Clone, Default)]
pub struct DivProps {
    pub style: Option<Style>,
    pub align: Align,
    pub focused: bool,
    pub focusable: Option<bool>,
    pub on_key_down: Option<EventHandler>,
    pub on_window_resize: Option<EventHandler>,
}

/// Properties for buttons.
#[derive(Clone, Default)]
pub struct ButtonProps {
    pub style: Option<Style>,
    pub focused: bool,
    pub focusable: Option<bool>,
    pub on_click: Option<ClickHandler>,
    pub on_key_down: Option<EventHandler>,
    pub on_focus: Option<FocusHandler>,
    pub on_blur: Option<FocusHandler>,
}

/// Properties for text inputs.
#[derive(Clone, Default)]
pub struct InputProps {
    pub value: String,
    pub placeholder: String,
    /// Cursor position in code points; clamped to the value before use.
    pub cursor_position: usize,
    pub style: Option<Style>,
    pub focused: bool,
    pub focusable: Option<bool>,
    pub on_change: Option<ChangeHandler>,
    pub on_cursor_move: Option<CursorHandler>,
    pub on_key_down: Option<EventHandler>,
    pub on_focus: Option<FocusHandler>,
    pub on_blur: Option<FocusHandler>,
}

/// Properties for proportional spacers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpacerProps {
    /// Width when no distribution applies; zero means 1.
    pub min_size: usize,
    /// Clamp on the distributed width; zero means unclamped.
    pub max_size: usize,
}

/// Properties for fixed spacers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedSpacerProps {
    /// Columns in a horizontal flow, rows in a vertical one; zero means 1.
    pub space: usize,
}

/// Vertical alignment of children inside a horizontal stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    Top,
    Center,
    #[default]
    Bottom,
}

// =============================================================================
// PROPS
// =============================================================================

/// Closed property bag, one variant per configuration shape.
#[derive(Clone, Default)]
pub enum Props {
    #[default]
    Empty,
    Text(TextProps),
    Div(DivProps),
    Button(ButtonProps),
    Input(InputProps),
    Spacer(SpacerProps),
    FixedSpacer(FixedSpacerProps),
}

/// A property value surfaced through the string-keyed boundary read.
#[derive(Clone)]
pub enum PropValue<'a> {
    Bool(bool),
    Usize(usize),
    Str(&'a str),
    Style(&'a Style),
    Handler(&'a EventHandler),
}

impl Props {
    /// Generic read by key. Unknown keys and keys the variant does not carry
    /// are absent, never an error.
    pub fn get(&self, key: &str) -> Option<PropValue<'_>> {
        match (self, key) {
            (Props::Text(p), "focused") => Some(PropValue::Bool(p.focused)),
            (Props::Text(p), "style") => p.style.as_ref().map(PropValue::Style),
            (Props::Text(p), "onKeyDown") => p.on_key_down.as_ref().map(PropValue::Handler),
            (Props::Div(p), "focused") => Some(PropValue::Bool(p.focused)),
            (Props::Div(p), "style") => p.style.as_ref().map(PropValue::Style),
            (Props::Div(p), "onKeyDown") => p.on_key_down.as_ref().map(PropValue::Handler),
            (Props::Div(p), "onWindowResize") => {
                p.on_window_resize.as_ref().map(PropValue::Handler)
            }
            (Props::Button(p), "focused") => Some(PropValue::Bool(p.focused)),
            (Props::Button(p), "style") => p.style.as_ref().map(PropValue::Style),
            (Props::Button(p), "onKeyDown") => p.on_key_down.as_ref().map(PropValue::Handler),
            (Props::Input(p), "focused") => Some(PropValue::Bool(p.focused)),
            (Props::Input(p), "value") => Some(PropValue::Str(&p.value)),
            (Props::Input(p), "placeholder") => Some(PropValue::Str(&p.placeholder)),
            (Props::Input(p), "cursorPosition") => Some(PropValue::Usize(p.cursor_position)),
            (Props::Input(p), "style") => p.style.as_ref().map(PropValue::Style),
            (Props::Input(p), "onKeyDown") => p.on_key_down.as_ref().map(PropValue::Handler),
            (Props::Spacer(p), "minSize") => Some(PropValue::Usize(p.min_size)),
            (Props::Spacer(p), "maxSize") => Some(PropValue::Usize(p.max_size)),
            (Props::FixedSpacer(p), "space") => Some(PropValue::Usize(p.space)),
            _ => None,
        }
    }

    /// The node's key-down handler, if any variant carries one.
    pub fn key_down_handler(&self) -> Option<EventHandler> {
        match self {
            Props::Text(p) => p.on_key_down.clone(),
            Props::Div(p) => p.on_key_down.clone(),
            Props::Button(p) => p.on_key_down.clone(),
            Props::Input(p) => p.on_key_down.clone(),
            _ => None,
        }
    }

    /// The node's resize handler.
    pub fn resize_handler(&self) -> Option<EventHandler> {
        match self {
            Props::Div(p) => p.on_window_resize.clone(),
            _ => None,
        }
    }

    /// Whether the node reports itself focused.
    pub fn focused(&self) -> bool {
        match self {
            Props::Text(p) => p.focused,
            Props::Div(p) => p.focused,
            Props::Button(p) => p.focused,
            Props::Input(p) => p.focused,
            _ => false,
        }
    }

    /// Callback fired when the node gains focus.
    pub fn focus_handler(&self) -> Option<FocusHandler> {
        match self {
            Props::Button(p) => p.on_focus.clone(),
            Props::Input(p) => p.on_focus.clone(),
            _ => None,
        }
    }

    /// Callback fired when the node loses focus.
    pub fn blur_handler(&self) -> Option<FocusHandler> {
        match self {
            Props::Button(p) => p.on_blur.clone(),
            Props::Input(p) => p.on_blur.clone(),
            _ => None,
        }
    }

    /// The node's explicit focusable override, if set.
    pub fn focusable_override(&self) -> Option<bool> {
        match self {
            Props::Text(p) => p.focusable,
            Props::Div(p) => p.focusable,
            Props::Button(p) => p.focusable,
            Props::Input(p) => p.focusable,
            _ => None,
        }
    }

    /// The node's style override, if any.
    pub fn style(&self) -> Option<&Style> {
        match self {
            Props::Text(p) => p.style.as_ref(),
            Props::Div(p) => p.style.as_ref(),
            Props::Button(p) => p.style.as_ref(),
            Props::Input(p) => p.style.as_ref(),
            _ => None,
        }
    }

    /// Extract the input configuration. Panics when the bag is a different
    /// shape: that is a construction bug, not a runtime condition.
    pub fn as_input(&self) -> &InputProps {
        match self {
            Props::Input(p) => p,
            _ => panic!("node props are not InputProps"),
        }
    }

    pub fn as_button(&self) -> &ButtonProps {
        match self {
            Props::Button(p) => p,
            _ => panic!("node props are not ButtonProps"),
        }
    }

    pub fn as_div(&self) -> &DivProps {
        match self {
            Props::Div(p) => p,
            _ => panic!("node props are not DivProps"),
        }
    }

    pub fn as_spacer(&self) -> SpacerProps {
        match self {
            Props::Spacer(p) => *p,
            _ => SpacerProps::default(),
        }
    }

    pub fn as_fixed_spacer(&self) -> FixedSpacerProps {
        match self {
            Props::FixedSpacer(p) => *p,
            _ => FixedSpacerProps::default(),
        }
    }
}

impl std::fmt::Debug for Props {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Props::Empty => "Empty",
            Props::Text(_) => "Text",
            Props::Div(_) => "Div",
            Props::Button(_) => "Button",
            Props::Input(_) => "Input",
            Props::Spacer(_) => "Spacer",
            Props::FixedSpacer(_) => "FixedSpacer",
        };
        f.debug_tuple(name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_key_is_absent() {
        let props = Props::Input(InputProps::default());
        assert!(props.get("noSuchKey").is_none());
    }

    #[test]
    fn test_get_key_on_wrong_variant_is_absent() {
        let props = Props::Text(TextProps::default());
        assert!(props.get("value").is_none());
    }

    #[test]
    fn test_get_reads_input_value() {
        let props = Props::Input(InputProps {
            value: "abc".into(),
            cursor_position: 2,
            ..Default::default()
        });
        assert!(matches!(props.get("value"), Some(PropValue::Str("abc"))));
        assert!(matches!(
            props.get("cursorPosition"),
            Some(PropValue::Usize(2))
        ));
    }

    #[test]
    fn test_handler_lookup_missing_is_none() {
        let props = Props::Div(DivProps::default());
        assert!(props.key_down_handler().is_none());
        assert!(props.resize_handler().is_none());
    }

    #[test]
    #[should_panic(expected = "not InputProps")]
    fn test_as_input_wrong_shape_panics() {
        Props::Button(ButtonProps::default()).as_input();
    }
}
