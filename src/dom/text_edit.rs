//! Built-in input editing.
//!
//! [`update_input_value`] is the pure core of the input component: it maps
//! one key press over a `(value, cursor)` pair and returns the new pair.
//! The value is treated as a sequence of Unicode code points, never raw
//! bytes, so multi-byte characters survive every edit. An out-of-range
//! cursor is clamped before use.

use crate::dom::event::{Key, KeyEvent, Modifiers};

/// Apply one key press to an input's value and cursor.
///
/// Keys with no editing meaning (navigation, unrecognized chords) return
/// the pair unchanged.
pub fn update_input_value(value: &str, pos: usize, key: &KeyEvent) -> (String, usize) {
    let chars: Vec<char> = value.chars().collect();
    let pos = pos.min(chars.len());

    if key.modifiers.contains(Modifiers::CTRL) {
        return match key.key {
            Key::Char('a') => (value.to_string(), 0),
            Key::Char('e') => (value.to_string(), chars.len()),
            Key::Char('k') => (chars[..pos].iter().collect(), pos),
            Key::Char('w') => delete_back_word(value, pos),
            _ => (value.to_string(), pos),
        };
    }

    match key.key {
        Key::Backspace => {
            if pos > 0 {
                let mut chars = chars;
                chars.remove(pos - 1);
                (chars.into_iter().collect(), pos - 1)
            } else {
                (value.to_string(), 0)
            }
        }
        Key::Delete => {
            if chars.is_empty() {
                (String::new(), pos)
            } else {
                let mut chars = chars;
                if pos < chars.len() {
                    chars.remove(pos);
                } else {
                    chars.pop();
                }
                (chars.into_iter().collect(), pos)
            }
        }
        Key::Home => (value.to_string(), 0),
        Key::End => (value.to_string(), chars.len()),
        Key::Char(c) if !key.modifiers.contains(Modifiers::ALT) => {
            let mut chars = chars;
            chars.insert(pos, c);
            (chars.into_iter().collect(), pos + 1)
        }
        _ => (value.to_string(), pos),
    }
}

/// Delete the word before `pos`, shell Ctrl+W style.
///
/// Spaces immediately left of the cursor are walked over but kept; only the
/// word before them is removed. The cursor lands at the word's start.
pub fn delete_back_word(value: &str, pos: usize) -> (String, usize) {
    let chars: Vec<char> = value.chars().collect();
    let pos = pos.min(chars.len());
    if pos == 0 {
        return (value.to_string(), 0);
    }

    let mut p = pos;
    while p > 0 && chars[p - 1] == ' ' {
        p -= 1;
    }
    let mut start = p;
    while start > 0 && chars[start - 1] != ' ' {
        start -= 1;
    }

    let mut out: String = chars[..start].iter().collect();
    out.extend(&chars[p..]);
    (out, start)
}
