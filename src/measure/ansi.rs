//! ANSI escape sequence handling.
//!
//! Terminal styling travels inline with the text as escape sequences, so
//! measurement and truncation both need to recognize them:
//! - CSI: `ESC [` parameters, terminated by a byte in `0x40..=0x7E`
//! - OSC / DCS / PM / APC: `ESC ]` / `ESC P` / `ESC ^` / `ESC _`,
//!   terminated by BEL or ST (`ESC \`)
//! - two-byte sequences: `ESC` followed by a single character

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ESC: u8 = 0x1B;

/// Remove all escape sequences, leaving only visible text.
///
/// Borrows when the input contains no ESC byte.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.bytes().any(|b| b == ESC) {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == ESC {
            pos = escape_end(bytes, pos);
            continue;
        }
        // ESC is single-byte ASCII, so splitting at it never breaks UTF-8.
        let run = pos;
        while pos < bytes.len() && bytes[pos] != ESC {
            pos += 1;
        }
        out.push_str(&s[run..pos]);
    }
    Cow::Owned(out)
}

/// Truncate to at most `max_width` visible columns.
///
/// Escape sequences are copied through unchanged (including any that follow
/// the cut, so styling still gets closed), and the cut never lands inside a
/// grapheme cluster.
pub fn truncate_visible(s: &str, max_width: usize) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut used = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == ESC {
            let end = escape_end(bytes, pos);
            out.push_str(&s[pos..end]);
            pos = end;
            continue;
        }
        let run = pos;
        while pos < bytes.len() && bytes[pos] != ESC {
            pos += 1;
        }
        for grapheme in s[run..pos].graphemes(true) {
            let gw = UnicodeWidthStr::width(grapheme);
            if used + gw > max_width {
                used = max_width;
            } else {
                out.push_str(grapheme);
                used += gw;
            }
        }
    }
    out
}

/// Byte index just past the escape sequence starting at `start`.
fn escape_end(bytes: &[u8], start: usize) -> usize {
    let len = bytes.len();
    if start + 1 >= len {
        return len;
    }
    match bytes[start + 1] {
        b'[' => {
            // CSI: parameter and intermediate bytes, then a final byte.
            let mut pos = start + 2;
            while pos < len {
                match bytes[pos] {
                    0x40..=0x7E => return pos + 1,
                    0x20..=0x3F => pos += 1,
                    _ => return pos,
                }
            }
            len
        }
        b']' | b'P' | b'^' | b'_' => {
            // String sequence: runs until BEL or ST.
            let mut pos = start + 2;
            while pos < len {
                match bytes[pos] {
                    0x07 => return pos + 1,
                    ESC if pos + 1 < len && bytes[pos + 1] == b'\\' => return pos + 2,
                    _ => pos += 1,
                }
            }
            len
        }
        _ => start + 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_borrows() {
        assert!(matches!(strip_ansi("hello"), Cow::Borrowed(_)));
        assert_eq!(strip_ansi("hello"), "hello");
    }

    #[test]
    fn test_strips_sgr_color() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_ansi("\x1b[38;5;196mred\x1b[0m"), "red");
        assert_eq!(strip_ansi("\x1b[38;2;255;0;0mred\x1b[0m"), "red");
    }

    #[test]
    fn test_strips_osc_hyperlink() {
        assert_eq!(
            strip_ansi("\x1b]8;;https://example.com\x07link\x1b]8;;\x07"),
            "link"
        );
        assert_eq!(strip_ansi("\x1b]0;title\x1b\\after"), "after");
    }

    #[test]
    fn test_strips_two_byte_sequence() {
        assert_eq!(strip_ansi("\x1b=text"), "text");
    }

    #[test]
    fn test_unterminated_sequences_consume_rest() {
        assert_eq!(strip_ansi("\x1b[31"), "");
        assert_eq!(strip_ansi("\x1b]8;;url"), "");
        assert_eq!(strip_ansi("text\x1b"), "text");
    }

    #[test]
    fn test_strips_around_wide_chars() {
        assert_eq!(strip_ansi("\x1b[31m你好\x1b[0m"), "你好");
    }

    #[test]
    fn test_truncate_plain() {
        assert_eq!(truncate_visible("hello", 3), "hel");
        assert_eq!(truncate_visible("hello", 10), "hello");
        assert_eq!(truncate_visible("hello", 0), "");
    }

    #[test]
    fn test_truncate_keeps_escapes() {
        assert_eq!(
            truncate_visible("\x1b[31mhello\x1b[0m", 3),
            "\x1b[31mhel\x1b[0m"
        );
    }

    #[test]
    fn test_truncate_does_not_split_wide_char() {
        // "你" is two columns; one column of budget cannot hold half of it.
        assert_eq!(truncate_visible("你好", 3), "你");
        assert_eq!(truncate_visible("你好", 4), "你好");
    }
}
