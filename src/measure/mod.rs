//! ANSI-aware text measurement.
//!
//! Every width decision in the compositor goes through this module so that
//! layout and rendering agree on a single metric: terminal cell width of the
//! visible text, with escape sequences excluded. Raw byte or rune counts are
//! never used for layout.

mod ansi;
mod width;

pub use ansi::{strip_ansi, truncate_visible};
pub use width::{line_count, max_line_width, visual_width};
