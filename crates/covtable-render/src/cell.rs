//! Fixed-width cell formatting.
//!
//! Every table cell goes through [`fill`]: indentation first, then the value
//! padded or truncated to exactly the column width. Widths are display
//! columns, measured with `console::measure_text_width`, so wide characters
//! count double and escape codes count zero.
//!
//! Over-long values keep their *tail* and lose their head, which is the useful
//! end of a path or of a list of line numbers:
//!
//! ```rust
//! use covtable_render::cell::{fill, Align};
//!
//! assert_eq!(fill("src/lib.rs", 12, Align::Left, 0), "src/lib.rs  ");
//! assert_eq!(fill("42", 5, Align::Right, 0), "   42");
//! assert_eq!(fill("very/long/nested/path/file.js", 12, Align::Left, 0), "... /file.js");
//! ```

use console::{measure_text_width, pad_str, Alignment};
use unicode_width::UnicodeWidthChar;

use crate::classify::Classification;
use crate::layout::{ELLIPSIS, TAB_SIZE};
use crate::palette::{Palette, TextMode};

/// Horizontal alignment of a cell value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Pad on the right. Names.
    #[default]
    Left,
    /// Pad on the left. Numbers.
    Right,
}

/// Returns the display width of a string, ignoring ANSI escape codes.
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Pads a string on the left (right-aligns) to reach the target width.
pub fn pad_left(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

/// Pads a string on the right (left-aligns) to reach the target width.
pub fn pad_right(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

/// Truncates from the start so the result fits `max_width`, prefixing the kept
/// tail with `marker`.
///
/// Strings that already fit are returned unchanged. When `max_width` is
/// narrower than the marker, the marker itself is cut.
///
/// ```rust
/// use covtable_render::cell::truncate_tail;
///
/// assert_eq!(truncate_tail("1,2,3,4,5,6,7,8", 9, "... "), "... 6,7,8");
/// assert_eq!(truncate_tail("short", 9, "... "), "short");
/// assert_eq!(truncate_tail("abcdef", 2, "... "), "..");
/// ```
pub fn truncate_tail(s: &str, max_width: usize, marker: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    let marker_width = display_width(marker);
    if max_width <= marker_width {
        return prefix_with_width(marker, max_width);
    }

    format!("{}{}", marker, suffix_with_width(s, max_width - marker_width))
}

/// Lays a value out in a cell of exactly `width` columns.
///
/// `indent` levels of [`TAB_SIZE`] spaces come first and consume part of the
/// width. The rest holds the value, padded according to `align` or cut with
/// [`truncate_tail`]. When the indentation alone fills the width, only the
/// indentation is returned.
pub fn fill(value: &str, width: usize, align: Align, indent: usize) -> String {
    let (leader, body) = compose(value, width, align, indent);
    leader + &body
}

/// Splits a cell into its indentation and its (padded or truncated) body.
fn compose(value: &str, width: usize, align: Align, indent: usize) -> (String, String) {
    let leading = indent * TAB_SIZE;
    let leader = " ".repeat(leading);
    if width <= leading {
        return (leader, String::new());
    }

    let remaining = width - leading;
    let body = if display_width(value) <= remaining {
        value.to_string()
    } else {
        truncate_tail(value, remaining, ELLIPSIS)
    };

    // Wide characters can leave the truncated body one column short.
    let body = match align {
        Align::Left => pad_right(&body, remaining),
        Align::Right => pad_left(&body, remaining),
    };
    (leader, body)
}

/// Formats cells and hands their classification to the palette.
#[derive(Debug, Clone, Copy)]
pub struct CellFormatter<'a> {
    palette: &'a Palette,
    mode: TextMode,
}

impl<'a> CellFormatter<'a> {
    pub fn new(palette: &'a Palette, mode: TextMode) -> Self {
        Self { palette, mode }
    }

    /// A formatter that never decorates.
    pub fn plain(palette: &'a Palette) -> Self {
        Self::new(palette, TextMode::Plain)
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    /// Lays out the cell, then styles the body. The indentation stays bare.
    pub fn format(
        &self,
        value: &str,
        width: usize,
        align: Align,
        indent: usize,
        class: Option<Classification>,
    ) -> String {
        let (leader, body) = compose(value, width, align, indent);
        if body.is_empty() {
            return leader;
        }
        leader + &self.palette.paint(&body, class, self.mode)
    }
}

// --- Internal helpers ---

/// Longest prefix of `s` whose display width is at most `max_width`.
fn prefix_with_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

/// Longest suffix of `s` whose display width is at most `max_width`.
fn suffix_with_width(s: &str, max_width: usize) -> String {
    let mut start = s.len();
    let mut current_width = 0;
    for (i, c) in s.char_indices().rev() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        current_width += char_width;
        start = i;
    }
    s[start..].to_string()
}
