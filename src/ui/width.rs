//! Display-column arithmetic
//!
//! All layout math in this crate is done in terminal display columns, not
//! bytes or chars; East Asian wide characters count as two columns.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `text` in terminal columns
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Split `text` at a display-column boundary: the head fits within `cols`
/// columns, the tail is the remainder. A wide character straddling the
/// boundary goes entirely to the tail.
pub fn take_cols(text: &str, cols: usize) -> (&str, &str) {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > cols {
            return (&text[..i], &text[i..]);
        }
        used += w;
    }
    (text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_split() {
        assert_eq!(take_cols("hello", 3), ("hel", "lo"));
        assert_eq!(take_cols("hello", 5), ("hello", ""));
        assert_eq!(take_cols("hello", 10), ("hello", ""));
        assert_eq!(take_cols("hello", 0), ("", "hello"));
    }

    #[test]
    fn test_wide_chars_never_straddle() {
        assert_eq!(text_width("あいう"), 6);
        assert_eq!(take_cols("あいう", 3), ("あ", "いう"));
        assert_eq!(take_cols("あいう", 4), ("あい", "う"));
    }
}
