//! Grapheme-accurate text shaping: display width, wrapping, and truncation.
//!
//! Terminal cells are grapheme clusters, not `char`s — a flag emoji, an
//! accented letter built from a base + combining mark, or a ZWJ sequence
//! must all occupy exactly one cell slot (plus a continuation cell if
//! double-wide). This module is the sole place that reasons about
//! `unicode-segmentation` grapheme boundaries and `unicode-width` display
//! widths; every other module treats a line of text as a `Vec` of already
//! -measured graphemes.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// How a [`crate::widgets::Text`] wraps when its width is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Break at word boundaries; a single word longer than the line falls
    /// back to a hard (per-grapheme) break.
    #[default]
    Soft,
    /// Break at grapheme boundaries regardless of word boundaries.
    Hard,
    /// Never wrap: render as a single line, clipped/truncated to width.
    None,
}

/// A single grapheme cluster and its display width (0, 1, or 2 cells).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grapheme<'a> {
    pub text: &'a str,
    pub width: u8,
}

/// Iterate the extended grapheme clusters of `s` with their display widths.
pub fn graphemes(s: &str) -> impl Iterator<Item = Grapheme<'_>> {
    s.graphemes(true).map(|g| Grapheme {
        text: g,
        width: UnicodeWidthStr::width(g).min(2) as u8,
    })
}

/// Total display width of `s` in terminal cells, summing grapheme widths
/// (not `char` widths — a cluster like "é" built from `e` + combining
/// acute is one cell, not two `char`s worth).
pub fn display_width(s: &str) -> u16 {
    graphemes(s).map(|g| g.width as u16).sum()
}

/// Wrap `text` to `width` cells using `mode`, returning one `String` per
/// line. `width == 0` degenerates to one grapheme per line.
pub fn wrap(text: &str, width: u16, mode: WrapMode) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    match mode {
        WrapMode::None => vec![text.replace('\n', " ")],
        WrapMode::Hard => wrap_hard(text, width),
        WrapMode::Soft => wrap_soft(text, width),
    }
}

fn wrap_hard(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_w = 0u16;
        for g in graphemes(raw_line) {
            if current_w + g.width as u16 > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_w = 0;
            }
            current.push_str(g.text);
            current_w += g.width as u16;
        }
        lines.push(current);
    }
    lines
}

fn wrap_soft(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_w = 0u16;
        for word in raw_line.split_inclusive(' ') {
            let trimmed_for_measure = word;
            let word_w = display_width(trimmed_for_measure);

            if word_w > width {
                // A single word longer than the line: flush what we have,
                // then hard-break the word itself.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_w = 0;
                }
                let mut broken = wrap_hard(trimmed_for_measure, width);
                if let Some(last) = broken.pop() {
                    current = last;
                    current_w = display_width(&current);
                }
                lines.extend(broken);
                continue;
            }

            if current_w + word_w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_w = 0;
            }
            current.push_str(word);
            current_w += word_w;
        }
        lines.push(current.trim_end().to_string());
    }
    lines
}

/// Truncate `text` to fit within `width` cells, appending an ellipsis
/// grapheme in the last cell if anything was cut. Never splits a
/// double-wide grapheme in half — a cluster that would straddle the
/// boundary is dropped rather than partially rendered.
pub fn truncate(text: &str, width: u16) -> String {
    if display_width(text) <= width {
        return text.replace('\n', " ");
    }
    if width == 0 {
        return String::new();
    }
    let ellipsis_w = 1u16;
    let budget = width.saturating_sub(ellipsis_w);
    let mut out = String::new();
    let mut w = 0u16;
    for g in graphemes(&text.replace('\n', " ")) {
        if w + g.width as u16 > budget {
            break;
        }
        out.push_str(g.text);
        w += g.width as u16;
    }
    out.push('…');
    out
}

/// Number of lines `text` would occupy when wrapped to `width` with `mode`.
pub fn height_for_width(text: &str, width: u16, mode: WrapMode) -> u16 {
    if text.is_empty() {
        return 0;
    }
    wrap(text, width, mode).len() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn wide_char_width() {
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn combining_mark_is_one_grapheme() {
        // "e" + combining acute accent (U+0301) is a single grapheme cluster.
        let s = "e\u{0301}";
        assert_eq!(graphemes(s).count(), 1);
        assert_eq!(display_width(s), 1);
    }

    #[test]
    fn soft_wrap_breaks_on_words() {
        let lines = wrap("the quick brown fox", 10, WrapMode::Soft);
        assert!(lines.iter().all(|l| display_width(l) <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox");
    }

    #[test]
    fn soft_wrap_falls_back_to_hard_for_long_word() {
        let lines = wrap("supercalifragilisticexpialidocious", 10, WrapMode::Soft);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| display_width(l) <= 10));
    }

    #[test]
    fn hard_wrap_breaks_anywhere() {
        let lines = wrap("abcdefghij", 3, WrapMode::Hard);
        assert_eq!(lines, vec!["abc", "def", "ghi", "j"]);
    }

    #[test]
    fn none_mode_is_single_line() {
        let lines = wrap("a\nb\nc", 3, WrapMode::None);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn truncate_adds_ellipsis_when_cut() {
        let t = truncate("hello world", 8);
        assert_eq!(display_width(&t), 8);
        assert!(t.ends_with('…'));
    }

    #[test]
    fn truncate_noop_when_it_fits() {
        assert_eq!(truncate("hi", 10), "hi");
    }
}
