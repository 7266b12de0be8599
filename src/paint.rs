//! The styled cell compositor: walks the laid-out element tree and paints
//! background, border (with packed title/subtitle), and content into a
//! [`Frame`] of [`crate::types::Cell`]s, while building the [`HitGrid`] the
//! input router uses for hit-testing.
//!
//! Grounded on the teacher's `renderer/diff.rs` (the general shape of a
//! full-frame cell buffer with per-cell fg/bg/attrs) and `types.rs`'s
//! `Rgba::blend`/`Cell` contract; the per-cell gradient resolution comes
//! from `style.rs`'s `ColorSource`. Floats (modal/popover overlays) are
//! painted as a second pass over the base tree, each with its own subtree
//! and hit-grid region, matching how the teacher layers an overlay root on
//! top of the primary one.

use std::rc::Rc;

use crate::app::Context;
use crate::element::{BorderDecoration, BoxedWidget, Element, Rect};
use crate::input::HitGrid;
use crate::signal::SubKey;
use crate::style::{ColorSource, Span};
use crate::theme::Theme;
use crate::types::{Attr, BorderStyle, Cell, Rgba};

/// A full grid of painted cells, one frame's worth of compositor output.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let area = width as usize * height as usize;
        Self { width, height, cells: (0..area).map(|_| Cell::default()).collect() }
    }

    pub fn get(&self, x: u16, y: u16) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let start = self.index(0, y);
        &self.cells[start..start + self.width as usize]
    }
}

/// An overlay rendered on top of the base tree: a modal dialog or popover
/// with its own laid-out subtree, positioned at `rect` in viewport space.
/// Kept deliberately minimal — one rect, one root, no nested float stack —
/// since the scheduler owns at most a short-lived stack of these rather
/// than a general windowing system (see DESIGN.md Open Questions).
pub struct Float {
    pub root: Element,
    pub rect: Rect,
    pub modal: bool,
    pub backdrop: Option<Rgba>,
    pub dismiss: Option<Rc<dyn Fn()>>,
}

/// Per-element paint surface handed to `Widget::paint`. Wraps the shared
/// frame and hit-grid with this element's content rect and clip so a widget
/// can't accidentally paint outside its own box.
pub struct PaintContext<'a> {
    frame: &'a mut Frame,
    hit: &'a mut HitGrid,
    rect: Rect,
    clip: Rect,
    pub theme: &'a Theme,
    token: SubKey,
}

impl<'a> PaintContext<'a> {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Write one grapheme cell at `(x, y)` in this element's local
    /// coordinate space (0,0 = top-left of its content box). Clipped
    /// against both the element's own box and any ancestor's clip.
    pub fn set_cell(&mut self, x: u16, y: u16, text: &str, width: u8, fg: Rgba, bg: Rgba, attrs: Attr, link: Option<Rc<str>>) {
        let abs_x = self.rect.x.saturating_add(x);
        let abs_y = self.rect.y.saturating_add(y);
        if abs_x >= self.rect.x + self.rect.w || abs_y >= self.rect.y + self.rect.h {
            return;
        }
        if !self.clip.contains(abs_x, abs_y) {
            return;
        }
        let tag: Option<Rc<str>> = Some(Rc::from(self.token.to_string()));
        self.frame.set(abs_x, abs_y, Cell { text: Box::from(text), width, fg, bg, attrs, link, tag: tag.clone() });
        self.hit.set(abs_x, abs_y, self.token);
        if width == 2 && abs_x + 1 < self.rect.x + self.rect.w {
            self.frame.set(abs_x + 1, abs_y, Cell::continuation(fg, bg, tag));
            self.hit.set(abs_x + 1, abs_y, self.token);
        }
    }

    /// Paint a left-to-right run of spans starting at local `(x, y)`,
    /// stopping once the row's available width is exhausted. Used by leaf
    /// widgets (Text) after they've already wrapped to the target width.
    pub fn write_spans(&mut self, x: u16, y: u16, spans: &[Span]) {
        let mut cursor = x;
        for span in spans {
            for g in crate::text::graphemes(&span.text) {
                if cursor >= self.rect.w {
                    return;
                }
                let fg = span.fg.resolve(cursor, y, self.rect.w, self.rect.h);
                let bg = span.bg.resolve(cursor, y, self.rect.w, self.rect.h);
                let link = span.link.as_ref().map(|s| Rc::from(s.as_str()));
                self.set_cell(cursor, y, g.text, g.width, fg, bg, span.attrs, link);
                cursor += g.width as u16;
            }
        }
    }
}

/// Paint the whole element tree (plus any active floats, topmost last) into
/// a fresh frame sized to `width` x `height`, returning the frame and the
/// hit-grid built alongside it.
pub fn paint(root: &Element, floats: &[Float], theme: &Theme, width: u16, height: u16) -> (Frame, HitGrid) {
    let mut frame = Frame::new(width, height);
    let mut hit = HitGrid::new(width, height);
    let mut ancestors = Vec::new();
    paint_element(root, &mut frame, &mut hit, &mut ancestors, theme);

    for float in floats {
        if let Some(backdrop) = float.backdrop {
            fill_backdrop(&mut frame, backdrop);
        }
        let mut float_ancestors = Vec::new();
        paint_element(&float.root, &mut frame, &mut hit, &mut float_ancestors, theme);
    }

    (frame, hit)
}

fn fill_backdrop(frame: &mut Frame, color: Rgba) {
    for y in 0..frame.height {
        for x in 0..frame.width {
            let mut cell = frame.get(x, y).clone();
            cell.bg = Rgba::blend(color, cell.bg);
            frame.set(x, y, cell);
        }
    }
}

fn paint_element(el: &Element, frame: &mut Frame, hit: &mut HitGrid, ancestors: &mut Vec<SubKey>, theme: &Theme) {
    let rect = el.geometry;
    let clip = el.clip;
    if clip.w == 0 || clip.h == 0 || rect.w == 0 || rect.h == 0 {
        return;
    }

    hit.record_ancestors(el.subtree_token, ancestors.iter().rev().copied().collect());

    if let Some(bg) = el.widget.background() {
        fill_rect(frame, hit, rect, clip, &bg, el.subtree_token);
    }

    let border = el.widget.border();
    let has_border = border != BorderStyle::None;
    if has_border {
        draw_border(frame, hit, rect, clip, border, el.widget.border_color(), el.widget.border_title(), el.widget.border_subtitle(), el.subtree_token);
    }

    let padding = el.widget.padding();
    let b = if has_border { 1 } else { 0 };
    let content_rect = Rect::new(
        rect.x + padding.left + b,
        rect.y + padding.top + b,
        rect.w.saturating_sub(padding.horizontal() + b * 2),
        rect.h.saturating_sub(padding.vertical() + b * 2),
    );
    let content_clip = clip.intersect(&content_rect);

    if content_rect.w > 0 && content_rect.h > 0 {
        let mut ctx = PaintContext { frame, hit, rect: content_rect, clip: content_clip, theme, token: el.subtree_token };
        el.widget.paint(&mut ctx);
    }

    ancestors.push(el.subtree_token);
    for child in &el.children {
        paint_element(child, frame, hit, ancestors, theme);
    }
    ancestors.pop();
}

fn fill_rect(frame: &mut Frame, hit: &mut HitGrid, rect: Rect, clip: Rect, color: &ColorSource, token: SubKey) {
    for dy in 0..rect.h {
        for dx in 0..rect.w {
            let x = rect.x + dx;
            let y = rect.y + dy;
            if !clip.contains(x, y) {
                continue;
            }
            let mut cell = frame.get(x, y).clone();
            let resolved = color.resolve(dx, dy, rect.w, rect.h);
            cell.bg = Rgba::blend(resolved, cell.bg);
            cell.tag = Some(Rc::from(token.to_string()));
            frame.set(x, y, cell);
            hit.set(x, y, token);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_border(
    frame: &mut Frame,
    hit: &mut HitGrid,
    rect: Rect,
    clip: Rect,
    style: BorderStyle,
    color: Rgba,
    title: Option<BorderDecoration>,
    subtitle: Option<BorderDecoration>,
    token: SubKey,
) {
    if rect.w == 0 || rect.h == 0 {
        return;
    }
    let (h, v, tl, tr, br, bl) = style.chars();
    let mut put = |frame: &mut Frame, hit: &mut HitGrid, x: u16, y: u16, text: &str| {
        if x < rect.x + rect.w && y < rect.y + rect.h && clip.contains(x, y) {
            frame.set(x, y, Cell { text: Box::from(text), width: 1, fg: color, bg: Rgba::TERMINAL_DEFAULT, attrs: Attr::NONE, link: None, tag: Some(Rc::from(token.to_string())) });
            hit.set(x, y, token);
        }
    };

    let right = rect.x + rect.w - 1;
    let bottom = rect.y + rect.h - 1;

    put(frame, hit, rect.x, rect.y, tl);
    if rect.w > 1 {
        put(frame, hit, right, rect.y, tr);
    }
    if rect.h > 1 {
        put(frame, hit, rect.x, bottom, bl);
        if rect.w > 1 {
            put(frame, hit, right, bottom, br);
        }
    }
    for x in (rect.x + 1)..right {
        put(frame, hit, x, rect.y, h);
        if rect.h > 1 {
            put(frame, hit, x, bottom, h);
        }
    }
    for y in (rect.y + 1)..bottom {
        put(frame, hit, rect.x, y, v);
        if rect.w > 1 {
            put(frame, hit, right, y, v);
        }
    }

    if rect.w > 2 {
        let inner_w = rect.w - 2;
        if let Some(deco) = &title {
            write_packed_decoration(frame, hit, rect.x + 1, rect.y, inner_w, deco, color, clip, token);
        }
        if rect.h > 1 {
            if let Some(deco) = &subtitle {
                write_packed_decoration(frame, hit, rect.x + 1, bottom, inner_w, deco, color, clip, token);
            }
        }
    }
}

/// Pack a border decoration's left/center/right slots into `width` cells
/// starting at `(x, y)`, left→center→right, each separated from its
/// neighbor by at least one untouched cell. A later slot that would overlap
/// an earlier one (not enough room left) is dropped entirely rather than
/// truncated — a half-written label reads worse than a missing one.
#[allow(clippy::too_many_arguments)]
fn write_packed_decoration(frame: &mut Frame, hit: &mut HitGrid, x: u16, y: u16, width: u16, deco: &BorderDecoration, color: Rgba, clip: Rect, token: SubKey) {
    fn try_place(occupied: &[(u16, u16)], text: &str, offset: u16, width: u16) -> Option<(u16, u16)> {
        let w = crate::text::display_width(text);
        if w == 0 || offset + w > width {
            return None;
        }
        let end = offset + w;
        for &(os, oe) in occupied {
            let gap_ok = end + 1 <= os || offset >= oe + 1;
            if !gap_ok {
                return None;
            }
        }
        Some((offset, end))
    }

    let mut occupied: Vec<(u16, u16)> = Vec::new(); // (start, end-exclusive) offsets within `width`
    let mut writes: Vec<(u16, String)> = Vec::new();

    if let Some(left) = &deco.left {
        if let Some((s, e)) = try_place(&occupied, left, 0, width) {
            occupied.push((s, e));
            writes.push((s, left.clone()));
        }
    }
    if let Some(center) = &deco.center {
        let w = crate::text::display_width(center);
        let offset = width.saturating_sub(w) / 2;
        if let Some((s, e)) = try_place(&occupied, center, offset, width) {
            occupied.push((s, e));
            writes.push((s, center.clone()));
        }
    }
    if let Some(right) = &deco.right {
        let w = crate::text::display_width(right);
        let offset = width.saturating_sub(w);
        if let Some((s, e)) = try_place(&occupied, right, offset, width) {
            occupied.push((s, e));
            writes.push((s, right.clone()));
        }
    }

    for (offset, text) in writes {
        let mut cursor = x + offset;
        for g in crate::text::graphemes(&text) {
            if cursor >= x + width {
                break;
            }
            if clip.contains(cursor, y) {
                frame.set(cursor, y, Cell { text: Box::from(g.text), width: g.width, fg: color, bg: Rgba::TERMINAL_DEFAULT, attrs: Attr::NONE, link: None, tag: Some(Rc::from(token.to_string())) });
                hit.set(cursor, y, token);
            }
            cursor += g.width.max(1) as u16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_default_cells_are_blank() {
        let frame = Frame::new(3, 2);
        assert_eq!(frame.get(0, 0).text.as_ref(), " ");
        assert_eq!(frame.width, 3);
        assert_eq!(frame.height, 2);
    }

    #[test]
    fn packed_decoration_skips_overlap() {
        let mut frame = Frame::new(10, 1);
        let mut hit = HitGrid::new(10, 1);
        let deco = BorderDecoration { left: Some("Title".into()), center: Some("Mid".into()), right: Some("X".into()) };
        write_packed_decoration(&mut frame, &mut hit, 0, 0, 8, &deco, Rgba::WHITE, Rect::new(0, 0, 10, 1), 1);
        assert_eq!(frame.get(0, 0).text.as_ref(), "T");
    }
}
