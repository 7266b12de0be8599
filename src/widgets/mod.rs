//! Built-in leaf and container widgets: [`Text`] (the sole true leaf with
//! content of its own), [`Container`] (Row/Column/Stack packing, the
//! workhorse every higher-level layout composes from), and
//! [`ErrorPlaceholder`] (what the reconciler substitutes when a composite's
//! `build` recursion exceeds the depth bound).
//!
//! Grounded on the teacher's widget module layout — one file per built-in,
//! a shared builder-method style (`.padding(...)`, `.border(...)`) rather
//! than struct-literal construction, and children stored behind
//! `RefCell<Option<Vec<_>>>` so a container can be declared once per frame
//! and still hand its children to the reconciler by value.

use std::any::Any;
use std::cell::RefCell;

use crate::element::{
    Axis, BorderDecoration, BoxedWidget, CrossAxisAlign, Dim, EdgeInsets, LayoutKind, MainAxisAlign, Offsets, Size, Widget, WidgetId,
};
use crate::style::{ColorSource, Span};
use crate::text::{self, WrapMode};
use crate::types::{Attr, BorderStyle, Overflow, Rgba, TextAlign};

/// A styled, optionally-wrapped run of text. The only widget that paints
/// its own glyphs directly rather than delegating to children.
pub struct Text {
    id: Option<WidgetId>,
    content: String,
    fg: ColorSource,
    bg: ColorSource,
    attrs: Attr,
    wrap: WrapMode,
    align: TextAlign,
    dim_w: Dim,
    dim_h: Dim,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            fg: ColorSource::Solid(Rgba::TERMINAL_DEFAULT),
            bg: ColorSource::Solid(Rgba::TERMINAL_DEFAULT),
            attrs: Attr::NONE,
            wrap: WrapMode::Soft,
            align: TextAlign::Left,
            dim_w: Dim::Auto,
            dim_h: Dim::Auto,
        }
    }

    pub fn id(mut self, id: impl Into<WidgetId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn fg(mut self, fg: impl Into<ColorSource>) -> Self {
        self.fg = fg.into();
        self
    }

    pub fn bg(mut self, bg: impl Into<ColorSource>) -> Self {
        self.bg = bg.into();
        self
    }

    pub fn attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, w: Dim) -> Self {
        self.dim_w = w;
        self
    }

    pub fn height(mut self, h: Dim) -> Self {
        self.dim_h = h;
        self
    }

    fn lines_for_width(&self, width: Option<u16>) -> Vec<String> {
        match width {
            Some(w) => text::wrap(&self.content, w, self.wrap),
            None => vec![self.content.replace('\n', " ")],
        }
    }
}

impl Widget for Text {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Text"
    }

    fn id(&self) -> Option<&WidgetId> {
        self.id.as_ref()
    }

    fn dim_w(&self) -> Dim {
        self.dim_w
    }

    fn dim_h(&self) -> Dim {
        self.dim_h
    }

    fn intrinsic(&self, available_w: Option<u16>) -> Size {
        let lines = self.lines_for_width(available_w);
        let w = lines.iter().map(|l| text::display_width(l)).max().unwrap_or(0);
        let w = available_w.map(|a| w.min(a)).unwrap_or(w);
        Size::new(w, lines.len() as u16)
    }

    fn paint(&self, ctx: &mut crate::paint::PaintContext) {
        let rect = ctx.rect();
        let lines = self.lines_for_width(Some(rect.w));
        for (y, line) in lines.iter().enumerate() {
            if y as u16 >= rect.h {
                break;
            }
            let line_w = text::display_width(line);
            let x = match self.align {
                TextAlign::Left => 0,
                TextAlign::Center => rect.w.saturating_sub(line_w) / 2,
                TextAlign::Right => rect.w.saturating_sub(line_w),
            };
            let span = Span { text: line.clone(), fg: self.fg.clone(), bg: self.bg.clone(), attrs: self.attrs, link: None };
            ctx.write_spans(x, y as u16, std::slice::from_ref(&span));
        }
    }

    fn content_eq(&self, other: &dyn Widget) -> bool {
        other.as_any().downcast_ref::<Text>().is_some_and(|o| {
            self.content == o.content
                && self.fg == o.fg
                && self.bg == o.bg
                && self.attrs == o.attrs
                && self.wrap == o.wrap
                && self.align == o.align
                && self.dim_w == o.dim_w
                && self.dim_h == o.dim_h
        })
    }
}

/// A Row/Column/Stack container: arranges its children per [`LayoutKind`]
/// and paints its own background/border uniformly (the compositor handles
/// both for every widget; this type just declares them).
pub struct Container {
    id: Option<WidgetId>,
    kind: LayoutKind,
    dim_w: Dim,
    dim_h: Dim,
    padding: EdgeInsets,
    margin: EdgeInsets,
    border: BorderStyle,
    border_color: Rgba,
    border_title: Option<BorderDecoration>,
    border_subtitle: Option<BorderDecoration>,
    background: Option<ColorSource>,
    justify: MainAxisAlign,
    align: CrossAxisAlign,
    spacing: u16,
    overflow: Overflow,
    offsets: Option<Offsets>,
    children: RefCell<Option<Vec<BoxedWidget>>>,
}

impl Container {
    fn new(kind: LayoutKind) -> Self {
        Self {
            id: None,
            kind,
            dim_w: Dim::Auto,
            dim_h: Dim::Auto,
            padding: EdgeInsets::default(),
            margin: EdgeInsets::default(),
            border: BorderStyle::None,
            border_color: Rgba::TERMINAL_DEFAULT,
            border_title: None,
            border_subtitle: None,
            background: None,
            justify: MainAxisAlign::FlexStart,
            align: CrossAxisAlign::Stretch,
            spacing: 0,
            overflow: Overflow::Visible,
            offsets: None,
            children: RefCell::new(Some(Vec::new())),
        }
    }

    pub fn row() -> Self {
        Self::new(LayoutKind::Flow(Axis::Row))
    }

    pub fn column() -> Self {
        Self::new(LayoutKind::Flow(Axis::Column))
    }

    pub fn stack() -> Self {
        Self::new(LayoutKind::Stack)
    }

    pub fn id(mut self, id: impl Into<WidgetId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn width(mut self, w: Dim) -> Self {
        self.dim_w = w;
        self
    }

    pub fn height(mut self, h: Dim) -> Self {
        self.dim_h = h;
        self
    }

    pub fn padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn margin(mut self, margin: EdgeInsets) -> Self {
        self.margin = margin;
        self
    }

    pub fn border(mut self, style: BorderStyle) -> Self {
        self.border = style;
        self
    }

    pub fn border_color(mut self, color: Rgba) -> Self {
        self.border_color = color;
        self
    }

    pub fn title(mut self, deco: BorderDecoration) -> Self {
        self.border_title = Some(deco);
        self
    }

    pub fn subtitle(mut self, deco: BorderDecoration) -> Self {
        self.border_subtitle = Some(deco);
        self
    }

    pub fn background(mut self, color: impl Into<ColorSource>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn justify(mut self, justify: MainAxisAlign) -> Self {
        self.justify = justify;
        self
    }

    pub fn align(mut self, align: CrossAxisAlign) -> Self {
        self.align = align;
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Mark this container as a positioned Stack child.
    pub fn offsets(mut self, offsets: Offsets) -> Self {
        self.offsets = Some(offsets);
        self
    }

    pub fn child(self, widget: impl Widget + 'static) -> Self {
        self.children.borrow_mut().as_mut().unwrap().push(Box::new(widget));
        self
    }

    pub fn children(self, widgets: Vec<BoxedWidget>) -> Self {
        *self.children.borrow_mut() = Some(widgets);
        self
    }
}

impl Widget for Container {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Container"
    }

    fn id(&self) -> Option<&WidgetId> {
        self.id.as_ref()
    }

    fn layout_kind(&self) -> LayoutKind {
        self.kind
    }

    fn dim_w(&self) -> Dim {
        self.dim_w
    }

    fn dim_h(&self) -> Dim {
        self.dim_h
    }

    fn padding(&self) -> EdgeInsets {
        self.padding
    }

    fn margin(&self) -> EdgeInsets {
        self.margin
    }

    fn border(&self) -> BorderStyle {
        self.border
    }

    fn border_color(&self) -> Rgba {
        self.border_color
    }

    fn border_title(&self) -> Option<BorderDecoration> {
        self.border_title.clone()
    }

    fn border_subtitle(&self) -> Option<BorderDecoration> {
        self.border_subtitle.clone()
    }

    fn background(&self) -> Option<ColorSource> {
        self.background.clone()
    }

    fn main_axis_align(&self) -> MainAxisAlign {
        self.justify
    }

    fn cross_axis_align(&self) -> CrossAxisAlign {
        self.align
    }

    fn spacing(&self) -> u16 {
        self.spacing
    }

    fn overflow(&self) -> Overflow {
        self.overflow
    }

    fn offsets(&self) -> Option<Offsets> {
        self.offsets
    }

    fn children_owned(&self) -> Vec<BoxedWidget> {
        self.children.borrow_mut().take().unwrap_or_default()
    }
}

/// Substituted by the reconciler when a composite's `build` recursion
/// exceeds [`crate::element::MAX_BUILD_DEPTH`]. Renders the offending path
/// so the failure is visible instead of crashing the whole tree.
pub struct ErrorPlaceholder {
    message: String,
}

impl ErrorPlaceholder {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Widget for ErrorPlaceholder {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "ErrorPlaceholder"
    }

    fn intrinsic(&self, available_w: Option<u16>) -> Size {
        let w = available_w.unwrap_or_else(|| text::display_width(&self.message));
        Size::new(w, text::height_for_width(&self.message, w.max(1), WrapMode::Soft))
    }

    fn paint(&self, ctx: &mut crate::paint::PaintContext) {
        let rect = ctx.rect();
        let lines = text::wrap(&self.message, rect.w.max(1), WrapMode::Soft);
        for (y, line) in lines.iter().enumerate() {
            if y as u16 >= rect.h {
                break;
            }
            let span = Span::plain(line.clone()).with_fg(Rgba::RED).with_attrs(Attr::BOLD);
            ctx.write_spans(0, y as u16, std::slice::from_ref(&span));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_intrinsic_single_line_no_width() {
        let t = Text::new("hello");
        assert_eq!(t.intrinsic(None), Size::new(5, 1));
    }

    #[test]
    fn text_intrinsic_wraps_to_available_width() {
        let t = Text::new("the quick brown fox");
        let s = t.intrinsic(Some(10));
        assert!(s.h >= 2);
        assert!(s.w <= 10);
    }

    #[test]
    fn container_children_owned_consumes_once() {
        let c = Container::row().child(Text::new("a")).child(Text::new("b"));
        assert_eq!(c.children_owned().len(), 2);
        assert_eq!(c.children_owned().len(), 0);
    }
}
