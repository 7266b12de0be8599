//! Constraint-based layout engine.
//!
//! Solves the five-pass algorithm from SPEC_FULL.md §4.B directly over the
//! element tree: bottom-up intrinsic sizing, top-down constraint resolution,
//! per-container flex distribution with Bresenham-style error diffusion (so
//! a Flex slack split always sums exactly, per §8 invariant 3), alignment,
//! and text re-wrap to the final resolved width.
//!
//! Grounded on the teacher's `layout/titan.rs` pass structure (tree-order
//! bottom-up measure, then top-down position, BFS child walk) but rewritten
//! against the `Element`/`Widget` contract instead of the parallel-array
//! `FlexNode` registry, and with the flex-grow rounding corrected from
//! `titan.rs`'s `floor`-only remainder loss to exact error-diffusion.

use crate::element::{
    Axis, BorderStyle, CrossAxisAlign, Dim, EdgeInsets, Element, LayoutKind, MainAxisAlign,
    Offsets, Rect, Size,
};
use crate::types::Overflow;

/// Lay out the whole tree against a viewport of `viewport_w` x `viewport_h`
/// cells, writing `geometry`/`clip` into every element.
pub fn layout(root: &mut Element, viewport_w: u16, viewport_h: u16) {
    let avail = Size::new(viewport_w, viewport_h);
    let w = resolve_axis(root.widget.dim_w(), viewport_w, || intrinsic(root, None).w);
    let h = resolve_axis(root.widget.dim_h(), viewport_h, || intrinsic(root, Some(w)).h);
    let _ = avail;
    root.geometry = Rect::new(0, 0, w, h);
    root.clip = Rect::new(0, 0, w, h);
    layout_children(root, root.clip);
}

fn resolve_axis(dim: Dim, parent: u16, intrinsic_fn: impl FnOnce() -> u16) -> u16 {
    match dim {
        Dim::Cells(n) => n,
        Dim::Percent(p) => ((parent as u32 * p as u32) / 100) as u16,
        Dim::Auto | Dim::Flex(_) => intrinsic_fn(),
    }
}

/// Bottom-up intrinsic size of `el`, ignoring Flex, given an optional
/// available width (used to re-wrap text and to size Auto containers whose
/// content wraps). Containers never need a widget-level override: this
/// function derives their intrinsic size from children directly.
fn intrinsic(el: &Element, available_w: Option<u16>) -> Size {
    let padding = el.widget.padding();
    let border = border_thickness(el.widget.border());
    let extra_w = padding.horizontal() + border * 2;
    let extra_h = padding.vertical() + border * 2;

    match el.widget.layout_kind() {
        LayoutKind::Leaf => {
            let inner_w = available_w.map(|w| w.saturating_sub(extra_w));
            // A composite's reconciled element has exactly one child (its
            // built widget, see `element::reconcile_single_child`) and
            // reports `Leaf` itself since it has no layout opinion of its
            // own (spec.md §4.E); its intrinsic size passes through to that
            // child's. A true leaf (Text) has no children and measures its
            // own content directly.
            let content = match el.children.as_slice() {
                [child] => intrinsic(child, inner_w),
                _ => el.widget.intrinsic(inner_w),
            };
            Size::new(content.w + extra_w, content.h + extra_h)
        }
        LayoutKind::Flow(axis) => {
            let inner_avail_w = available_w.map(|w| w.saturating_sub(extra_w));
            let spacing = el.widget.spacing();
            let mut sum_main = 0u32;
            let mut max_cross = 0u32;
            let n = el.children.len();
            for child in &el.children {
                let margin = child.widget.margin();
                let s = child_natural_size(child, axis, inner_avail_w, margin);
                let (main, cross) = match axis {
                    Axis::Row => (s.w as u32 + margin.horizontal() as u32, s.h as u32 + margin.vertical() as u32),
                    Axis::Column => (s.h as u32 + margin.vertical() as u32, s.w as u32 + margin.horizontal() as u32),
                };
                sum_main += main;
                max_cross = max_cross.max(cross);
            }
            if n > 0 {
                sum_main += spacing as u32 * (n as u32 - 1);
            }
            let (w, h) = match axis {
                Axis::Row => (sum_main, max_cross),
                Axis::Column => (max_cross, sum_main),
            };
            Size::new((w as u16).saturating_add(extra_w), (h as u16).saturating_add(extra_h))
        }
        LayoutKind::Stack => {
            let inner_avail_w = available_w.map(|w| w.saturating_sub(extra_w));
            let mut w = 0u32;
            let mut h = 0u32;
            for child in &el.children {
                let margin = child.widget.margin();
                let s = child_natural_size(child, Axis::Row, inner_avail_w, margin);
                w = w.max(s.w as u32 + margin.horizontal() as u32);
                h = h.max(s.h as u32 + margin.vertical() as u32);
            }
            Size::new((w as u16).saturating_add(extra_w), (h as u16).saturating_add(extra_h))
        }
    }
}

/// A child's natural (non-Flex) contribution to its parent's intrinsic
/// measurement: explicit Cells/Percent where known, else its own intrinsic.
/// Flex children contribute 0 (deferred to the flex pass).
fn child_natural_size(child: &Element, main_axis: Axis, avail_w: Option<u16>, _margin: EdgeInsets) -> Size {
    let dw = child.widget.dim_w();
    let dh = child.widget.dim_h();
    let w = match dw {
        Dim::Cells(n) => n,
        Dim::Percent(p) => avail_w.map(|a| ((a as u32 * p as u32) / 100) as u16).unwrap_or(0),
        Dim::Flex(_) if main_axis == Axis::Row => 0,
        _ => intrinsic(child, avail_w).w,
    };
    let h = match dh {
        Dim::Cells(n) => n,
        Dim::Percent(_) => intrinsic(child, avail_w.or(Some(w))).h,
        Dim::Flex(_) if main_axis == Axis::Column => 0,
        _ => intrinsic(child, Some(w.max(if w == 0 { avail_w.unwrap_or(0) } else { w }))).h,
    };
    Size::new(w, h)
}

fn border_thickness(style: BorderStyle) -> u16 {
    if style == BorderStyle::None {
        0
    } else {
        1
    }
}

/// Constraint + flex + alignment pass for `el`'s children, given `el`'s own
/// already-resolved `geometry`.
fn layout_children(el: &mut Element, clip: Rect) {
    let rect = el.geometry;
    if rect.w == 0 || rect.h == 0 {
        return;
    }
    let padding = el.widget.padding();
    let border = border_thickness(el.widget.border());
    let content = Rect::new(
        rect.x + padding.left + border,
        rect.y + padding.top + border,
        rect.w.saturating_sub(padding.horizontal() + border * 2),
        rect.h.saturating_sub(padding.vertical() + border * 2),
    );
    let clipped = match el.widget.overflow() {
        Overflow::Hidden | Overflow::Scroll | Overflow::Auto => clip.intersect(&content),
        Overflow::Visible => clip,
    };

    match el.widget.layout_kind() {
        LayoutKind::Leaf if el.children.is_empty() => {
            // A bounded-width leaf (Text) re-wraps to its final width; the
            // concrete widget reads its own `geometry.w` at paint time via
            // `PaintContext`, so nothing further is needed here.
        }
        LayoutKind::Leaf => {
            // Composite pass-through: its one built child occupies this
            // element's whole content rect (the composite itself has no
            // layout opinion — see `intrinsic`'s matching branch).
            let child = &mut el.children[0];
            child.geometry = content;
            child.clip = clipped;
            layout_children(child, clipped);
        }
        LayoutKind::Flow(axis) => layout_flow(el, axis, content, clipped),
        LayoutKind::Stack => layout_stack(el, content, clipped),
    }
}

fn layout_flow(el: &mut Element, axis: Axis, rect: Rect, clip: Rect) {
    let n = el.children.len();
    if n == 0 {
        return;
    }
    let spacing = el.widget.spacing();
    let justify = el.widget.main_axis_align();
    let align = el.widget.cross_axis_align();
    let is_row = axis == Axis::Row;
    let main_avail = if is_row { rect.w } else { rect.h };
    let cross_avail = if is_row { rect.h } else { rect.w };

    let mut main_sizes = vec![0u16; n];
    let mut cross_sizes = vec![0u16; n];
    let mut margins_main = vec![0u16; n];
    let mut margins_cross = vec![0u16; n];
    let mut flex_weights = vec![0u32; n];
    let mut non_flex_sum: u32 = 0;

    for (i, child) in el.children.iter().enumerate() {
        let margin = child.widget.margin();
        margins_main[i] = if is_row { margin.horizontal() } else { margin.vertical() };
        margins_cross[i] = if is_row { margin.vertical() } else { margin.horizontal() };

        let dim_main = if is_row { child.widget.dim_w() } else { child.widget.dim_h() };
        match dim_main {
            Dim::Flex(w) => flex_weights[i] = w as u32,
            other => {
                let avail = main_avail.saturating_sub(margins_main[i]);
                let size = resolve_axis(other, avail, || {
                    let cross_hint = if is_row { None } else { Some(cross_avail.saturating_sub(margins_cross[i])) };
                    let s = intrinsic(child, cross_hint);
                    if is_row { s.w } else { s.h }
                });
                main_sizes[i] = size;
                non_flex_sum += size as u32 + margins_main[i] as u32;
            }
        }
    }

    let spacing_sum: u32 = if n > 1 { spacing as u32 * (n as u32 - 1) } else { 0 };
    let slack = (main_avail as i64 - non_flex_sum as i64 - spacing_sum as i64).max(0) as u32;
    let total_weight: u32 = flex_weights.iter().sum();
    let overflowed = (main_avail as i64) < (non_flex_sum as i64 + spacing_sum as i64);

    if total_weight > 0 && !overflowed {
        // Error-diffusion distribution: each share accumulates the previous
        // remainder before truncating, so the running sum lands exactly on
        // `slack` once every flex child has been visited (§8 invariant 3).
        let mut error: i64 = 0;
        for i in 0..n {
            if flex_weights[i] == 0 {
                continue;
            }
            let numerator = slack as i64 * flex_weights[i] as i64 + error;
            let assigned = numerator / total_weight as i64;
            error = numerator - assigned * total_weight as i64;
            main_sizes[i] = assigned as u16;
        }
    }
    // Overflow (slack<0 equivalent, i.e. `overflowed`) or no flex children at
    // all leaves flex children at their initialized 0 and non-flex children
    // at their full requested size; the excess is clipped at paint time.

    for i in 0..n {
        let dim_cross = if is_row { el.children[i].widget.dim_h() } else { el.children[i].widget.dim_w() };
        let avail = cross_avail.saturating_sub(margins_cross[i]);
        cross_sizes[i] = match dim_cross {
            Dim::Cells(cells) => cells,
            Dim::Percent(p) => ((avail as u32 * p as u32) / 100) as u16,
            Dim::Flex(_) | Dim::Auto => {
                if align == CrossAxisAlign::Stretch {
                    avail
                } else {
                    let main_hint = Some(main_sizes[i]);
                    let s = intrinsic(&el.children[i], if is_row { main_hint } else { None });
                    if is_row { s.h } else { s.w }
                }
            }
        };
    }

    let used_main: i64 = main_sizes.iter().zip(&margins_main).map(|(&m, &g)| m as i64 + g as i64).sum::<i64>()
        + spacing_sum as i64;
    let remaining = (main_avail as i64 - used_main).max(0);
    let (mut cursor, gap_extra) = match justify {
        MainAxisAlign::FlexStart => (0i64, spacing as i64),
        MainAxisAlign::Center => (remaining / 2, spacing as i64),
        MainAxisAlign::FlexEnd => (remaining, spacing as i64),
        MainAxisAlign::SpaceBetween if n > 1 => (0, spacing as i64 + remaining / (n as i64 - 1)),
        MainAxisAlign::SpaceBetween => (0, spacing as i64),
        MainAxisAlign::SpaceAround => {
            let around = remaining / n as i64;
            (around / 2, spacing as i64 + around)
        }
        MainAxisAlign::SpaceEvenly => {
            let even = remaining / (n as i64 + 1);
            (even, spacing as i64 + even)
        }
    };

    for i in 0..n {
        let cross_pos: i64 = match align {
            CrossAxisAlign::Center => (cross_avail as i64 - cross_sizes[i] as i64) / 2,
            CrossAxisAlign::FlexEnd => cross_avail as i64 - cross_sizes[i] as i64,
            CrossAxisAlign::Baseline | CrossAxisAlign::FlexStart | CrossAxisAlign::Stretch => 0,
        };
        let margin = el.children[i].widget.margin();
        let (x, y, w, h) = if is_row {
            (rect.x as i64 + cursor + margin.left as i64, rect.y as i64 + cross_pos + margin.top as i64, main_sizes[i] as i64, cross_sizes[i] as i64)
        } else {
            (rect.x as i64 + cross_pos + margin.left as i64, rect.y as i64 + cursor + margin.top as i64, cross_sizes[i] as i64, main_sizes[i] as i64)
        };
        let geom = Rect::new(x.max(0) as u16, y.max(0) as u16, w.max(0) as u16, h.max(0) as u16);
        el.children[i].geometry = geom;
        el.children[i].clip = clip.intersect(&geom);
        cursor += main_sizes[i] as i64 + margins_main[i] as i64 + gap_extra;
        let child_clip = el.children[i].clip;
        layout_children(&mut el.children[i], child_clip);
    }
}

fn layout_stack(el: &mut Element, rect: Rect, clip: Rect) {
    let align = el.widget.cross_axis_align();
    let n = el.children.len();
    for i in 0..n {
        let offsets = el.children[i].widget.offsets();
        let geom = if let Some(o) = offsets {
            positioned_rect(o, rect, &el.children[i])
        } else {
            let s = intrinsic(&el.children[i], Some(rect.w));
            let w = match el.children[i].widget.dim_w() {
                Dim::Cells(n) => n,
                Dim::Percent(p) => ((rect.w as u32 * p as u32) / 100) as u16,
                Dim::Auto | Dim::Flex(_) => {
                    if align == CrossAxisAlign::Stretch {
                        rect.w
                    } else {
                        s.w
                    }
                }
            };
            let h = match el.children[i].widget.dim_h() {
                Dim::Cells(n) => n,
                Dim::Percent(p) => ((rect.h as u32 * p as u32) / 100) as u16,
                Dim::Auto | Dim::Flex(_) => {
                    if align == CrossAxisAlign::Stretch {
                        rect.h
                    } else {
                        s.h
                    }
                }
            };
            let x = match align {
                CrossAxisAlign::Center => rect.x + (rect.w.saturating_sub(w)) / 2,
                CrossAxisAlign::FlexEnd => rect.x + rect.w.saturating_sub(w),
                _ => rect.x,
            };
            let y = match align {
                CrossAxisAlign::Center => rect.y + (rect.h.saturating_sub(h)) / 2,
                CrossAxisAlign::FlexEnd => rect.y + rect.h.saturating_sub(h),
                _ => rect.y,
            };
            Rect::new(x, y, w, h)
        };
        el.children[i].geometry = geom;
        el.children[i].clip = clip.intersect(&geom);
        let child_clip = el.children[i].clip;
        layout_children(&mut el.children[i], child_clip);
    }
}

fn positioned_rect(o: Offsets, stack: Rect, child: &Element) -> Rect {
    let s = intrinsic(child, Some(stack.w));
    let w = match child.widget.dim_w() {
        Dim::Cells(n) => n,
        Dim::Percent(p) => ((stack.w as u32 * p as u32) / 100) as u16,
        _ => s.w,
    };
    let h = match child.widget.dim_h() {
        Dim::Cells(n) => n,
        Dim::Percent(p) => ((stack.h as u32 * p as u32) / 100) as u16,
        _ => s.h,
    };
    let x = match (o.left, o.right) {
        (Some(l), _) => stack.x + l,
        (None, Some(r)) => stack.x + stack.w.saturating_sub(r + w),
        (None, None) => stack.x,
    };
    let y = match (o.top, o.bottom) {
        (Some(t), _) => stack.y + t,
        (None, Some(b)) => stack.y + stack.h.saturating_sub(b + h),
        (None, None) => stack.y,
    };
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::BoxedWidget;
    use crate::types::{AlignItems, JustifyContent};
    use std::any::Any;

    struct Fixed {
        w: Dim,
        h: Dim,
        kind: LayoutKind,
        spacing: u16,
        justify: MainAxisAlign,
        align: CrossAxisAlign,
    }

    impl Fixed {
        fn leaf(w: Dim, h: Dim) -> Self {
            Self { w, h, kind: LayoutKind::Leaf, spacing: 0, justify: JustifyContent::FlexStart, align: AlignItems::Stretch }
        }
        fn row(w: Dim, h: Dim, spacing: u16) -> Self {
            Self { w, h, kind: LayoutKind::Flow(Axis::Row), spacing, justify: JustifyContent::FlexStart, align: AlignItems::Stretch }
        }
    }

    impl crate::element::Widget for Fixed {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn type_name(&self) -> &'static str {
            "Fixed"
        }
        fn layout_kind(&self) -> LayoutKind {
            self.kind
        }
        fn dim_w(&self) -> Dim {
            self.w
        }
        fn dim_h(&self) -> Dim {
            self.h
        }
        fn spacing(&self) -> u16 {
            self.spacing
        }
        fn main_axis_align(&self) -> MainAxisAlign {
            self.justify
        }
        fn cross_axis_align(&self) -> CrossAxisAlign {
            self.align
        }
    }

    fn leaf(w: Dim) -> Element {
        Element::for_test(Box::new(Fixed::leaf(w, Dim::Cells(1))) as BoxedWidget)
    }

    #[test]
    fn flex_packing_s2() {
        // §8 scenario S2: Row width 10, spacing 0, children Cells(3)/Flex(1)/
        // Flex(2) => 3, 2, 5 exactly (Bresenham-style error diffusion).
        let mut root = Element::for_test(Box::new(Fixed::row(Dim::Cells(10), Dim::Cells(1), 0)) as BoxedWidget);
        root.children = vec![leaf(Dim::Cells(3)), leaf(Dim::Flex(1)), leaf(Dim::Flex(2))];
        layout(&mut root, 10, 1);
        assert_eq!(root.children[0].geometry.w, 3);
        assert_eq!(root.children[1].geometry.w, 2);
        assert_eq!(root.children[2].geometry.w, 5);
        assert_eq!(root.children[0].geometry.x, 0);
        assert_eq!(root.children[1].geometry.x, 3);
        assert_eq!(root.children[2].geometry.x, 5);
    }

    #[test]
    fn flex_children_stretch_cross_axis_by_default() {
        let mut root = Element::for_test(Box::new(Fixed::row(Dim::Cells(6), Dim::Cells(4), 0)) as BoxedWidget);
        root.children = vec![leaf(Dim::Flex(1)), leaf(Dim::Flex(1))];
        layout(&mut root, 6, 4);
        assert_eq!(root.children[0].geometry.h, 4);
        assert_eq!(root.children[1].geometry.h, 4);
    }

    #[test]
    fn no_flex_children_overflow_is_clipped_not_panicked() {
        let mut root = Element::for_test(Box::new(Fixed::row(Dim::Cells(4), Dim::Cells(1), 0)) as BoxedWidget);
        root.children = vec![leaf(Dim::Cells(3)), leaf(Dim::Cells(3))];
        layout(&mut root, 4, 1);
        assert_eq!(root.children[0].geometry.w, 3);
        assert_eq!(root.children[1].geometry.w, 3);
        assert_eq!(root.children[1].clip.w, 1);
    }

    #[test]
    fn composite_pass_through_sizes_and_positions_from_its_sole_child() {
        // A composite element reports `Leaf` itself (it has no layout
        // opinion of its own) but carries its built widget as its one
        // child; both the element's own geometry and its child's must
        // come from that child, not from the composite's (default-zero)
        // own intrinsic size.
        let mut root = Element::for_test(Box::new(Fixed::leaf(Dim::Auto, Dim::Auto)) as BoxedWidget);
        root.children = vec![leaf(Dim::Cells(5))];
        layout(&mut root, 20, 3);
        assert_eq!(root.geometry.w, 5);
        assert_eq!(root.geometry.h, 1);
        assert_eq!(root.children[0].geometry, root.geometry);
    }
}
