//! Color and span styling.
//!
//! Colors reuse [`crate::types::Rgba`] (solid RGB, ANSI index, or terminal
//! default) and add [`Gradient`]: a linear ramp of color stops sampled per
//! cell by the compositor. A [`Span`] pairs a run of text with the styling
//! the paint pass applies to it — foreground/background source (solid or
//! gradient), attributes, and an optional link URL. Markup parsing that
//! produces spans is an application concern; the core only consumes the
//! already-parsed result.

use crate::types::{Attr, Rgba};

/// Per-channel linear interpolation rounded to the nearest 8-bit value.
/// `Rgba::lerp` truncates instead of rounding, which is fine for the
/// general blend path but not precise enough for gradient reproducibility
/// (§8 scenario S6 requires `round`, not `trunc`).
fn lerp_rounded(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let ch = |a: i16, b: i16| -> i16 { (a as f32 + (b as f32 - a as f32) * t).round() as i16 };
    Rgba {
        r: ch(a.r, b.r),
        g: ch(a.g, b.g),
        b: ch(a.b, b.b),
        a: ch(a.a, b.a),
    }
}

/// A color stop in a [`Gradient`]: position along the axis in `[0.0, 1.0]`
/// and the color at that position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgba,
}

/// A linear color gradient resolved per-cell by the compositor.
///
/// `angle_degrees` is measured from the positive x-axis (0 = left-to-right,
/// 90 = top-to-bottom), matching the CSS `linear-gradient()` convention.
/// Stops are resolved by interpolating directly between the two nearest
/// sRGB-encoded stops — not through a linear-light intermediate — see
/// DESIGN.md's resolution of Open Question (the black→white reproducibility
/// scenario only matches a literal per-channel lerp of the 8-bit values).
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub stops: Vec<GradientStop>,
    pub angle_degrees: f32,
}

impl Gradient {
    /// A two-stop gradient from `start` to `end` at the given angle.
    pub fn linear(start: Rgba, end: Rgba, angle_degrees: f32) -> Self {
        Self {
            stops: vec![
                GradientStop { position: 0.0, color: start },
                GradientStop { position: 1.0, color: end },
            ],
            angle_degrees,
        }
    }

    /// Resolve the color at a normalized position `t` (clamped to `[0,1]`)
    /// along the gradient axis, by locating the two bracketing stops and
    /// interpolating the sRGB channels linearly between them.
    pub fn sample(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        if self.stops.is_empty() {
            return Rgba::TERMINAL_DEFAULT;
        }
        if self.stops.len() == 1 {
            return self.stops[0].color;
        }
        let mut lo = &self.stops[0];
        let mut hi = &self.stops[self.stops.len() - 1];
        for window in self.stops.windows(2) {
            if t >= window[0].position && t <= window[1].position {
                lo = &window[0];
                hi = &window[1];
                break;
            }
        }
        let span = (hi.position - lo.position).max(f32::EPSILON);
        let local_t = ((t - lo.position) / span).clamp(0.0, 1.0);
        lerp_rounded(lo.color, hi.color, local_t)
    }

    /// Given a cell's position relative to the element's bounding box
    /// (`0..w`, `0..h`), project the cell onto the gradient axis and return
    /// the normalized position along that axis. Positions are normalized by
    /// the last valid index (`w-1`/`h-1`), not the extent, so the first and
    /// last columns/rows land exactly on `t=0`/`t=1`.
    pub fn project(&self, cell_x: u16, cell_y: u16, w: u16, h: u16) -> f32 {
        if w == 0 || h == 0 {
            return 0.0;
        }
        let nx = if w > 1 { cell_x as f32 / (w - 1) as f32 } else { 0.0 };
        let ny = if h > 1 { cell_y as f32 / (h - 1) as f32 } else { 0.0 };

        let theta = self.angle_degrees.to_radians();
        let (dx, dy) = (theta.cos(), theta.sin());

        // Project the box's diagonal extremes onto the axis to normalize,
        // so t=0 at one edge of the box and t=1 at the opposite edge
        // regardless of angle.
        let corners = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
        let projections: Vec<f32> = corners.iter().map(|(cx, cy)| cx * dx + cy * dy).collect();
        let min_p = projections.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_p = projections.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let range = (max_p - min_p).max(f32::EPSILON);

        let p = nx * dx + ny * dy;
        (p - min_p) / range
    }

    /// Resolve the gradient's color at a given cell, given the element's
    /// bounding rect.
    pub fn resolve_cell(&self, cell_x: u16, cell_y: u16, w: u16, h: u16) -> Rgba {
        self.sample(self.project(cell_x, cell_y, w, h))
    }
}

/// Either a flat color or a gradient, resolved per-cell at paint time.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
    Solid(Rgba),
    Gradient(Gradient),
}

impl ColorSource {
    pub fn resolve(&self, cell_x: u16, cell_y: u16, w: u16, h: u16) -> Rgba {
        match self {
            Self::Solid(c) => *c,
            Self::Gradient(g) => g.resolve_cell(cell_x, cell_y, w, h),
        }
    }
}

impl From<Rgba> for ColorSource {
    fn from(c: Rgba) -> Self {
        Self::Solid(c)
    }
}

impl From<Gradient> for ColorSource {
    fn from(g: Gradient) -> Self {
        Self::Gradient(g)
    }
}

/// A styled run of text: content plus the styling applied uniformly across
/// it. Produced by markup parsing (out of core scope) or constructed
/// directly by application code.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub fg: ColorSource,
    pub bg: ColorSource,
    pub attrs: Attr,
    pub link: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: ColorSource::Solid(Rgba::TERMINAL_DEFAULT),
            bg: ColorSource::Solid(Rgba::TERMINAL_DEFAULT),
            attrs: Attr::NONE,
            link: None,
        }
    }

    pub fn with_fg(mut self, fg: impl Into<ColorSource>) -> Self {
        self.fg = fg.into();
        self
    }

    pub fn with_bg(mut self, bg: impl Into<ColorSource>) -> Self {
        self.bg = bg.into();
        self
    }

    pub fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }
}
