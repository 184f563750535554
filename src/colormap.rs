//! Value-to-color mapping for sampled fields.
//!
//! Gradients are piecewise linear per channel, defined by `(position, value)` anchors
//! on `[0, 1]`. [`Normalize`] rescales a finite data range onto that interval and
//! [`ColorMapping`] combines both, falling back to a single color when the range is
//! empty or has zero width.
use crate::{
    interp::{find_t, lerp},
    types::{Rgba, Value},
};

type Anchors = &'static [(Value, Value)];

const HOT: [Anchors; 3] = [
    &[(0.0, 0.0416), (0.365079, 1.0), (1.0, 1.0)],
    &[(0.0, 0.0), (0.365079, 0.0), (0.746032, 1.0), (1.0, 1.0)],
    &[(0.0, 0.0), (0.746032, 0.0), (1.0, 1.0)],
];

const JET: [Anchors; 3] = [
    &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    &[
        (0.0, 0.0),
        (0.125, 0.0),
        (0.375, 1.0),
        (0.64, 1.0),
        (0.91, 0.0),
        (1.0, 0.0),
    ],
    &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
];

/// Color returned for NaN input.
pub const BAD_COLOR: Rgba = [0.0, 0.0, 0.0, 0.0];

/// Fixed perceptual gradients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Colormap {
    /// Black → red → yellow → white. Every channel is non-decreasing.
    #[default]
    Hot,
    /// Blue → cyan → yellow → red.
    Jet,
}

impl Colormap {
    /// Maps `t` to an opaque color. `t` is clamped to `[0, 1]`; NaN yields [`BAD_COLOR`].
    pub fn map(&self, t: Value) -> Rgba {
        if t.is_nan() {
            return BAD_COLOR;
        }
        let t = t.clamp(0.0, 1.0);
        let [r, g, b] = self.anchors().map(|a| channel(a, t));
        [r, g, b, 1.0]
    }

    fn anchors(&self) -> [Anchors; 3] {
        match self {
            Colormap::Hot => HOT,
            Colormap::Jet => JET,
        }
    }
}

fn channel(anchors: Anchors, t: Value) -> Value {
    // First anchor strictly to the right of t.
    let i = anchors.partition_point(|&(x, _)| x <= t);
    if i == 0 {
        return anchors[0].1;
    }
    if i == anchors.len() {
        return anchors[i - 1].1;
    }
    let (x0, y0) = anchors[i - 1];
    let (x1, y1) = anchors[i];
    lerp(y0, y1, find_t(x0, x1, t))
}

/// Linear rescaling of `[vmin, vmax]` onto `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalize {
    pub vmin: Value,
    pub vmax: Value,
}

impl Normalize {
    /// Builds the range from the finite entries of `values`.
    ///
    /// Returns `None` when there are no finite values at all.
    pub fn from_finite<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some(Normalize { vmin: v, vmax: v }),
                Some(n) => Some(Normalize {
                    vmin: n.vmin.min(v),
                    vmax: n.vmax.max(v),
                }),
            })
    }

    /// `true` when the range has zero width.
    pub fn is_degenerate(&self) -> bool {
        self.vmax <= self.vmin
    }

    /// Position of `v` inside the range, clamped to `[0, 1]`.
    ///
    /// A zero-width range maps everything to `0.0`. The division runs in `f64` so a
    /// range wider than `f32::MAX` does not overflow.
    pub fn apply(&self, v: Value) -> Value {
        if self.is_degenerate() {
            return 0.0;
        }
        let (lo, hi) = (f64::from(self.vmin), f64::from(self.vmax));
        ((f64::from(v) - lo) / (hi - lo)).clamp(0.0, 1.0) as Value
    }
}

/// Per-value colors over the finite range of a set of samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMapping {
    pub colormap: Colormap,
    /// `None` when the samples had no usable range.
    pub norm: Option<Normalize>,
}

impl ColorMapping {
    /// Computes the normalization range from the finite subset of `values`.
    ///
    /// A range of zero width is stored as `None`, same as an empty one.
    pub fn new(colormap: Colormap, values: &[Value]) -> Self {
        let norm = Normalize::from_finite(values.iter().copied()).filter(|n| !n.is_degenerate());
        Self { colormap, norm }
    }

    /// `true` when every value receives [`fallback_color`](ColorMapping::fallback_color).
    pub fn is_degenerate(&self) -> bool {
        self.norm.is_none()
    }

    /// The single color used when no range is available: the low end of the gradient.
    pub fn fallback_color(&self) -> Rgba {
        self.colormap.map(0.0)
    }

    /// Gradient position of `v`, or `None` for non-finite values and degenerate ranges.
    pub fn position(&self, v: Value) -> Option<Value> {
        if !v.is_finite() {
            return None;
        }
        self.norm.map(|n| n.apply(v))
    }

    pub fn color_of(&self, v: Value) -> Rgba {
        match self.position(v) {
            Some(t) => self.colormap.map(t),
            None => self.fallback_color(),
        }
    }

    pub fn colors_for(&self, values: &[Value]) -> Vec<Rgba> {
        values.iter().map(|&v| self.color_of(v)).collect()
    }
}
