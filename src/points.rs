use ndarray::{ArrayBase, ArrayView3, Axis, Data, Dimension};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
    colormap::{ColorMapping, Colormap},
    error::Result,
    field::{Selection, view3},
    types::{Cell, Rgba, Value},
};

/// Coordinates and values of the cells picked out of a field.
///
/// The four vectors are index-aligned: entry `i` of each describes one cell.
/// Cells are ordered row-major, `x` outermost and `z` innermost.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampledPoints {
    pub xs: Vec<usize>,
    pub ys: Vec<usize>,
    pub zs: Vec<usize>,
    pub values: Vec<Value>,
}

impl SampledPoints {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, [x, y, z]: Cell, value: Value) {
        self.xs.push(x);
        self.ys.push(y);
        self.zs.push(z);
        self.values.push(value);
    }

    /// Moves every point of `other` to the end of `self`, leaving `other` empty.
    pub fn append(&mut self, other: &mut SampledPoints) {
        self.xs.append(&mut other.xs);
        self.ys.append(&mut other.ys);
        self.zs.append(&mut other.zs);
        self.values.append(&mut other.values);
    }

    /// Returns the grid coordinates of point `i`.
    pub fn cell(&self, i: usize) -> Cell {
        [self.xs[i], self.ys[i], self.zs[i]]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, Value)> + '_ {
        (0..self.len()).map(|i| (self.cell(i), self.values[i]))
    }

    /// Colors each point by feeding its raw value straight into `colormap`.
    ///
    /// Used for distance fields, whose values already sit near `[0, 1]` around the surface.
    pub fn raw_colors(&self, colormap: Colormap) -> Vec<Rgba> {
        self.values.iter().map(|&v| colormap.map(v)).collect()
    }
}

/// Finite cells of a field with one color per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct ColoredPoints {
    pub points: SampledPoints,
    pub mapping: ColorMapping,
    /// Index-aligned with `points`.
    pub colors: Vec<Rgba>,
}

/// Collects every cell with `value <= threshold` together with its raw value.
///
/// Accepts a 3D field or a 4D field with a leading axis of length 1.
pub fn extract_boundary_points<S, D>(
    field: &ArrayBase<S, D>,
    threshold: Value,
) -> Result<SampledPoints>
where
    S: Data<Elem = Value>,
    D: Dimension,
{
    let field = view3(field)?;
    Ok(sample(&field, Selection::AtMost(threshold)))
}

/// Collects every finite cell and colors it on the [`Colormap::Hot`] gradient.
///
/// The gradient spans the smallest to largest finite value found. When there are no
/// finite cells, or they all hold the same value, every point gets
/// [`ColorMapping::fallback_color`].
pub fn extract_finite_points<S, D>(field: &ArrayBase<S, D>) -> Result<ColoredPoints>
where
    S: Data<Elem = Value>,
    D: Dimension,
{
    extract_finite_points_with(field, Colormap::Hot)
}

/// Like [`extract_finite_points`], with a caller-chosen gradient.
pub fn extract_finite_points_with<S, D>(
    field: &ArrayBase<S, D>,
    colormap: Colormap,
) -> Result<ColoredPoints>
where
    S: Data<Elem = Value>,
    D: Dimension,
{
    let field = view3(field)?;
    let points = sample(&field, Selection::Finite);

    let mapping = ColorMapping::new(colormap, &points.values);
    if mapping.is_degenerate() {
        debug!(
            "No usable value range over {} finite cells, using a single color",
            points.len()
        );
    }
    let colors = mapping.colors_for(&points.values);

    Ok(ColoredPoints {
        points,
        mapping,
        colors,
    })
}

/// Scans the field once, in parallel over X slices.
///
/// Slices are concatenated in X order, so the result is identical to a serial scan.
pub(crate) fn sample(field: &ArrayView3<'_, Value>, selection: Selection) -> SampledPoints {
    let per_x: Vec<SampledPoints> = (0..field.len_of(Axis(0)))
        .into_par_iter()
        .map(|x| {
            let mut local = SampledPoints::default();
            for ((y, z), &v) in field.index_axis(Axis(0), x).indexed_iter() {
                if selection.selects(v) {
                    local.push([x, y, z], v);
                }
            }
            local
        })
        .collect();

    let mut points = SampledPoints::default();
    for mut slice in per_x {
        points.append(&mut slice);
    }

    debug!(
        "Selected {} of {} cells with {:?}",
        points.len(),
        field.len(),
        selection
    );
    points
}
