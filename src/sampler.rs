use ndarray::{ArrayBase, Data, Dimension};

use crate::{
    axes::AxisConvention,
    colormap::Colormap,
    error::Result,
    field::{DEFAULT_THRESHOLD, Selection},
    points::{SampledPoints, extract_boundary_points, extract_finite_points_with},
    types::{Rgba, Value, VoxelVolume},
    voxels::extract_voxels,
};

/// How a field is turned into renderable geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewKind {
    /// Distance-field cells at or below `threshold`, colored by raw value.
    BoundaryPoints { threshold: Value },
    /// Signed-distance-field narrow band, colored over its finite range.
    FinitePoints,
    /// Distance-field cells at or below `threshold`, drawn as solid voxels.
    BoundaryVoxels { threshold: Value },
    /// Signed-distance-field narrow band, drawn as solid voxels.
    FiniteVoxels,
}

impl Default for ViewKind {
    fn default() -> Self {
        ViewKind::BoundaryPoints {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ViewKind {
    /// Default figure title for this kind of view.
    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::BoundaryPoints { .. } => "Zero DF",
            ViewKind::FinitePoints => "Finite SDF",
            ViewKind::BoundaryVoxels { .. } => "Zero DF with voxels",
            ViewKind::FiniteVoxels => "Finite SDF with voxels",
        }
    }

    pub fn selection(&self) -> Selection {
        match *self {
            ViewKind::BoundaryPoints { threshold } | ViewKind::BoundaryVoxels { threshold } => {
                Selection::AtMost(threshold)
            }
            ViewKind::FinitePoints | ViewKind::FiniteVoxels => Selection::Finite,
        }
    }
}

/// Output of [`FieldSampler::sample`].
#[derive(Clone, Debug, PartialEq)]
pub enum SampledView {
    /// Selected cells in storage order with one color each.
    Points {
        points: SampledPoints,
        colors: Vec<Rgba>,
    },
    /// Occupancy volume, already reordered by the sampler's [`AxisConvention`].
    Voxels(VoxelVolume),
}

/// Bundles the gradients and axis convention used to sample fields for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSampler {
    /// Gradient for raw distance-field values.
    pub boundary_colormap: Colormap,
    /// Gradient for normalized signed-distance-field values.
    pub finite_colormap: Colormap,
    pub axis_convention: AxisConvention,
}

impl Default for FieldSampler {
    fn default() -> Self {
        Self {
            boundary_colormap: Colormap::Jet,
            finite_colormap: Colormap::Hot,
            axis_convention: AxisConvention::default(),
        }
    }
}

impl FieldSampler {
    pub fn sample<S, D>(&self, kind: ViewKind, field: &ArrayBase<S, D>) -> Result<SampledView>
    where
        S: Data<Elem = Value>,
        D: Dimension,
    {
        match kind {
            ViewKind::BoundaryPoints { threshold } => {
                let points = extract_boundary_points(field, threshold)?;
                let colors = points.raw_colors(self.boundary_colormap);
                Ok(SampledView::Points { points, colors })
            }
            ViewKind::FinitePoints => {
                let colored = extract_finite_points_with(field, self.finite_colormap)?;
                Ok(SampledView::Points {
                    points: colored.points,
                    colors: colored.colors,
                })
            }
            ViewKind::BoundaryVoxels { .. } | ViewKind::FiniteVoxels => {
                extract_voxels(field, kind.selection(), self.axis_convention)
                    .map(SampledView::Voxels)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array3;

    use super::*;

    fn band() -> Array3<Value> {
        let mut field = Array3::<Value>::from_elem((4, 4, 4), Value::INFINITY);
        field[[1, 1, 1]] = -1.0;
        field[[2, 2, 2]] = 1.0;
        field
    }

    #[test]
    fn finite_points_use_finite_colormap() {
        let sampler = FieldSampler::default();
        let SampledView::Points { points, colors } =
            sampler.sample(ViewKind::FinitePoints, &band()).unwrap()
        else {
            panic!("expected points");
        };
        assert_eq!(points.len(), 2);
        assert_eq!(colors[0], Colormap::Hot.map(0.0));
        assert_eq!(colors[1], Colormap::Hot.map(1.0));
    }

    #[test]
    fn voxel_kinds_honour_identity_convention() {
        let sampler = FieldSampler {
            axis_convention: AxisConvention::Identity,
            ..Default::default()
        };
        let SampledView::Voxels(volume) = sampler.sample(ViewKind::FiniteVoxels, &band()).unwrap()
        else {
            panic!("expected voxels");
        };
        assert!(volume[[1, 1, 1]]);
        assert!(volume[[2, 2, 2]]);
    }

    #[test]
    fn titles_match_figure_names() {
        assert_eq!(ViewKind::default().title(), "Zero DF");
        assert_eq!(ViewKind::FiniteVoxels.title(), "Finite SDF with voxels");
        assert_eq!(
            ViewKind::BoundaryVoxels { threshold: 0.1 }.selection(),
            Selection::AtMost(0.1)
        );
    }
}
