//! Coordinate conventions between field storage and the renderer.
//!
//! Fields are stored `[x, y, z]`. The voxel renderer expects `[z, x, y]`: the last
//! axis rotated to the front. Point clouds are plotted with the same reordering so
//! both views of one field line up.
use crate::types::{Cell, Point, VoxelVolume};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisConvention {
    /// Cyclic rotation `(x, y, z) -> (z, x, y)`.
    #[default]
    RendererZxy,
    /// Storage order, unchanged.
    Identity,
}

impl AxisConvention {
    /// Source axis for each output axis, in `ndarray::permuted_axes` form.
    pub fn permutation(&self) -> [usize; 3] {
        match self {
            AxisConvention::RendererZxy => [2, 0, 1],
            AxisConvention::Identity => [0, 1, 2],
        }
    }

    /// Reorders the axes of `volume`, returning it in standard layout.
    pub fn apply_volume(&self, volume: VoxelVolume) -> VoxelVolume {
        let permuted = volume.permuted_axes(self.permutation());
        if permuted.is_standard_layout() {
            permuted
        } else {
            permuted.as_standard_layout().into_owned()
        }
    }

    /// Position of storage cell `cell` in the reordered space.
    pub fn apply_cell(&self, cell: Cell) -> Cell {
        self.permutation().map(|axis| cell[axis])
    }

    /// Same as [`apply_cell`](AxisConvention::apply_cell), as a render-space point.
    pub fn apply_point(&self, cell: Cell) -> Point {
        let [a, b, c] = self.apply_cell(cell);
        Point::new(a as f32, b as f32, c as f32)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array3;

    use super::*;

    #[test]
    fn rotation_moves_last_axis_first() {
        let volume = VoxelVolume::from_elem((2, 3, 4), false);
        let out = AxisConvention::RendererZxy.apply_volume(volume);
        assert_eq!(out.dim(), (4, 2, 3));
        assert!(out.is_standard_layout());
    }

    #[test]
    fn set_cell_follows_apply_cell() {
        let mut volume = Array3::from_elem((2, 3, 4), false);
        volume[[1, 2, 3]] = true;
        let convention = AxisConvention::RendererZxy;
        let out = convention.apply_volume(volume);
        assert_eq!(convention.apply_cell([1, 2, 3]), [3, 1, 2]);
        assert!(out[convention.apply_cell([1, 2, 3])]);
        assert_eq!(out.iter().filter(|&&b| b).count(), 1);
    }

    #[test]
    fn identity_keeps_everything() {
        let volume = VoxelVolume::from_elem((2, 3, 4), true);
        let out = AxisConvention::Identity.apply_volume(volume.clone());
        assert_eq!(out, volume);
        assert_eq!(AxisConvention::Identity.apply_cell([5, 6, 7]), [5, 6, 7]);
    }
}
