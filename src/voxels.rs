use ndarray::{ArrayBase, Data, Dimension};
use tracing::debug;

use crate::{
    axes::AxisConvention,
    error::Result,
    field::{Selection, view3},
    types::{Value, VoxelVolume},
};

/// Marks every cell with `value <= threshold`, in renderer axis order `(z, x, y)`.
pub fn extract_boundary_voxels<S, D>(field: &ArrayBase<S, D>, threshold: Value) -> Result<VoxelVolume>
where
    S: Data<Elem = Value>,
    D: Dimension,
{
    extract_voxels(field, Selection::AtMost(threshold), AxisConvention::RendererZxy)
}

/// Marks every finite cell, in renderer axis order `(z, x, y)`.
pub fn extract_finite_voxels<S, D>(field: &ArrayBase<S, D>) -> Result<VoxelVolume>
where
    S: Data<Elem = Value>,
    D: Dimension,
{
    extract_voxels(field, Selection::Finite, AxisConvention::RendererZxy)
}

/// Builds the occupancy volume for `selection` and reorders it with `convention`.
pub fn extract_voxels<S, D>(
    field: &ArrayBase<S, D>,
    selection: Selection,
    convention: AxisConvention,
) -> Result<VoxelVolume>
where
    S: Data<Elem = Value>,
    D: Dimension,
{
    let field = view3(field)?;
    let mask = selection.mask(&field);
    debug!(
        "Voxelized {} of {} cells with {:?}",
        mask.iter().filter(|&&b| b).count(),
        mask.len(),
        selection
    );
    Ok(convention.apply_volume(mask))
}
