//! Input normalization and cell selection for 3D scalar fields.
//!
//! Fields may arrive with a leading batch axis of length 1 (`(1, 32, 32, 32)`);
//! [`squeeze_field`] strips it so every sampler works on a plain 3D view.
use ndarray::{ArrayBase, ArrayView3, ArrayViewD, Axis, Data, Dimension, Ix3};

use crate::{
    error::{FieldError, Result},
    types::{Value, VoxelVolume},
};

/// Threshold separating boundary cells from exterior cells in a distance field.
pub const DEFAULT_THRESHOLD: Value = 0.5;

/// Returns a 3D view of `field`, dropping a leading axis of length 1.
///
/// Any other rank or a leading axis longer than 1 is a
/// [`FieldError::ShapeMismatch`].
pub fn squeeze_field(field: ArrayViewD<'_, Value>) -> Result<ArrayView3<'_, Value>> {
    let shape = field.shape().to_vec();
    let field = if field.ndim() == 4 && shape[0] == 1 {
        field.index_axis_move(Axis(0), 0)
    } else {
        field
    };
    field
        .into_dimensionality::<Ix3>()
        .map_err(|_| FieldError::ShapeMismatch { shape })
}

/// Borrows any `f32` array as a squeezed 3D view.
pub(crate) fn view3<S, D>(field: &ArrayBase<S, D>) -> Result<ArrayView3<'_, Value>>
where
    S: Data<Elem = Value>,
    D: Dimension,
{
    squeeze_field(field.view().into_dyn())
}

/// Cell predicate used to build a selection mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection {
    /// Cells with `value <= threshold`. NaN is never selected.
    AtMost(Value),
    /// Cells holding a finite value; infinities and NaN mark "no data".
    Finite,
}

impl Selection {
    #[inline]
    pub fn selects(&self, value: Value) -> bool {
        match *self {
            Selection::AtMost(threshold) => value <= threshold,
            Selection::Finite => value.is_finite(),
        }
    }

    /// Evaluates the predicate for every cell, keeping the field's shape and axis order.
    pub fn mask(&self, field: &ArrayView3<'_, Value>) -> VoxelVolume {
        field.mapv(|v| self.selects(v))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array, Array3, Array4, IxDyn};

    use super::*;

    #[test]
    fn bare_3d_field_passes_through() {
        let field = Array3::<Value>::zeros((2, 3, 4));
        let view = view3(&field).unwrap();
        assert_eq!(view.dim(), (2, 3, 4));
    }

    #[test]
    fn leading_singleton_axis_is_squeezed() {
        let field = Array4::<Value>::from_elem((1, 2, 3, 4), 7.0);
        let view = view3(&field).unwrap();
        assert_eq!(view.dim(), (2, 3, 4));
        assert_eq!(view[[1, 2, 3]], 7.0);
    }

    #[test]
    fn batched_field_with_several_items_is_rejected() {
        let field = Array4::<Value>::zeros((2, 2, 2, 2));
        assert_eq!(
            view3(&field).unwrap_err(),
            FieldError::ShapeMismatch {
                shape: vec![2, 2, 2, 2]
            }
        );
    }

    #[test]
    fn wrong_rank_is_rejected() {
        let flat = Array::<Value, _>::zeros(IxDyn(&[8]));
        assert!(matches!(
            view3(&flat),
            Err(FieldError::ShapeMismatch { .. })
        ));

        let deep = Array::<Value, _>::zeros(IxDyn(&[1, 1, 2, 2, 2]));
        assert!(view3(&deep).is_err());
    }

    #[test]
    fn threshold_selection_is_inclusive_and_skips_nan() {
        let sel = Selection::AtMost(0.5);
        assert!(sel.selects(0.5));
        assert!(sel.selects(Value::NEG_INFINITY));
        assert!(!sel.selects(0.51));
        assert!(!sel.selects(Value::NAN));
    }

    #[test]
    fn finite_selection_rejects_infinities_and_nan() {
        let sel = Selection::Finite;
        assert!(sel.selects(-3.0));
        assert!(!sel.selects(Value::INFINITY));
        assert!(!sel.selects(Value::NEG_INFINITY));
        assert!(!sel.selects(Value::NAN));
    }

    #[test]
    fn mask_keeps_field_shape() {
        let mut field = Array3::<Value>::from_elem((2, 3, 4), Value::INFINITY);
        field[[1, 0, 2]] = 0.25;
        let mask = Selection::Finite.mask(&field.view());
        assert_eq!(mask.dim(), (2, 3, 4));
        assert_eq!(mask.iter().filter(|&&b| b).count(), 1);
        assert!(mask[[1, 0, 2]]);
    }
}
