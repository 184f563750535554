use std::sync::Arc;

use bevy::prelude::*;
use ndarray::ArrayViewD;

use crate::{
    error::Result,
    field::squeeze_field,
    sampler::ViewKind,
    types::{CellFunction, Point, ScalarField3D, Value},
};

/// A scalar field shown as one figure.
///
/// The field is indexed `[x, y, z]` and wrapped in an [`Arc`] so the async
/// sampling task can hold it without copying.
///
/// ```rust,ignore
/// commands.spawn((
///     FieldView::new(sdf).with_kind(ViewKind::FinitePoints),
///     Name::new("Finite SDF"),
/// ));
/// ```
#[derive(Component)]
#[require(Transform)]
pub struct FieldView {
    pub kind: ViewKind,
    pub field: Arc<ScalarField3D>,
}

impl FieldView {
    pub fn new(field: ScalarField3D) -> Self {
        Self::from_arc(Arc::new(field))
    }

    /// Shares a field that is already displayed elsewhere, e.g. as points and as voxels.
    pub fn from_arc(field: Arc<ScalarField3D>) -> Self {
        Self {
            kind: ViewKind::default(),
            field,
        }
    }

    /// Copies a batched `(1, nx, ny, nz)` or plain `(nx, ny, nz)` array into a view.
    pub fn from_batched(field: ArrayViewD<'_, Value>) -> Result<Self> {
        Ok(Self::new(squeeze_field(field)?.to_owned()))
    }

    /// Creates a `(nx, ny, nz)` field by evaluating `function` at every cell index.
    pub fn from_fn(dims: (usize, usize, usize), function: &CellFunction) -> Self {
        let field = ScalarField3D::from_shape_fn(dims, |(x, y, z)| {
            function(Point::new(x as Value, y as Value, z as Value))
        });
        Self::new(field)
    }

    pub fn with_kind(mut self, kind: ViewKind) -> Self {
        self.kind = kind;
        self
    }

    /// Figure title used when the entity has no [`Name`].
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn dim(&self) -> (usize, usize, usize) {
        self.field.dim()
    }

    /// Returns the value at cell `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Value {
        self.field[[x, y, z]]
    }

    /// Sets the value at cell `(x, y, z)`.
    ///
    /// If the Arc is shared this clones the field first (copy-on-write).
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: Value) {
        Arc::make_mut(&mut self.field)[[x, y, z]] = v;
    }

    /// Calls `f(x, y, z, &mut value)` for every cell, cloning a shared field first.
    pub fn for_each_cell<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, usize, usize, &mut Value),
    {
        for ((x, y, z), value) in Arc::make_mut(&mut self.field).indexed_iter_mut() {
            f(x, y, z, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array4;

    use super::*;

    #[test]
    fn from_fn_evaluates_cell_indices() {
        let view = FieldView::from_fn((2, 3, 4), &|p: Point| p.x + 10.0 * p.y + 100.0 * p.z);
        assert_eq!(view.dim(), (2, 3, 4));
        assert_eq!(view.get(1, 2, 3), 321.0);
    }

    #[test]
    fn set_copies_shared_field() {
        let shared = Arc::new(ScalarField3D::zeros((2, 2, 2)));
        let mut view = FieldView::from_arc(Arc::clone(&shared));
        view.set(0, 1, 0, 4.0);
        assert_eq!(view.get(0, 1, 0), 4.0);
        assert_eq!(shared[[0, 1, 0]], 0.0);
    }

    #[test]
    fn batched_input_is_squeezed() {
        let batched = Array4::<Value>::from_elem((1, 2, 2, 2), 1.5);
        let view = FieldView::from_batched(batched.view().into_dyn()).unwrap();
        assert_eq!(view.dim(), (2, 2, 2));
        assert!(FieldView::from_batched(Array4::<Value>::zeros((2, 2, 2, 2)).view().into_dyn()).is_err());
    }

    #[test]
    fn for_each_cell_visits_everything() {
        let mut view = FieldView::new(ScalarField3D::zeros((2, 2, 2)));
        let mut visited = 0;
        view.for_each_cell(|x, _, _, v| {
            *v = x as Value;
            visited += 1;
        });
        assert_eq!(visited, 8);
        assert_eq!(view.get(1, 0, 1), 1.0);
        assert_eq!(view.title(), "Zero DF");
    }
}
