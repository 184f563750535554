use derive_more::Display;

pub type Result<T> = core::result::Result<T, FieldError>;

#[derive(Debug, Display, PartialEq, Eq)]
#[display("{self:?}")]
pub enum FieldError {
    /// The input is not 3D after removing an optional leading axis of length 1.
    ShapeMismatch { shape: Vec<usize> },
    /// Nothing was selected, so there is no geometry to build.
    EmptyMesh,
    /// The mesh needs more vertices than `u32` indices can address.
    MeshTooLarge { vertices: usize },
}

impl std::error::Error for FieldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_displays_offending_shape() {
        let err = FieldError::ShapeMismatch {
            shape: vec![2, 2, 2, 2],
        };
        assert_eq!(err.to_string(), "ShapeMismatch { shape: [2, 2, 2, 2] }");
    }
}
