use nalgebra::{Point3, Vector3};
use ndarray::Array3;

/// Scalar field value at a grid cell.
pub type Value = f32;

/// A 3D point with [`Value`] components.
pub type Point = Point3<Value>;

/// A 3D vector with [`Value`] components.
pub type Vector = Vector3<Value>;

/// An RGBA color with components in `[0, 1]`.
pub type Rgba = [Value; 4];

/// Integer grid coordinates `[x, y, z]` of a single cell.
pub type Cell = [usize; 3];

/// A dense distance field or signed distance field, indexed `[x, y, z]`.
pub type ScalarField3D = Array3<Value>;

/// A dense occupancy volume, one flag per cell.
pub type VoxelVolume = Array3<bool>;

/// A scalar field function: maps a cell position to a [`Value`].
pub type CellFunction = dyn Fn(Point) -> Value + Sync;
