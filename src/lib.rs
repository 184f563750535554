pub mod axes;
pub mod colormap;
pub mod error;
pub mod field;
pub mod interp;
pub mod mesh;
pub mod plugin;
pub mod points;
pub mod sampler;
pub mod types;
pub mod utils;
pub mod view;
pub mod voxels;

pub use plugin::FieldViewPlugin;
pub use points::{extract_boundary_points, extract_finite_points};
pub use sampler::{FieldSampler, ViewKind};
pub use view::FieldView;
pub use voxels::{extract_boundary_voxels, extract_finite_voxels};
