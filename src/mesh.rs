use bevy::prelude::Component;

use crate::{
    axes::AxisConvention,
    error::{FieldError, Result},
    sampler::SampledView,
    types::{Point, Rgba, Value, Vector},
    utils::{CUBE_FACES, get_corner_positions, voxel_center},
};

/// Color of solid voxels, which carry no per-cell value.
pub const VOXEL_COLOR: Rgba = [0.122, 0.467, 0.706, 1.0];

/// Intermediate mesh made of independent, flat-shaded cubes.
///
/// Every cube contributes 24 vertices (4 per face) so that each face keeps its own
/// normal and the cube's color.
#[derive(Clone, Default)]
pub struct CubeMesh {
    /// Vertex positions: `[[x, y, z], ...]`
    pub vertices: Vec<Point>,

    /// Per-vertex face normals.
    pub normals: Vec<[Value; 3]>,

    /// Per-vertex colors.
    pub colors: Vec<Rgba>,

    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl CubeMesh {
    /// Creates an empty mesh with room for `cubes` cubes.
    pub fn with_capacity(cubes: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(cubes * 24),
            normals: Vec::with_capacity(cubes * 24),
            colors: Vec::with_capacity(cubes * 24),
            indices: Vec::with_capacity(cubes * 36),
        }
    }

    /// Number of cubes pushed so far.
    pub fn cube_count(&self) -> usize {
        self.vertices.len() / 24
    }

    /// Appends an axis-aligned cube of edge `size` centred on `center`.
    ///
    /// Returns [`FieldError::MeshTooLarge`] once the vertex count no longer fits
    /// in a `u32` index, leaving the mesh unchanged.
    pub fn push_cube(&mut self, center: Point, size: Value, color: Rgba) -> Result<()> {
        let first = index_base(self.vertices.len())?;
        index_base(self.vertices.len() + 24)?;

        let corners = get_corner_positions(center, size);
        for (face, (quad, normal)) in CUBE_FACES.into_iter().enumerate() {
            let base = first + 4 * face as u32;
            for corner in quad {
                self.vertices.push(corners[corner]);
                self.normals.push(normal);
                self.colors.push(color);
            }
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Ok(())
    }

    /// Computes the face normal of triangle `tri` from its vertex positions.
    ///
    /// Returns the zero vector if the triangle is degenerate.
    pub fn tri_normal(&self, tri: usize) -> Vector {
        let a = self.vertices[self.indices[3 * tri] as usize];
        let b = self.vertices[self.indices[3 * tri + 1] as usize];
        let c = self.vertices[self.indices[3 * tri + 2] as usize];

        let cross = (b - a).cross(&(c - b));
        let nrm = cross.norm();
        if nrm == 0.0 {
            Vector::zeros()
        } else {
            cross / nrm
        }
    }

    /// Converts into the buffers handed to Bevy.
    ///
    /// Returns [`FieldError::EmptyMesh`] when no cube was pushed.
    pub fn build(self) -> Result<GeneratedMesh> {
        if self.vertices.is_empty() {
            return Err(FieldError::EmptyMesh);
        }
        Ok(GeneratedMesh {
            vertices: self.vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            normals: self.normals,
            colors: self.colors,
            indices: self.indices,
        })
    }
}

/// Converts a vertex count into the next `u32` index.
fn index_base(vertices: usize) -> Result<u32> {
    u32::try_from(vertices).map_err(|_| FieldError::MeshTooLarge { vertices })
}

/// Mesh buffers for one sampled field, ready to upload.
///
/// Inserted on the view entity once its async sampling task finishes, removed again
/// when the buffers are moved into a Bevy [`Mesh`](bevy::prelude::Mesh).
#[derive(Component, Clone, Debug, Default)]
pub struct GeneratedMesh {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

/// Builds cube geometry for a sampled view.
///
/// Points become cubes of edge `point_size` placed at their reordered grid
/// coordinates. Voxel volumes are already reordered, so each set voxel becomes a
/// unit cube filling its cell.
pub fn build_view_mesh(
    view: &SampledView,
    convention: AxisConvention,
    point_size: Value,
) -> Result<GeneratedMesh> {
    match view {
        SampledView::Points { points, colors } => {
            let mut mesh = CubeMesh::with_capacity(points.len());
            for ((cell, _), &color) in points.iter().zip(colors) {
                mesh.push_cube(convention.apply_point(cell), point_size, color)?;
            }
            mesh.build()
        }
        SampledView::Voxels(volume) => {
            let filled = volume.iter().filter(|&&b| b).count();
            let mut mesh = CubeMesh::with_capacity(filled);
            for ((a, b, c), _) in volume.indexed_iter().filter(|(_, set)| **set) {
                mesh.push_cube(voxel_center([a, b, c]), 1.0, VOXEL_COLOR)?;
            }
            mesh.build()
        }
    }
}
