//! Triangle meshes produced by the fitting engine and stored in the scene.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::projection::build_tangent_space;

/// Indexed triangle mesh. Triangles wind counter-clockwise seen from the
/// side their normal points to.
///
/// Deserialized meshes are checked with [`MeshData::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshDataRepr")]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

#[derive(Deserialize)]
struct MeshDataRepr {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

/// A mesh whose triangles cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("Triangle {triangle} references vertex {index} of {vertex_count}")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl TryFrom<MeshDataRepr> for MeshData {
    type Error = MeshError;

    fn try_from(repr: MeshDataRepr) -> Result<Self, Self::Error> {
        let mesh = Self::new(repr.positions, repr.triangles);
        mesh.validate()?;
        Ok(mesh)
    }
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            triangles,
        }
    }

    /// Check that every triangle index names an existing vertex
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.positions.len();
        for (triangle, indices) in self.triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Get the number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get the vertex positions for a triangle
    pub fn triangle_positions(&self, tri_index: usize) -> (Vec3, Vec3, Vec3) {
        let [i0, i1, i2] = self.triangles[tri_index];
        (
            self.positions[i0 as usize],
            self.positions[i1 as usize],
            self.positions[i2 as usize],
        )
    }

    /// Unit normal of a triangle (zero for degenerate triangles)
    pub fn face_normal(&self, tri_index: usize) -> Vec3 {
        let (v0, v1, v2) = self.triangle_positions(tri_index);
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }

    /// Total surface area
    pub fn area(&self) -> f32 {
        (0..self.triangle_count())
            .map(|i| {
                let (v0, v1, v2) = self.triangle_positions(i);
                (v1 - v0).cross(v2 - v0).length() * 0.5
            })
            .sum()
    }

    /// Axis-aligned bounds, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Whether every edge is shared by exactly two triangles with opposite winding
    pub fn is_closed(&self) -> bool {
        use std::collections::HashMap;

        let mut edges: HashMap<(u32, u32), i32> = HashMap::new();
        for tri in &self.triangles {
            for k in 0..3 {
                let (a, b) = (tri[k], tri[(k + 1) % 3]);
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += if a < b { 1 } else { -1 };
            }
        }
        !edges.is_empty() && edges.values().all(|&balance| balance == 0)
    }

    /// Two-triangle quad centred on `center` spanning `center ± a ± b`.
    /// The face normal is `a × b`.
    pub fn quad(center: Vec3, a: Vec3, b: Vec3) -> Self {
        Self::new(
            vec![
                center - a - b,
                center + a - b,
                center + a + b,
                center - a + b,
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    /// Square of side `size` facing along `normal`
    pub fn square(center: Vec3, normal: Vec3, size: f32) -> Self {
        let (t, b, _) = build_tangent_space(normal, None);
        Self::quad(center, t * (size * 0.5), b * (size * 0.5))
    }

    /// Axis-aligned cube with outward facing triangles
    pub fn cube(center: Vec3, half_size: f32) -> Self {
        // (normal, u, v) with u × v = normal
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let mut mesh = Self::default();
        for (normal, u, v) in faces {
            let quad = Self::quad(center + normal * half_size, u * half_size, v * half_size);
            mesh.append(&quad);
        }
        mesh
    }

    /// Append another mesh, offsetting its indices
    pub fn append(&mut self, other: &MeshData) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|[a, b, c]| [a + base, b + base, c + base]),
        );
    }
}
