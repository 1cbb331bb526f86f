//! Ray-mesh intersection for stroke sampling.
//!
//! This module provides ray-triangle intersection using the Moller-Trumbore algorithm
//! and a closest-hit query over a [`MeshData`].

use glam::Vec3;

use crate::mesh::MeshData;

/// Epsilon for floating point comparisons in ray intersection
const EPSILON: f32 = 1e-6;

/// Result of a ray-triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Barycentric coordinate u (weight for vertex 1)
    pub u: f32,
    /// Barycentric coordinate v (weight for vertex 2)
    pub v: f32,
}

/// Moller-Trumbore ray-triangle intersection algorithm.
///
/// Returns the hit distance and barycentric coordinates if the ray intersects
/// the triangle. Both faces are hit.
///
/// # Arguments
/// * `ray_origin` - Origin point of the ray
/// * `ray_dir` - Direction of the ray (should be normalized for consistent t values)
/// * `v0`, `v1`, `v2` - Triangle vertices in counter-clockwise order
pub fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray_dir.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray lies in the plane of the triangle or misses it
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray_origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray_dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;

    // Only accept hits in front of the ray
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Interpolate a Vec3 attribute using barycentric coordinates.
pub fn interpolate_vec3(v0: Vec3, v1: Vec3, v2: Vec3, u: f32, v: f32) -> Vec3 {
    let w = 1.0 - u - v;
    v0 * w + v1 * u + v2 * v
}

/// Closest intersection of a ray with a mesh
#[derive(Debug, Clone, Copy)]
pub struct MeshHit {
    /// Distance along the ray
    pub t: f32,
    /// World position of the hit
    pub position: Vec3,
    /// Geometric normal of the hit triangle (not flipped toward the ray)
    pub normal: Vec3,
    /// Index of the hit triangle
    pub triangle: u32,
}

/// Cast a ray against mesh data and return the closest hit.
///
/// # Arguments
/// * `ray_origin` - Origin of the ray
/// * `ray_dir` - Direction of the ray (should be normalized)
/// * `mesh` - Triangle mesh in the same space as the ray
pub fn raycast_mesh(ray_origin: Vec3, ray_dir: Vec3, mesh: &MeshData) -> Option<MeshHit> {
    let mut closest_hit: Option<(TriangleHit, usize)> = None;

    // Brute force: painted scenes are small
    for tri_idx in 0..mesh.triangle_count() {
        let (v0, v1, v2) = mesh.triangle_positions(tri_idx);

        if let Some(hit) = ray_triangle_intersection(ray_origin, ray_dir, v0, v1, v2) {
            let dominated = match &closest_hit {
                Some((prev, _)) => hit.t >= prev.t,
                None => false,
            };
            if !dominated {
                closest_hit = Some((hit, tri_idx));
            }
        }
    }

    closest_hit.map(|(hit, tri_idx)| {
        let (v0, v1, v2) = mesh.triangle_positions(tri_idx);
        MeshHit {
            t: hit.t,
            position: interpolate_vec3(v0, v1, v2, hit.u, hit.v),
            normal: mesh.face_normal(tri_idx),
            triangle: tri_idx as u32,
        }
    })
}
