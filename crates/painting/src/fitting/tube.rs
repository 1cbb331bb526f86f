//! Tube sweep along an ordered stroke path.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::constants::EPSILON;
use crate::mesh::MeshData;
use crate::projection::build_tangent_space;
use crate::rotation::rotation_between;

/// Sweep a circular cross-section along `path` and cap both ends.
///
/// Frames are parallel-transported from the first segment, whose frame is
/// seeded from `normal`. Consecutive duplicate points are skipped; a path
/// with a single distinct point becomes a segment of length `min_extent`
/// along `normal`.
pub fn sweep_tube(
    path: &[Vec3],
    normal: Vec3,
    radius: f32,
    sides: usize,
    min_extent: f32,
) -> MeshData {
    let mut centers: Vec<Vec3> = Vec::with_capacity(path.len());
    for &p in path {
        if centers.last().map_or(true, |last| last.distance(p) > EPSILON) {
            centers.push(p);
        }
    }
    let Some(&first) = centers.first() else {
        return MeshData::default();
    };
    if centers.len() == 1 {
        centers.push(first + normal.normalize_or(Vec3::Z) * min_extent);
    }

    let tangents = tangents(&centers);
    let sides = sides.max(3);

    let (mut u, _, _) = build_tangent_space(tangents[0], Some(normal));
    let mut positions = Vec::with_capacity(centers.len() * sides + 2);
    for (i, (&center, &t)) in centers.iter().zip(&tangents).enumerate() {
        if i > 0 {
            u = rotation_between(tangents[i - 1], t) * u;
            u = u.reject_from_normalized(t).normalize_or(u);
        }
        let v = t.cross(u);
        positions.extend((0..sides).map(|k| {
            let angle = TAU * k as f32 / sides as f32;
            center + (u * angle.cos() + v * angle.sin()) * radius
        }));
    }

    let ring = |i: usize, k: usize| (i * sides + k % sides) as u32;
    let mut triangles = Vec::with_capacity(2 * sides * centers.len());
    for i in 0..centers.len() - 1 {
        for k in 0..sides {
            let (a, b) = (ring(i, k), ring(i, k + 1));
            let (c, d) = (ring(i + 1, k + 1), ring(i + 1, k));
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }

    let start = positions.len() as u32;
    positions.push(centers[0]);
    let end = positions.len() as u32;
    positions.push(centers[centers.len() - 1]);
    let last = centers.len() - 1;
    for k in 0..sides {
        triangles.push([start, ring(0, k + 1), ring(0, k)]);
        triangles.push([end, ring(last, k), ring(last, k + 1)]);
    }

    MeshData::new(positions, triangles)
}

/// Unit tangent at each path point: central differences inside, one-sided
/// at the ends.
fn tangents(centers: &[Vec3]) -> Vec<Vec3> {
    let n = centers.len();
    (0..n)
        .map(|i| {
            let incoming = (i > 0).then(|| centers[i] - centers[i - 1]);
            let outgoing = (i + 1 < n).then(|| centers[i + 1] - centers[i]);
            let central = match (incoming, outgoing) {
                (Some(a), Some(b)) => a.normalize_or_zero() + b.normalize_or_zero(),
                (Some(a), None) | (None, Some(a)) => a,
                (None, None) => Vec3::Z,
            };
            central
                .try_normalize()
                .or_else(|| incoming.and_then(Vec3::try_normalize))
                .unwrap_or(Vec3::Z)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_tube() {
        let path = [Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)];
        let mesh = sweep_tube(&path, Vec3::X, 0.5, 8, 0.01);
        assert_eq!(mesh.positions.len(), 2 * 8 + 2);
        assert_eq!(mesh.triangle_count(), 2 * 8 + 2 * 8);
        assert!(mesh.is_closed());

        // Ring vertices sit at the radius
        for p in &mesh.positions[..16] {
            assert!((p.truncate().length() - 0.5).abs() < 1e-5);
        }

        // Side faces point away from the axis
        for i in 0..16 {
            let (v0, v1, v2) = mesh.triangle_positions(i);
            let center = (v0 + v1 + v2) / 3.0;
            assert!(mesh.face_normal(i).dot(center.with_z(0.0)) > 0.0);
        }
    }

    #[test]
    fn test_caps_face_outward() {
        let path = [Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)];
        let mesh = sweep_tube(&path, Vec3::X, 0.5, 6, 0.01);
        let caps = 2 * 6;
        let start_cap = mesh.face_normal(caps);
        let end_cap = mesh.face_normal(caps + 1);
        assert!((start_cap - Vec3::NEG_Z).length() < 1e-5);
        assert!((end_cap - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_bent_path_stays_closed() {
        let path = [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];
        let mesh = sweep_tube(&path, Vec3::Z, 0.05, 8, 0.01);
        assert!(mesh.is_closed());
        assert_eq!(mesh.positions.len(), 4 * 8 + 2);
    }

    #[test]
    fn test_single_point_extends_along_normal() {
        let path = [Vec3::ONE, Vec3::ONE];
        let mesh = sweep_tube(&path, Vec3::Y, 0.05, 4, 0.01);
        let (min, max) = mesh.bounds().unwrap();
        assert!((max.y - min.y - 0.01).abs() < 1e-5);
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_min_sides() {
        let path = [Vec3::ZERO, Vec3::X];
        let mesh = sweep_tube(&path, Vec3::Z, 0.1, 1, 0.01);
        assert_eq!(mesh.positions.len(), 2 * 3 + 2);
    }
}
