//! Convex hull of stroke hit positions.
//!
//! Volumetric point sets get an incremental 3D hull. Sets that span fewer
//! dimensions collapse: one distinct point, a thin strip along a line, or a
//! flat convex polygon in a plane.

use std::collections::HashSet;

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::constants::{EPSILON, HULL_RELATIVE_TOLERANCE};
use crate::mesh::MeshData;
use crate::rotation::orthogonal;

use super::FittedGeometry;

/// Hull of `points`. `normal` orients flat fallbacks; `min_extent` is the
/// width of the collinear strip.
pub fn convex_hull(points: &[Vec3], normal: Vec3, min_extent: f32) -> FittedGeometry {
    let Some(tolerance) = tolerance(points) else {
        return FittedGeometry::Point;
    };

    let p0 = points[0];
    let i1 = farthest(points, |p| p.distance(p0));
    let p1 = points[i1];
    if p1.distance(p0) <= tolerance {
        return FittedGeometry::Point;
    }

    let axis = (p1 - p0).normalize();
    let i2 = farthest(points, |p| (p - p0).reject_from_normalized(axis).length());
    let p2 = points[i2];
    if (p2 - p0).reject_from_normalized(axis).length() <= tolerance {
        debug!("Hull input is collinear, building strip");
        return FittedGeometry::Flat(strip(points, p0, axis, normal, min_extent));
    }

    let plane_normal = (p1 - p0).cross(p2 - p0).normalize();
    let i3 = farthest(points, |p| (p - p0).dot(plane_normal).abs());
    if (points[i3] - p0).dot(plane_normal).abs() <= tolerance {
        debug!("Hull input is coplanar, building polygon");
        return FittedGeometry::Flat(polygon(points, p0, axis, plane_normal, normal));
    }

    FittedGeometry::Hull(hull_3d(points, [0, i1, i2, i3], tolerance))
}

/// Distance below which points are considered coincident, scaled by the
/// size of the set. `None` for an empty slice.
fn tolerance(points: &[Vec3]) -> Option<f32> {
    let first = *points.first()?;
    let (min, max) = points
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    let scale = (max - min).length().max(max.abs().max_element()).max(1.0);
    Some((scale * HULL_RELATIVE_TOLERANCE).max(EPSILON))
}

fn farthest(points: &[Vec3], distance: impl Fn(Vec3) -> f32) -> usize {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, distance(*p)))
        .fold((0, f32::NEG_INFINITY), |best, (i, d)| if d > best.1 { (i, d) } else { best })
        .0
}

/// Thin quad covering collinear points, facing `normal` as far as possible
fn strip(points: &[Vec3], origin: Vec3, axis: Vec3, normal: Vec3, width: f32) -> MeshData {
    let (lo, hi) = points
        .iter()
        .map(|p| (*p - origin).dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), t| (lo.min(t), hi.max(t)));

    let side = normal
        .cross(axis)
        .try_normalize()
        .unwrap_or_else(|| orthogonal(axis).normalize());
    let center = origin + axis * ((lo + hi) * 0.5);

    MeshData::quad(center, axis * ((hi - lo) * 0.5), side * (width * 0.5))
}

/// Fan-triangulated convex polygon of coplanar points
fn polygon(points: &[Vec3], origin: Vec3, axis: Vec3, plane_normal: Vec3, normal: Vec3) -> MeshData {
    let n = if plane_normal.dot(normal) < 0.0 {
        -plane_normal
    } else {
        plane_normal
    };
    let u = axis;
    let v = n.cross(u);

    let projected: Vec<Vec2> = points
        .iter()
        .map(|p| {
            let d = *p - origin;
            Vec2::new(d.dot(u), d.dot(v))
        })
        .collect();

    let ring = monotone_chain(&projected);
    let positions: Vec<Vec3> = ring.iter().map(|&i| points[i]).collect();
    let triangles = (1..positions.len().saturating_sub(1))
        .map(|i| [0, i as u32, i as u32 + 1])
        .collect();

    MeshData::new(positions, triangles)
}

/// Andrew's monotone chain; indices of the hull in counter-clockwise order
fn monotone_chain(points: &[Vec2]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .x
            .total_cmp(&points[b].x)
            .then(points[a].y.total_cmp(&points[b].y))
    });

    let cross = |o: usize, a: usize, b: usize| (points[a] - points[o]).perp_dot(points[b] - points[o]);

    let mut lower: Vec<usize> = Vec::new();
    for &i in &order {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], i) <= 0.0 {
            lower.pop();
        }
        lower.push(i);
    }

    let mut upper: Vec<usize> = Vec::new();
    for &i in order.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], i) <= 0.0 {
            upper.pop();
        }
        upper.push(i);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[derive(Debug, Clone, Copy)]
struct Face {
    v: [usize; 3],
    normal: Vec3,
    offset: f32,
}

impl Face {
    fn new(points: &[Vec3], v: [usize; 3]) -> Self {
        let [a, b, c] = v.map(|i| points[i]);
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            v,
            normal,
            offset: normal.dot(a),
        }
    }

    fn distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) - self.offset
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

/// Incremental hull starting from a non-degenerate tetrahedron
fn hull_3d(points: &[Vec3], seed: [usize; 4], tolerance: f32) -> MeshData {
    let [a, b, c, d] = seed;
    let inside = (points[a] + points[b] + points[c] + points[d]) * 0.25;

    let mut faces: Vec<Face> = [[a, b, c], [a, c, d], [a, d, b], [b, d, c]]
        .into_iter()
        .map(|v| {
            let face = Face::new(points, v);
            if face.distance(inside) > 0.0 {
                Face::new(points, [v[0], v[2], v[1]])
            } else {
                face
            }
        })
        .collect();

    for (i, &p) in points.iter().enumerate() {
        if seed.contains(&i) {
            continue;
        }

        let (visible, hidden): (Vec<Face>, Vec<Face>) =
            faces.iter().partition(|f| f.distance(p) > tolerance);
        if visible.is_empty() {
            continue;
        }

        let edges: Vec<(usize, usize)> = visible.iter().flat_map(|f| f.edges()).collect();
        let visible_edges: HashSet<(usize, usize)> = edges.iter().copied().collect();
        faces = hidden;
        for &(from, to) in &edges {
            if !visible_edges.contains(&(to, from)) {
                faces.push(Face::new(points, [from, to, i]));
            }
        }
    }

    // Keep only referenced vertices, in first-use order
    let mut remap = vec![u32::MAX; points.len()];
    let mut positions = Vec::new();
    let triangles = faces
        .iter()
        .map(|face| {
            face.v.map(|index| {
                if remap[index] == u32::MAX {
                    remap[index] = positions.len() as u32;
                    positions.push(points[index]);
                }
                remap[index]
            })
        })
        .collect();

    debug!("Built convex hull with {} faces", faces.len());
    MeshData::new(positions, triangles)
}
