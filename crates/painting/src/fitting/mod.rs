//! Fitting engine
//!
//! Summarizes the hits of one stroke as a [`FittedShape`]: an anchor point,
//! a representative surface normal and, depending on the [`FitMode`], a
//! convex hull or tube mesh around the hit positions.
//!
//! Fitting never fails on degenerate input. Point sets that span no volume
//! collapse to flat or point shapes instead.

mod hull;
mod tube;

pub use hull::convex_hull;
pub use tube::sweep_tube;

use glam::{Vec2, Vec3};
use lightpaint_config::PaintConfig;
use tracing::debug;

use crate::mesh::MeshData;
use crate::types::HitPoint;

/// How the hit positions are summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Closed convex hull (or a flat/point fallback)
    ConvexHull,
    /// Tube swept along the ordered hit path
    Tube,
    /// Anchor and normal only
    Centroid,
}

/// Geometry attached to a fitted shape
#[derive(Debug, Clone, PartialEq)]
pub enum FittedGeometry {
    /// A single distinct position
    Point,
    /// Collinear or coplanar positions: a one-sided polygon facing the normal
    Flat(MeshData),
    /// Closed convex hull
    Hull(MeshData),
    /// Closed tube
    Tube(MeshData),
}

impl FittedGeometry {
    /// The mesh, unless the shape collapsed to a point
    pub fn mesh(&self) -> Option<&MeshData> {
        match self {
            FittedGeometry::Point => None,
            FittedGeometry::Flat(mesh) | FittedGeometry::Hull(mesh) | FittedGeometry::Tube(mesh) => {
                Some(mesh)
            }
        }
    }
}

/// Geometric summary of a set of hits
#[derive(Debug, Clone, PartialEq)]
pub struct FittedShape {
    /// Centroid of the hit positions
    pub anchor: Vec3,
    /// Unit representative normal
    pub normal: Vec3,
    /// Hit positions in stroke order
    pub points: Vec<Vec3>,
    pub geometry: FittedGeometry,
}

impl FittedShape {
    /// Size of the fitted points measured along two axes (max - min of the
    /// projections).
    pub fn extents_along(&self, u: Vec3, v: Vec3) -> Vec2 {
        let span = |axis: Vec3| {
            let (min, max) = self
                .points
                .iter()
                .map(|p| p.dot(axis))
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
                    (lo.min(d), hi.max(d))
                });
            if min.is_finite() {
                max - min
            } else {
                0.0
            }
        };
        Vec2::new(span(u), span(v))
    }
}

/// Arithmetic mean of positions (zero for an empty slice)
pub fn centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    points.iter().copied().sum::<Vec3>() / points.len() as f32
}

/// Normalized mean of the hit normals.
///
/// A mean that cancels out falls back to `fallback`.
pub fn average_normal(hits: &[HitPoint], fallback: Vec3) -> Vec3 {
    let sum: Vec3 = hits.iter().map(|h| h.normal).sum();
    sum.try_normalize()
        .or_else(|| fallback.try_normalize())
        .unwrap_or(Vec3::Z)
}

/// Fit a shape to a set of hits.
///
/// Returns `None` only for an empty hit set.
pub fn fit(
    hits: &[HitPoint],
    mode: FitMode,
    fallback_normal: Vec3,
    config: &PaintConfig,
) -> Option<FittedShape> {
    if hits.is_empty() {
        return None;
    }

    let points: Vec<Vec3> = hits.iter().map(|h| h.position).collect();
    let anchor = centroid(&points);
    let normal = average_normal(hits, fallback_normal);

    let geometry = match mode {
        FitMode::Centroid => FittedGeometry::Point,
        FitMode::ConvexHull => convex_hull(&points, normal, config.min_extent),
        FitMode::Tube => FittedGeometry::Tube(sweep_tube(
            &points,
            normal,
            config.tube_radius,
            config.tube_sides(),
            config.min_extent,
        )),
    };

    debug!(
        "Fitted {} hits ({:?}): anchor={:?} normal={:?}",
        hits.len(),
        mode,
        anchor,
        normal
    );

    Some(FittedShape {
        anchor,
        normal,
        points,
        geometry,
    })
}
