//! Light factory
//!
//! Turns fitted shapes into the lights, skies and helper meshes the
//! operators create.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};
use lightpaint_config::PaintConfig;
use lightpaint_ipc::{LampType, NormalMethod, VisibilityParams};
use tracing::debug;

use crate::constants::{CONVEX_OBJECT_NAME, EPSILON, FLAG_OBJECT_NAME, TUBE_OBJECT_NAME};
use crate::fitting::{average_normal, centroid, sweep_tube, FittedGeometry, FittedShape};
use crate::mesh::MeshData;
use crate::projection::build_tangent_space;
use crate::rotation::{euler_to_quat, facing_rotation};
use crate::types::{
    HitPoint, LightFactors, LightShape, LightSpec, MeshObjectSpec, MeshRole, RayVisibility,
    SkySpec, Transform, WorldVisibility,
};

/// Build a light `offset` units off the fitted surface, facing back at it.
pub fn build_lamp(
    shape: &FittedShape,
    lamp_type: LampType,
    offset: f32,
    visibility: VisibilityParams,
    config: &PaintConfig,
) -> LightSpec {
    let location = shape.anchor + shape.normal * offset;
    let outward = if offset < 0.0 {
        -shape.normal
    } else {
        shape.normal
    };
    let rotation = facing_rotation(outward);
    let transform = Transform::new(location, rotation);

    let light_shape = match lamp_type {
        LampType::Point => LightShape::Point {
            radius: config.point_radius,
        },
        LampType::Spot => LightShape::Spot {
            radius: config.point_radius,
            spot_size: spot_size(shape, &transform, config),
            blend: config.spot_blend,
        },
        LampType::Area => {
            let q = euler_to_quat(rotation);
            let size = shape
                .extents_along(q * Vec3::X, q * Vec3::Y)
                .max(Vec2::splat(config.min_extent));
            LightShape::Area { size }
        }
    };

    let visibility = RayVisibility::from(visibility);
    debug!(
        "Built {:?} lamp at {:?} rotation {:?}",
        lamp_type, location, rotation
    );

    LightSpec {
        shape: light_shape,
        transform,
        visibility,
        factors: LightFactors::from_visibility(visibility),
    }
}

/// Cone angle wide enough to cover every fitted point
fn spot_size(shape: &FittedShape, transform: &Transform, config: &PaintConfig) -> f32 {
    let forward = transform.forward();
    let widest = shape
        .points
        .iter()
        .filter_map(|p| (*p - transform.location).try_normalize())
        .map(|dir| forward.dot(dir).clamp(-1.0, 1.0).acos())
        .fold(0.0f32, f32::max);

    (2.0 * widest).clamp(config.min_spot_size, PI)
}

/// Build a sky whose sun sits along the painted surface normal.
///
/// An empty hit set or cancelling normals fall back to `fallback_normal`.
pub fn build_sky(
    hits: &[HitPoint],
    method: NormalMethod,
    fallback_normal: Vec3,
    visibility: VisibilityParams,
    config: &PaintConfig,
) -> SkySpec {
    let direction = match method {
        NormalMethod::Average => average_normal(hits, fallback_normal),
        NormalMethod::Center => center_normal(hits)
            .and_then(Vec3::try_normalize)
            .or_else(|| fallback_normal.try_normalize())
            .unwrap_or(Vec3::Z),
    };

    let sun_elevation = direction.z.clamp(-1.0, 1.0).asin();
    let sun_rotation = wrap_angle(direction.y.atan2(direction.x) - FRAC_PI_2);
    debug!(
        "Built sky: direction={:?} elevation={} rotation={}",
        direction, sun_elevation, sun_rotation
    );

    SkySpec {
        sun_direction: direction,
        sun_elevation,
        sun_rotation,
        strength: config.sky_strength,
        visibility: WorldVisibility::from(visibility),
    }
}

/// Normal of the hit closest to the centroid of all hits
fn center_normal(hits: &[HitPoint]) -> Option<Vec3> {
    let positions: Vec<Vec3> = hits.iter().map(|h| h.position).collect();
    let center = centroid(&positions);
    hits.iter()
        .min_by(|a, b| {
            a.position
                .distance_squared(center)
                .total_cmp(&b.position.distance_squared(center))
        })
        .map(|h| h.normal)
}

/// Wrap an angle to (-π, π]
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Fitted mesh, or a `min_extent` square when the fit collapsed to a point
fn fitted_mesh(shape: &FittedShape, config: &PaintConfig) -> MeshData {
    shape
        .geometry
        .mesh()
        .cloned()
        .unwrap_or_else(|| MeshData::square(shape.anchor, shape.normal, config.min_extent))
}

/// Emissive convex hull object
pub fn build_hull_mesh(shape: &FittedShape, config: &PaintConfig) -> MeshObjectSpec {
    MeshObjectSpec {
        name: CONVEX_OBJECT_NAME.to_string(),
        mesh: fitted_mesh(shape, config),
        role: MeshRole::Emitter {
            strength: config.emission_strength,
        },
    }
}

/// Emissive tube object
pub fn build_tube_mesh(shape: &FittedShape, config: &PaintConfig) -> MeshObjectSpec {
    let mesh = match &shape.geometry {
        FittedGeometry::Tube(mesh) => mesh.clone(),
        _ => sweep_tube(
            &shape.points,
            shape.normal,
            config.tube_radius,
            config.tube_sides(),
            config.min_extent,
        ),
    };
    MeshObjectSpec {
        name: TUBE_OBJECT_NAME.to_string(),
        mesh,
        role: MeshRole::Emitter {
            strength: config.emission_strength,
        },
    }
}

/// Occluding card between a light and the fitted surface.
///
/// The card sits `flag_distance` of the way from the light to the anchor,
/// perpendicular to that axis, and covers the shadow the fitted points
/// would cast onto its plane, enlarged by `flag_margin`. It faces the light.
pub fn build_flag(shape: &FittedShape, light_location: Vec3, config: &PaintConfig) -> MeshObjectSpec {
    let to_anchor = shape.anchor - light_location;
    let distance = to_anchor.length();
    let axis = to_anchor.try_normalize().unwrap_or(-shape.normal);
    let depth = distance * config.flag_fraction();
    let plane_center = light_location + axis * depth;
    let up = if axis.cross(Vec3::Z).length_squared() > EPSILON {
        Vec3::Z
    } else {
        Vec3::X
    };
    let (u, v, _) = build_tangent_space(axis, Some(up));

    // Central projection of each point from the light onto the card plane
    let projected: Vec<Vec2> = shape
        .points
        .iter()
        .filter_map(|p| {
            let offset = *p - light_location;
            let along = offset.dot(axis);
            (along > EPSILON).then(|| {
                let on_plane = light_location + offset * (depth / along) - plane_center;
                Vec2::new(on_plane.dot(u), on_plane.dot(v))
            })
        })
        .collect();

    let (min, max) = match projected.first() {
        Some(&first) => projected
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        None => (Vec2::ZERO, Vec2::ZERO),
    };
    let mid = (min + max) * 0.5;
    let half = ((max - min) * 0.5 * config.flag_margin).max(Vec2::splat(config.min_extent * 0.5));
    let center = plane_center + u * mid.x + v * mid.y;

    debug!(
        "Built flag at {:?}, {} x {}",
        center,
        half.x * 2.0,
        half.y * 2.0
    );

    MeshObjectSpec {
        name: FLAG_OBJECT_NAME.to_string(),
        // v × u = -axis, so the card faces the light
        mesh: MeshData::quad(center, v * half.y, u * half.x),
        role: MeshRole::Occluder,
    }
}
