//! Adjustment engine: repositions an existing light.

use glam::Vec3;
use lightpaint_ipc::AxisMode;
use tracing::debug;

use crate::error::LightPaintError;
use crate::rotation::facing_rotation;
use crate::types::{CameraData, HitPoint, Transform};

/// New transform for a light moved according to `axis`.
///
/// World axes place the light at `axis * offset` looking at the origin.
/// `Normal` and `Reflect` use the hit closest to the light's current
/// location; `Reflect` mirrors the camera's view ray about the hit normal.
/// Only location and rotation are produced, and nothing is mutated here.
pub fn adjust(
    light: &Transform,
    axis: AxisMode,
    offset: f32,
    hits: &[HitPoint],
    camera: Option<&CameraData>,
) -> Result<Transform, LightPaintError> {
    let transform = match axis {
        AxisMode::X => along_world_axis(Vec3::X, offset),
        AxisMode::Y => along_world_axis(Vec3::Y, offset),
        AxisMode::Z => along_world_axis(Vec3::Z, offset),
        AxisMode::Normal => {
            let hit = nearest_hit(hits, light.location).ok_or(LightPaintError::MissingSurface { axis })?;
            let normal = hit.normal.normalize_or(Vec3::Z);
            facing_from(hit.position, hit.position + normal * offset, normal)
        }
        AxisMode::Reflect => {
            let camera = camera.ok_or(LightPaintError::NoCamera)?;
            let hit = nearest_hit(hits, light.location).ok_or(LightPaintError::MissingSurface { axis })?;
            let normal = hit.normal.normalize_or(Vec3::Z);
            let incident = (hit.position - camera.transform.location).normalize_or(-normal);
            let reflected = incident - 2.0 * incident.dot(normal) * normal;
            facing_from(hit.position, hit.position + reflected * offset, reflected)
        }
    };

    debug!(
        "Adjusted light along {:?}: {:?} -> {:?}",
        axis, light.location, transform.location
    );
    Ok(transform)
}

fn along_world_axis(axis: Vec3, offset: f32) -> Transform {
    let location = axis * offset;
    Transform::new(location, facing_rotation(location.normalize_or(axis)))
}

/// Place at `location` looking back at `target`
fn facing_from(target: Vec3, location: Vec3, fallback: Vec3) -> Transform {
    let outward = (location - target).normalize_or(fallback);
    Transform::new(location, facing_rotation(outward))
}

fn nearest_hit(hits: &[HitPoint], location: Vec3) -> Option<&HitPoint> {
    hits.iter().min_by(|a, b| {
        a.position
            .distance_squared(location)
            .total_cmp(&b.position.distance_squared(location))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f32 = 1e-4;

    fn assert_vec_near(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).abs().max_element() < TOLERANCE,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn default_light() -> Transform {
        Transform::new(
            Vec3::new(4.0762, 1.0055, 5.9039),
            Vec3::new(0.6503, 0.0552, 1.8664),
        )
    }

    #[test]
    fn test_world_axes() {
        let light = default_light();
        let x = adjust(&light, AxisMode::X, 1.0, &[], None).unwrap();
        assert_vec_near(x.location, Vec3::X);
        assert_vec_near(x.rotation, Vec3::new(0.0, FRAC_PI_2, 0.0));

        let y = adjust(&light, AxisMode::Y, 2.0, &[], None).unwrap();
        assert_vec_near(y.location, Vec3::new(0.0, 2.0, 0.0));
        assert_vec_near(y.rotation, Vec3::new(-FRAC_PI_2, 0.0, 0.0));

        let z = adjust(&light, AxisMode::Z, -1.0, &[], None).unwrap();
        assert_vec_near(z.location, Vec3::NEG_Z);
        assert_vec_near(z.rotation, Vec3::new(PI, 0.0, FRAC_PI_2));
    }

    #[test]
    fn test_world_axis_zero_offset() {
        let z = adjust(&default_light(), AxisMode::Z, 0.0, &[], None).unwrap();
        assert_vec_near(z.location, Vec3::ZERO);
        assert_vec_near(z.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_normal_diagonal() {
        let normal = Vec3::ONE.normalize();
        let hit = HitPoint::new(Vec3::ONE - normal, normal);
        let adjusted = adjust(&default_light(), AxisMode::Normal, 1.0, &[hit], None).unwrap();
        assert_vec_near(adjusted.location, Vec3::ONE);
        assert_vec_near(adjusted.rotation, Vec3::new(-0.7854, 0.6155, -0.2618));
        assert_vec_near(adjusted.forward(), -normal);
    }

    #[test]
    fn test_normal_uses_hit_nearest_light() {
        let light = Transform::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let far = HitPoint::new(Vec3::new(0.0, 0.0, -1.0), Vec3::NEG_Z);
        let near = HitPoint::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        let adjusted = adjust(&light, AxisMode::Normal, 2.0, &[far, near], None).unwrap();
        assert_vec_near(adjusted.location, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_reflect_default_camera() {
        let camera = CameraData {
            transform: Transform::new(
                Vec3::new(7.3589, -6.9258, 4.9583),
                Vec3::new(1.1093, 0.0, 0.8149),
            ),
            fov_y: 0.3997,
            ortho_scale: None,
        };
        let hit = HitPoint::new(Vec3::new(1.0, -0.9413, 0.6738), Vec3::X);
        let adjusted =
            adjust(&default_light(), AxisMode::Reflect, 1.0, &[hit], Some(&camera)).unwrap();
        // Inputs are rounded to four places, so the location drifts slightly
        assert!((adjusted.location - Vec3::new(1.6538, -0.3259, 0.2333)).abs().max_element() < 5e-4);
        assert_vec_near(adjusted.rotation, Vec3::new(-2.1921, 0.7125, -1.2535));
    }

    #[test]
    fn test_reflect_requires_camera() {
        let hit = HitPoint::new(Vec3::X, Vec3::X);
        let result = adjust(&default_light(), AxisMode::Reflect, 1.0, &[hit], None);
        assert!(matches!(result, Err(LightPaintError::NoCamera)));
    }

    #[test]
    fn test_surface_modes_require_hit() {
        let result = adjust(&default_light(), AxisMode::Normal, 1.0, &[], None);
        assert!(matches!(
            result,
            Err(LightPaintError::MissingSurface {
                axis: AxisMode::Normal
            })
        ));
    }
}
