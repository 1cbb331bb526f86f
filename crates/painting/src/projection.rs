//! View projection math for stroke sampling.
//!
//! This module maps viewport pixels to world-space rays (and back), and
//! provides the tangent-space helpers the fitting engine uses to build
//! cross-sections and flat fallback shapes around a surface normal.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;
use crate::rotation::orthogonal;
use crate::types::CameraData;

/// A world-space ray with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// The viewport a stroke was painted in.
///
/// Screen coordinates are pixels with the origin at the top-left corner,
/// x to the right and y down. The view looks along its local -Z axis with
/// local +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Eye position in world space
    pub eye: Vec3,
    /// View-to-world rotation
    pub rotation: Quat,
    /// Vertical field of view in radians (perspective views)
    pub fov_y: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// Full view height in world units; `Some` for orthographic views
    pub ortho_scale: Option<f32>,
}

impl ViewTransform {
    /// Look through a scene camera
    pub fn from_camera(camera: &CameraData, viewport: Vec2) -> Self {
        Self {
            eye: camera.transform.location,
            rotation: camera.transform.quat(),
            fov_y: camera.fov_y,
            viewport,
            ortho_scale: camera.ortho_scale,
        }
    }

    /// Direction the view looks in
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y.max(1.0)
    }

    /// Half extents of the image plane: at unit depth for perspective views,
    /// in world units for orthographic ones.
    fn half_extents(&self) -> Vec2 {
        let half_height = match self.ortho_scale {
            Some(scale) => scale * 0.5,
            None => (self.fov_y * 0.5).tan(),
        };
        Vec2::new(half_height * self.aspect(), half_height)
    }

    /// Convert viewport pixels to normalized device coordinates (-1..1, y up)
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * screen.x / self.viewport.x - 1.0,
            1.0 - 2.0 * screen.y / self.viewport.y,
        )
    }

    /// Convert normalized device coordinates back to viewport pixels
    pub fn ndc_to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        )
    }

    /// Unproject a viewport pixel into a world-space ray
    pub fn screen_to_ray(&self, screen: Vec2) -> Ray {
        let plane = self.screen_to_ndc(screen) * self.half_extents();

        match self.ortho_scale {
            Some(_) => Ray {
                origin: self.eye + self.rotation * plane.extend(0.0),
                direction: self.forward(),
            },
            None => Ray {
                origin: self.eye,
                direction: (self.rotation * plane.extend(-1.0)).normalize(),
            },
        }
    }

    /// Project a world point into viewport pixels.
    ///
    /// Returns `None` for points behind a perspective eye.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let local = self.rotation.inverse() * (point - self.eye);
        let plane = match self.ortho_scale {
            Some(_) => local.truncate(),
            None => {
                if local.z > -EPSILON {
                    return None;
                }
                local.truncate() / -local.z
            }
        };
        Some(self.ndc_to_screen(plane / self.half_extents()))
    }
}

/// Orthonormal `(tangent, bitangent, normal)` frame around `normal`, with
/// `tangent × bitangent = normal`.
///
/// The tangent follows `reference` projected onto the plane of `normal`.
/// Without a usable reference it falls back to [`orthogonal`]`(normal)`.
pub fn build_tangent_space(normal: Vec3, reference: Option<Vec3>) -> (Vec3, Vec3, Vec3) {
    let n = normal.normalize();
    let t = reference
        .map(|r| r.reject_from_normalized(n))
        .filter(|t| t.length_squared() > EPSILON)
        .map(Vec3::normalize)
        .unwrap_or_else(|| orthogonal(n).normalize());
    (t, n.cross(t), n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Transform;

    fn test_view() -> ViewTransform {
        ViewTransform {
            eye: Vec3::new(0.0, 0.0, 10.0),
            rotation: Quat::IDENTITY,
            fov_y: std::f32::consts::FRAC_PI_2,
            viewport: Vec2::new(200.0, 100.0),
            ortho_scale: None,
        }
    }

    #[test]
    fn test_center_ray_looks_forward() {
        let view = test_view();
        let ray = view.screen_to_ray(Vec2::new(100.0, 50.0));
        assert!((ray.origin - view.eye).length() < 1e-6);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_top_edge_ray() {
        // 90 degree vertical fov: the top edge ray rises at 45 degrees
        let ray = test_view().screen_to_ray(Vec2::new(100.0, 0.0));
        let expected = Vec3::new(0.0, 1.0, -1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_project_unproject() {
        let view = test_view();
        let point = Vec3::new(1.5, -2.0, 3.0);
        let screen = view.world_to_screen(point).unwrap();
        let ray = view.screen_to_ray(screen);
        let t = (point - ray.origin).length();
        assert!((ray.at(t) - point).length() < 1e-4);
    }

    #[test]
    fn test_behind_eye_does_not_project() {
        assert!(test_view().world_to_screen(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let view = ViewTransform {
            ortho_scale: Some(4.0),
            ..test_view()
        };
        let corner = view.screen_to_ray(Vec2::ZERO);
        assert!((corner.direction - Vec3::NEG_Z).length() < 1e-6);
        assert!((corner.origin - Vec3::new(-4.0, 2.0, 10.0)).length() < 1e-5);
        let screen = view.world_to_screen(Vec3::new(-4.0, 2.0, -3.0)).unwrap();
        assert!(screen.length() < 1e-3);
    }

    #[test]
    fn test_from_camera() {
        let camera = CameraData {
            transform: Transform::new(Vec3::new(0.0, -5.0, 0.0), Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0)),
            fov_y: 0.5,
            ortho_scale: None,
        };
        let view = ViewTransform::from_camera(&camera, Vec2::new(640.0, 480.0));
        // Rotating -Z a quarter turn about X looks along +Y
        assert!((view.forward() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_tangent_space_is_orthonormal() {
        let (t, b, n) = build_tangent_space(Vec3::new(0.2, 0.9, -0.1), None);
        assert!(t.dot(b).abs() < 1e-5);
        assert!(t.dot(n).abs() < 1e-5);
        assert!((t.cross(b) - n).length() < 1e-5);
    }

    #[test]
    fn test_tangent_space_reference() {
        let (t, _, _) = build_tangent_space(Vec3::Z, Some(Vec3::new(1.0, 0.0, 1.0)));
        assert!((t - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_tangent_space_parallel_reference_falls_back() {
        let (t, b, n) = build_tangent_space(Vec3::NEG_Y, Some(Vec3::Y));
        assert!((t - orthogonal(n).normalize()).length() < 1e-6);
        assert!((t.cross(b) - n).length() < 1e-5);
    }
}
