use glam::{Quat, Vec2, Vec3};
use lightpaint_ipc::{LampType, VisibilityParams};
use serde::{Deserialize, Serialize};

use crate::mesh::MeshData;
use crate::rotation::euler_to_quat;

/// Opaque handle to a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Ordered screen-space samples of one paint gesture.
///
/// Points are in viewport pixels with the origin at the top-left corner.
/// A stroke is immutable once built; live capture goes through
/// [`crate::pipeline::StrokeCapture`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Vec2>,
}

impl Stroke {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Where a stroke-derived ray met scene geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitPoint {
    /// World position of the intersection
    pub position: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Object that was hit, if the scene reports it
    pub object: Option<ObjectId>,
}

impl HitPoint {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            object: None,
        }
    }
}

/// Object placement: location plus world-frame XYZ Euler rotation (radians).
///
/// The rotation applies X first, then Y, then Z (R = Rz * Ry * Rx).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn new(location: Vec3, rotation: Vec3) -> Self {
        Self { location, rotation }
    }

    pub fn quat(&self) -> Quat {
        euler_to_quat(self.rotation)
    }

    /// Direction the object faces (its local -Z axis)
    pub fn forward(&self) -> Vec3 {
        self.quat() * Vec3::NEG_Z
    }
}

/// Camera pose and lens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraData {
    pub transform: Transform,
    /// Vertical field of view in radians (perspective cameras)
    pub fov_y: f32,
    /// Full view height in world units for orthographic cameras
    #[serde(default)]
    pub ortho_scale: Option<f32>,
}

/// Per ray type visibility of a light object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RayVisibility {
    pub camera: bool,
    pub diffuse: bool,
    pub glossy: bool,
    pub volume_scatter: bool,
}

impl Default for RayVisibility {
    fn default() -> Self {
        Self {
            camera: true,
            diffuse: true,
            glossy: true,
            volume_scatter: true,
        }
    }
}

impl From<VisibilityParams> for RayVisibility {
    fn from(params: VisibilityParams) -> Self {
        Self {
            camera: params.visible_camera,
            diffuse: params.visible_diffuse,
            glossy: params.visible_specular,
            volume_scatter: params.visible_volume,
        }
    }
}

/// Contribution factors on the light data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightFactors {
    pub diffuse: f32,
    pub specular: f32,
    pub volume: f32,
}

impl Default for LightFactors {
    fn default() -> Self {
        Self {
            diffuse: 1.0,
            specular: 1.0,
            volume: 1.0,
        }
    }
}

impl LightFactors {
    /// Zero every factor whose ray type is hidden; visible ones keep the default.
    pub fn from_visibility(visibility: RayVisibility) -> Self {
        let factor = |visible: bool| if visible { 1.0 } else { 0.0 };
        Self {
            diffuse: factor(visibility.diffuse),
            specular: factor(visibility.glossy),
            volume: factor(visibility.volume_scatter),
        }
    }
}

/// Shape parameters of a light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightShape {
    Point { radius: f32 },
    Spot { radius: f32, spot_size: f32, blend: f32 },
    Area { size: Vec2 },
}

impl LightShape {
    pub fn lamp_type(&self) -> LampType {
        match self {
            LightShape::Point { .. } => LampType::Point,
            LightShape::Spot { .. } => LampType::Spot,
            LightShape::Area { .. } => LampType::Area,
        }
    }
}

/// Complete parameterization of a light object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub shape: LightShape,
    pub transform: Transform,
    pub visibility: RayVisibility,
    pub factors: LightFactors,
}

impl LightSpec {
    /// Base object name; the scene makes it unique
    pub fn base_name(&self) -> &'static str {
        self.shape.lamp_type().object_name()
    }
}

/// Ray visibility of the world background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldVisibility {
    pub camera: bool,
    pub diffuse: bool,
    pub glossy: bool,
    pub scatter: bool,
}

impl Default for WorldVisibility {
    fn default() -> Self {
        Self {
            camera: true,
            diffuse: true,
            glossy: true,
            scatter: true,
        }
    }
}

impl From<VisibilityParams> for WorldVisibility {
    fn from(params: VisibilityParams) -> Self {
        Self {
            camera: params.visible_camera,
            diffuse: params.visible_diffuse,
            glossy: params.visible_specular,
            scatter: params.visible_volume,
        }
    }
}

/// Sky environment derived from painted normals. Skies have no position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkySpec {
    /// Unit vector pointing toward the sun
    pub sun_direction: Vec3,
    /// Angle above the horizon (radians)
    pub sun_elevation: f32,
    /// Rotation about world Z (radians, zero facing +Y)
    pub sun_rotation: f32,
    pub strength: f32,
    pub visibility: WorldVisibility,
}

/// What a created mesh object does to the lighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MeshRole {
    /// Emissive surface with the given strength
    Emitter { strength: f32 },
    /// Black card that blocks light
    Occluder,
}

/// A mesh object to be created in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshObjectSpec {
    pub name: String,
    pub mesh: MeshData,
    pub role: MeshRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_follow_visibility() {
        let visibility = RayVisibility {
            camera: false,
            diffuse: false,
            glossy: true,
            volume_scatter: false,
        };
        let factors = LightFactors::from_visibility(visibility);
        assert_eq!(factors.diffuse, 0.0);
        assert_eq!(factors.specular, 1.0);
        assert_eq!(factors.volume, 0.0);
    }

    #[test]
    fn test_visibility_from_params() {
        let visibility = RayVisibility::from(VisibilityParams::hidden());
        assert!(!visibility.camera);
        assert!(!visibility.glossy);
        let world = WorldVisibility::from(VisibilityParams::default());
        assert!(world.camera && world.diffuse && world.glossy && world.scatter);
    }

    #[test]
    fn test_transform_forward_identity() {
        let transform = Transform::default();
        assert!((transform.forward() - Vec3::NEG_Z).length() < 1e-6);
    }
}
