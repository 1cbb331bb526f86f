//! Enumerated operator parameters.

use serde::{Deserialize, Serialize};

/// Kind of lamp created by the `lamp` operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LampType {
    #[default]
    Point,
    Spot,
    Area,
}

impl LampType {
    /// Base object name used for lamps of this kind
    pub fn object_name(self) -> &'static str {
        match self {
            LampType::Point => "Point",
            LampType::Spot => "Spot",
            LampType::Area => "Area",
        }
    }
}

/// How `lamp_adjust` repositions the active light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisMode {
    X,
    Y,
    Z,
    /// Along the surface normal at the painted point
    #[default]
    Normal,
    /// Along the camera ray mirrored about the surface normal (rim lighting)
    Reflect,
}

impl AxisMode {
    /// Whether this mode needs a surface hit from the stroke
    pub fn needs_surface(self) -> bool {
        matches!(self, AxisMode::Normal | AxisMode::Reflect)
    }
}

/// How the sky orientation is derived from the painted normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalMethod {
    /// Normalized mean of all hit normals
    #[default]
    Average,
    /// Normal of the hit closest to the centroid of the stroke
    Center,
}

/// Ray visibility toggles shared by `lamp` and `sky`.
///
/// A false toggle removes the light from that ray type entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityParams {
    pub visible_camera: bool,
    pub visible_diffuse: bool,
    pub visible_specular: bool,
    pub visible_volume: bool,
}

impl Default for VisibilityParams {
    fn default() -> Self {
        Self {
            visible_camera: true,
            visible_diffuse: true,
            visible_specular: true,
            visible_volume: true,
        }
    }
}

impl VisibilityParams {
    /// All ray types disabled
    pub fn hidden() -> Self {
        Self {
            visible_camera: false,
            visible_diffuse: false,
            visible_specular: false,
            visible_volume: false,
        }
    }
}
