//! Operator calls.
//!
//! Every call carries an optional literal `str_mouse_path`. An empty path
//! means the stroke comes from a live modal session instead.

use serde::{Deserialize, Serialize};

use crate::types::{AxisMode, LampType, MousePath, NormalMethod, VisibilityParams};

/// Namespace shared by all operator ids
pub const OPERATOR_NAMESPACE: &str = "lightpainter";

/// Parameters of the `lamp` operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LampParams {
    pub str_mouse_path: MousePath,
    /// Signed distance from the painted surface
    pub offset: f32,
    pub lamp_type: LampType,
    #[serde(flatten)]
    pub visibility: VisibilityParams,
}

impl Default for LampParams {
    fn default() -> Self {
        Self {
            str_mouse_path: MousePath::default(),
            offset: 1.0,
            lamp_type: LampType::default(),
            visibility: VisibilityParams::default(),
        }
    }
}

/// Parameters of operators that only take a stroke (`mesh`, `tube_light`, `flag`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeParams {
    pub str_mouse_path: MousePath,
}

/// Parameters of the `sky` operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyParams {
    pub str_mouse_path: MousePath,
    pub normal_method: NormalMethod,
    #[serde(flatten)]
    pub visibility: VisibilityParams,
}

/// Parameters of the `lamp_adjust` operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustParams {
    pub str_mouse_path: MousePath,
    pub offset: f32,
    pub axis: AxisMode,
}

impl Default for AdjustParams {
    fn default() -> Self {
        Self {
            str_mouse_path: MousePath::default(),
            offset: 1.0,
            axis: AxisMode::default(),
        }
    }
}

/// A single operator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator", content = "params", rename_all = "snake_case")]
pub enum OperatorCall {
    /// Place a point, spot, or area lamp over the painted region
    Lamp(LampParams),
    /// Emissive convex hull of the painted region
    Mesh(StrokeParams),
    /// Emissive tube following the stroke
    TubeLight(StrokeParams),
    /// Orient the world sky from the painted normals
    Sky(SkyParams),
    /// Occluding card between the active light and the painted region
    Flag(StrokeParams),
    /// Move the active light relative to an axis, normal, or reflection
    LampAdjust(AdjustParams),
}

impl OperatorCall {
    /// Short operator name (`lamp`, `tube_light`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            OperatorCall::Lamp(_) => "lamp",
            OperatorCall::Mesh(_) => "mesh",
            OperatorCall::TubeLight(_) => "tube_light",
            OperatorCall::Sky(_) => "sky",
            OperatorCall::Flag(_) => "flag",
            OperatorCall::LampAdjust(_) => "lamp_adjust",
        }
    }

    /// Fully qualified operator id (`lightpainter.lamp`, ...)
    pub fn id(&self) -> String {
        format!("{OPERATOR_NAMESPACE}.{}", self.name())
    }

    /// The literal stroke attached to the call
    pub fn mouse_path(&self) -> &MousePath {
        match self {
            OperatorCall::Lamp(p) => &p.str_mouse_path,
            OperatorCall::Mesh(p) | OperatorCall::TubeLight(p) | OperatorCall::Flag(p) => {
                &p.str_mouse_path
            }
            OperatorCall::Sky(p) => &p.str_mouse_path,
            OperatorCall::LampAdjust(p) => &p.str_mouse_path,
        }
    }
}
