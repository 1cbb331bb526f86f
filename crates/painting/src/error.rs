//! Error types for light painting operators.

use lightpaint_ipc::AxisMode;

use crate::types::ObjectId;
use crate::validation::ValidationError;

/// Coarse failure class, used for host-facing error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stroke was empty or hit nothing
    InputEmpty,
    /// Required scene context is absent
    PreconditionMissing,
    /// The literal stroke could not be used
    InvalidInput,
    /// The scene no longer holds a referenced object
    UnknownObject,
}

/// Errors raised by the painting operators.
///
/// Every variant is raised before the scene is touched.
#[derive(Debug, thiserror::Error)]
pub enum LightPaintError {
    #[error("Stroke is empty")]
    EmptyStroke,

    #[error("Stroke did not hit any geometry ({samples} samples)")]
    NoSurfaceHit { samples: usize },

    #[error("No active camera in the scene")]
    NoCamera,

    #[error("No active light selected")]
    NoActiveLight,

    #[error("Axis {axis:?} needs the stroke to hit a surface")]
    MissingSurface { axis: AxisMode },

    #[error("Invalid stroke: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown scene object {0:?}")]
    UnknownObject(ObjectId),
}

impl LightPaintError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LightPaintError::EmptyStroke | LightPaintError::NoSurfaceHit { .. } => {
                ErrorKind::InputEmpty
            }
            LightPaintError::NoCamera
            | LightPaintError::NoActiveLight
            | LightPaintError::MissingSurface { .. } => ErrorKind::PreconditionMissing,
            LightPaintError::Validation(_) => ErrorKind::InvalidInput,
            LightPaintError::UnknownObject(_) => ErrorKind::UnknownObject,
        }
    }

    /// Stable snake_case code for reports
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InputEmpty => "input_empty",
            ErrorKind::PreconditionMissing => "precondition_missing",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::UnknownObject => "unknown_object",
        }
    }
}
