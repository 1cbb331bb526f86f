use glam::Vec2;
use lightpaint_ipc::MousePath;
use thiserror::Error;

use crate::types::Stroke;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Stroke point {index} is not finite: ({x}, {y})")]
    NonFinite { index: usize, x: f32, y: f32 },
}

/// Convert a wire point to a screen position
pub fn to_screen_point(point: [f32; 2]) -> Vec2 {
    Vec2::from_array(point)
}

/// Check a single screen sample
pub fn validate_point(index: usize, point: Vec2) -> Result<Vec2, ValidationError> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(ValidationError::NonFinite {
            index,
            x: point.x,
            y: point.y,
        })
    }
}

/// Validate a literal mouse path and turn it into a stroke
pub fn stroke_from_path(path: &MousePath) -> Result<Stroke, ValidationError> {
    let points = path
        .points()
        .iter()
        .enumerate()
        .map(|(index, &point)| validate_point(index, to_screen_point(point)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Stroke::new(points))
}
