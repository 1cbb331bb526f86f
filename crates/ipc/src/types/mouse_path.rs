//! Literal mouse paths for headless operator invocation.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;

/// A recorded stroke in screen coordinates.
///
/// Accepts either a JSON array of `[x, y]` pairs or the compact text form
/// `"x,y;x,y;..."`. Always serializes as the array form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MousePathRepr", into = "Vec<[f32; 2]>")]
pub struct MousePath(pub Vec<[f32; 2]>);

#[derive(Deserialize)]
#[serde(untagged)]
enum MousePathRepr {
    Points(Vec<[f32; 2]>),
    Text(String),
}

impl MousePath {
    /// Parse the compact `"x,y;x,y"` form. Whitespace is ignored and an
    /// empty string is an empty path.
    pub fn parse(text: &str) -> Result<Self, IpcError> {
        let mut points = Vec::new();
        for (index, pair) in text.split(';').enumerate() {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let mut coords = pair.split(',').map(str::trim);
            let (Some(x), Some(y), None) = (coords.next(), coords.next(), coords.next()) else {
                return Err(IpcError::InvalidPath(format!(
                    "point {index} is not an x,y pair: {pair:?}"
                )));
            };
            let parse = |value: &str| {
                value.parse::<f32>().map_err(|e| {
                    IpcError::InvalidPath(format!("point {index}: {value:?}: {e}"))
                })
            };
            points.push([parse(x)?, parse(y)?]);
        }
        Ok(Self(points))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn points(&self) -> &[[f32; 2]] {
        &self.0
    }
}

impl TryFrom<MousePathRepr> for MousePath {
    type Error = IpcError;

    fn try_from(repr: MousePathRepr) -> Result<Self, Self::Error> {
        match repr {
            MousePathRepr::Points(points) => Ok(Self(points)),
            MousePathRepr::Text(text) => Self::parse(&text),
        }
    }
}

impl From<MousePath> for Vec<[f32; 2]> {
    fn from(path: MousePath) -> Self {
        path.0
    }
}

impl From<Vec<[f32; 2]>> for MousePath {
    fn from(points: Vec<[f32; 2]>) -> Self {
        Self(points)
    }
}
