//! Reports sent back to the host after an operator finishes.

use serde::{Deserialize, Serialize};

/// Outcome of one operator invocation, mirroring the host's
/// `{'FINISHED'}` / `{'CANCELLED'}` convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OperatorReport {
    /// The operator committed; `object` names what was created or modified
    Finished { operator: String, object: String },

    /// The operator aborted without touching the scene
    Cancelled {
        operator: String,
        code: String,
        message: String,
    },
}

impl OperatorReport {
    pub fn is_finished(&self) -> bool {
        matches!(self, OperatorReport::Finished { .. })
    }

    /// Serialize to a JSON string for the host
    pub fn to_json(&self) -> Result<String, crate::IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}
