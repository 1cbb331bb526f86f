//! Harness configuration: JSON config file plus environment

use std::path::Path;

use anyhow::{Context, Result};
use lightpaint_config::{PaintConfig, ViewportConfig};
use serde::{Deserialize, Serialize};

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "LIGHTPAINT_LOG";

/// Filter used when `LIGHTPAINT_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Everything the harness can be configured with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub paint: PaintConfig,
    pub viewport: ViewportConfig,
}

impl HarnessConfig {
    /// Load from an optional JSON file; missing fields keep their defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Override the viewport size from the command line
    pub fn with_viewport(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(width) = width {
            self.viewport.width = width;
        }
        if let Some(height) = height {
            self.viewport.height = height;
        }
        self
    }
}

/// Tracing filter from the environment
pub fn log_filter() -> String {
    std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: HarnessConfig =
            serde_json::from_str(r#"{"paint": {"tube_radius": 0.2}, "viewport": {"width": 800}}"#)
                .unwrap();
        assert_eq!(config.paint.tube_radius, 0.2);
        assert_eq!(config.paint.min_extent, PaintConfig::default().min_extent);
        assert_eq!(config.viewport.width, 800);
        assert_eq!(config.viewport.height, ViewportConfig::default().height);
    }

    #[test]
    fn test_viewport_override() {
        let config = HarnessConfig::default().with_viewport(Some(640), None);
        assert_eq!(config.viewport.width, 640);
        assert_eq!(config.viewport.height, ViewportConfig::default().height);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = HarnessConfig::load(Some(Path::new("/nonexistent/lightpaint.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lightpaint.json"));
    }
}
