//! Shared configuration for Light Paint
//!
//! This crate provides the single source of truth for the tolerances and
//! shape parameters used by the light painting operators, and for the
//! viewport dimensions used by the headless harness.

use serde::{Deserialize, Serialize};

/// Default viewport width in pixels
pub const DEFAULT_WIDTH: u32 = 1920;

/// Default viewport height in pixels
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Consecutive hits closer than this (world units) are merged
pub const DEFAULT_DEDUP_TOLERANCE: f32 = 1e-3;

/// Smallest extent a fitted shape may collapse to (world units)
pub const DEFAULT_MIN_EXTENT: f32 = 0.01;

/// Tube cross-section radius (world units)
pub const DEFAULT_TUBE_RADIUS: f32 = 0.05;

/// Number of sides of the tube cross-section
pub const DEFAULT_TUBE_SEGMENTS: u32 = 8;

/// Soft shadow radius of point lights
pub const DEFAULT_POINT_RADIUS: f32 = 0.1;

/// Spot cone blend
pub const DEFAULT_SPOT_BLEND: f32 = 0.15;

/// Narrowest spot cone (radians, one degree)
pub const DEFAULT_MIN_SPOT_SIZE: f32 = 0.017_453_292;

/// Emission strength for painted emitter meshes
pub const DEFAULT_EMISSION_STRENGTH: f32 = 10.0;

/// Sky strength for painted environments
pub const DEFAULT_SKY_STRENGTH: f32 = 1.0;

/// Where a flag sits between the light (0.0) and the painted surface (1.0)
pub const DEFAULT_FLAG_DISTANCE: f32 = 0.5;

/// Flag oversize factor relative to the shadow it must cast
pub const DEFAULT_FLAG_MARGIN: f32 = 1.1;

/// Tuning parameters for the painting operators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    /// Hits from consecutive stroke samples closer than this are merged
    pub dedup_tolerance: f32,
    /// Minimal extent used when fitting degenerate point sets
    pub min_extent: f32,
    /// Radius of tube lights
    pub tube_radius: f32,
    /// Sides of the tube cross-section (at least 3)
    pub tube_segments: u32,
    /// Soft radius of point lights
    pub point_radius: f32,
    /// Spot cone blend (0.0-1.0)
    pub spot_blend: f32,
    /// Lower clamp for spot cone angles
    pub min_spot_size: f32,
    /// Emission strength of `LightPaint_Convex` and `LightPaint_Tube`
    pub emission_strength: f32,
    /// Strength of painted sky environments
    pub sky_strength: f32,
    /// Fraction of the light-to-surface distance at which flags are placed
    pub flag_distance: f32,
    /// Oversize factor for flags
    pub flag_margin: f32,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            dedup_tolerance: DEFAULT_DEDUP_TOLERANCE,
            min_extent: DEFAULT_MIN_EXTENT,
            tube_radius: DEFAULT_TUBE_RADIUS,
            tube_segments: DEFAULT_TUBE_SEGMENTS,
            point_radius: DEFAULT_POINT_RADIUS,
            spot_blend: DEFAULT_SPOT_BLEND,
            min_spot_size: DEFAULT_MIN_SPOT_SIZE,
            emission_strength: DEFAULT_EMISSION_STRENGTH,
            sky_strength: DEFAULT_SKY_STRENGTH,
            flag_distance: DEFAULT_FLAG_DISTANCE,
            flag_margin: DEFAULT_FLAG_MARGIN,
        }
    }
}

impl PaintConfig {
    /// Tube sides, never fewer than a triangle
    pub fn tube_sides(&self) -> usize {
        self.tube_segments.max(3) as usize
    }

    /// Flag placement clamped so the flag stays strictly between light and surface
    pub fn flag_fraction(&self) -> f32 {
        self.flag_distance.clamp(0.05, 0.95)
    }
}

/// Viewport configuration for the harness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl ViewportConfig {
    /// Create a new viewport config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Get width as f32 for calculations
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Get height as f32 for calculations
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}
