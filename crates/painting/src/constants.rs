/// Epsilon for floating point comparisons in geometric tests.
pub const EPSILON: f32 = 1e-6;

/// Relative tolerance used when classifying point sets (scaled by set size).
pub const HULL_RELATIVE_TOLERANCE: f32 = 1e-5;

/// Two Euler solutions whose absolute sums differ by less than this are
/// considered tied; the first solution wins.
pub const EULER_TIE_TOLERANCE: f32 = 1e-4;

/// Vertical field of view of the default scene camera (radians).
pub const DEFAULT_CAMERA_FOV_Y: f32 = 0.3997;

/// Name of the emissive convex hull mesh.
pub const CONVEX_OBJECT_NAME: &str = "LightPaint_Convex";

/// Name of the emissive tube mesh.
pub const TUBE_OBJECT_NAME: &str = "LightPaint_Tube";

/// Name of the occluding flag mesh.
pub const FLAG_OBJECT_NAME: &str = "LightPaint_Flag";

/// Name of worlds created by the sky operator.
pub const SKY_WORLD_NAME: &str = "LightPaint_Sky";
