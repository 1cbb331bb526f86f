//! Scene capability interface.
//!
//! The operators never touch a concrete scene graph. Hosts implement
//! [`Scene`] over their own data; [`MemoryScene`] is a self-contained
//! triangle-mesh implementation used by tests and the headless harness.

mod memory;

pub use memory::*;

use glam::Vec3;

use crate::error::LightPaintError;
use crate::types::{CameraData, HitPoint, LightSpec, MeshObjectSpec, ObjectId, SkySpec, Transform};

/// What the painting core needs from the host scene.
pub trait Scene {
    /// Nearest intersection of a world-space ray with scene geometry
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<HitPoint>;

    /// The camera the scene renders through
    fn active_camera(&self) -> Option<CameraData>;

    /// The selected light, if the active object is a light
    fn active_light(&self) -> Option<(ObjectId, LightSpec)>;

    /// Create a light object named after its kind
    fn create_light(&mut self, spec: LightSpec) -> ObjectId;

    /// Create a mesh object
    fn create_mesh(&mut self, spec: MeshObjectSpec) -> ObjectId;

    /// Create a sky world and make it the scene's world
    fn create_sky(&mut self, sky: SkySpec) -> ObjectId;

    /// Move an existing light, leaving its kind and shape untouched
    fn set_light_transform(
        &mut self,
        id: ObjectId,
        transform: Transform,
    ) -> Result<(), LightPaintError>;

    /// Final (uniquified) name of an object
    fn object_name(&self, id: ObjectId) -> Option<String>;
}
