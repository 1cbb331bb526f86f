//! In-memory scene made of triangle meshes, lights, cameras and worlds.

use std::collections::HashSet;

use glam::Vec3;
use lightpaint_config::DEFAULT_POINT_RADIUS;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_CAMERA_FOV_Y, EPSILON};
use crate::error::LightPaintError;
use crate::mesh::MeshData;
use crate::raycast::raycast_mesh;
use crate::types::{
    CameraData, HitPoint, LightFactors, LightShape, LightSpec, MeshObjectSpec, MeshRole, ObjectId,
    RayVisibility, SkySpec, Transform,
};

use super::Scene;

/// Payload of a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectData {
    Mesh {
        mesh: MeshData,
        /// `None` for ordinary scene geometry
        role: Option<MeshRole>,
    },
    Light(LightSpec),
    Camera(CameraData),
    World(SkySpec),
}

/// A named object in a [`MemoryScene`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub data: ObjectData,
}

/// Self-contained [`Scene`] implementation.
///
/// Object names are unique: adding `Point` twice yields `Point` and
/// `Point.001`. A loaded scene must not repeat object ids, and new ids are
/// always allocated above every loaded one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MemorySceneRepr")]
pub struct MemoryScene {
    objects: Vec<SceneObject>,
    active: Option<ObjectId>,
    camera: Option<ObjectId>,
    world: Option<ObjectId>,
    next_id: u64,
}

#[derive(Deserialize)]
struct MemorySceneRepr {
    objects: Vec<SceneObject>,
    active: Option<ObjectId>,
    camera: Option<ObjectId>,
    world: Option<ObjectId>,
    #[serde(default)]
    next_id: u64,
}

/// A scene file that cannot be loaded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("Object id {0:?} is used more than once")]
    DuplicateId(ObjectId),
}

impl TryFrom<MemorySceneRepr> for MemoryScene {
    type Error = SceneError;

    fn try_from(repr: MemorySceneRepr) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        if let Some(object) = repr.objects.iter().find(|o| !seen.insert(o.id)) {
            return Err(SceneError::DuplicateId(object.id));
        }
        let next_id = repr
            .objects
            .iter()
            .map(|o| o.id.0 + 1)
            .fold(repr.next_id, u64::max);

        Ok(Self {
            objects: repr.objects,
            active: repr.active,
            camera: repr.camera,
            world: repr.world,
            next_id,
        })
    }
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock startup scene: a 2x2x2 cube at the origin, a point light
    /// named `Light` and a camera named `Camera`. The cube is active.
    pub fn default_cube() -> Self {
        let mut scene = Self::new();
        let cube = scene.add_mesh("Cube", MeshData::cube(Vec3::ZERO, 1.0));
        scene.add_light(
            "Light",
            LightSpec {
                shape: LightShape::Point {
                    radius: DEFAULT_POINT_RADIUS,
                },
                transform: Transform::new(
                    Vec3::new(4.0762, 1.0055, 5.9039),
                    Vec3::new(0.6503, 0.0552, 1.8664),
                ),
                visibility: RayVisibility::default(),
                factors: LightFactors::default(),
            },
        );
        scene.add_camera(
            "Camera",
            CameraData {
                transform: Transform::new(
                    Vec3::new(7.3589, -6.9258, 4.9583),
                    Vec3::new(1.1093, 0.0, 0.8149),
                ),
                fov_y: DEFAULT_CAMERA_FOV_Y,
                ortho_scale: None,
            },
        );
        scene.active = Some(cube);
        scene
    }

    /// Make `base` unique among object names
    pub fn unique_name(&self, base: &str) -> String {
        if self.find(base).is_none() {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| self.find(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Add an object under a unique version of `name`
    pub fn add_object(&mut self, name: &str, data: ObjectData) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let name = self.unique_name(name);
        debug!("Adding object {:?} as {}", id, name);
        self.objects.push(SceneObject { id, name, data });
        id
    }

    /// Add plain geometry
    pub fn add_mesh(&mut self, name: &str, mesh: MeshData) -> ObjectId {
        self.add_object(name, ObjectData::Mesh { mesh, role: None })
    }

    pub fn add_light(&mut self, name: &str, spec: LightSpec) -> ObjectId {
        self.add_object(name, ObjectData::Light(spec))
    }

    /// Add a camera; the first camera becomes the scene camera
    pub fn add_camera(&mut self, name: &str, camera: CameraData) -> ObjectId {
        let id = self.add_object(name, ObjectData::Camera(camera));
        if self.camera.is_none() {
            self.camera = Some(id);
        }
        id
    }

    /// Make an object active (selected). Returns false for unknown ids.
    pub fn set_active(&mut self, id: ObjectId) -> bool {
        if self.get(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    /// Delete an object, clearing any scene slot that referenced it
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        for slot in [&mut self.active, &mut self.camera, &mut self.world] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|o| o.name.as_str())
    }

    /// Light data of an object, if it is a light
    pub fn light(&self, id: ObjectId) -> Option<&LightSpec> {
        match &self.get(id)?.data {
            ObjectData::Light(spec) => Some(spec),
            _ => None,
        }
    }

    /// The scene's current sky, if one was painted or loaded
    pub fn world(&self) -> Option<&SkySpec> {
        match &self.get(self.world?)?.data {
            ObjectData::World(sky) => Some(sky),
            _ => None,
        }
    }

    /// Id of the first object whose name is `name`, for test and harness lookups
    pub fn id_of(&self, name: &str) -> Option<ObjectId> {
        self.find(name).map(|o| o.id)
    }
}

impl Scene for MemoryScene {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<HitPoint> {
        let direction = direction.try_normalize()?;
        self.objects
            .iter()
            .filter_map(|object| match &object.data {
                ObjectData::Mesh { mesh, .. } => {
                    raycast_mesh(origin, direction, mesh).map(|hit| (object.id, hit))
                }
                _ => None,
            })
            .filter(|(_, hit)| hit.normal.length_squared() > EPSILON)
            .min_by(|(_, a), (_, b)| a.t.total_cmp(&b.t))
            .map(|(id, hit)| HitPoint {
                position: hit.position,
                normal: hit.normal,
                object: Some(id),
            })
    }

    fn active_camera(&self) -> Option<CameraData> {
        match &self.get(self.camera?)?.data {
            ObjectData::Camera(camera) => Some(*camera),
            _ => None,
        }
    }

    fn active_light(&self) -> Option<(ObjectId, LightSpec)> {
        let id = self.active?;
        self.light(id).map(|spec| (id, *spec))
    }

    fn create_light(&mut self, spec: LightSpec) -> ObjectId {
        self.add_light(spec.base_name(), spec)
    }

    fn create_mesh(&mut self, spec: MeshObjectSpec) -> ObjectId {
        self.add_object(
            &spec.name,
            ObjectData::Mesh {
                mesh: spec.mesh,
                role: Some(spec.role),
            },
        )
    }

    fn create_sky(&mut self, sky: SkySpec) -> ObjectId {
        let id = self.add_object(crate::constants::SKY_WORLD_NAME, ObjectData::World(sky));
        self.world = Some(id);
        id
    }

    fn set_light_transform(
        &mut self,
        id: ObjectId,
        transform: Transform,
    ) -> Result<(), LightPaintError> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(LightPaintError::UnknownObject(id))?;
        match &mut object.data {
            ObjectData::Light(spec) => {
                spec.transform = transform;
                Ok(())
            }
            _ => Err(LightPaintError::UnknownObject(id)),
        }
    }

    fn object_name(&self, id: ObjectId) -> Option<String> {
        self.get(id).map(|o| o.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cube_contents() {
        let scene = MemoryScene::default_cube();
        let names: Vec<&str> = scene.names().collect();
        assert_eq!(names, vec!["Cube", "Light", "Camera"]);
        assert!(scene.active_camera().is_some());
        // The cube is active, not the light
        assert!(scene.active_light().is_none());
    }

    #[test]
    fn test_unique_names() {
        let mut scene = MemoryScene::new();
        scene.add_mesh("Point", MeshData::default());
        let second = scene.add_mesh("Point", MeshData::default());
        let third = scene.add_mesh("Point", MeshData::default());
        assert_eq!(scene.object_name(second).as_deref(), Some("Point.001"));
        assert_eq!(scene.object_name(third).as_deref(), Some("Point.002"));
    }

    #[test]
    fn test_raycast_reports_object() {
        let scene = MemoryScene::default_cube();
        let hit = scene
            .raycast(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -2.0))
            .unwrap();
        assert!((hit.position - Vec3::Z).length() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert_eq!(hit.object, scene.id_of("Cube"));
    }

    #[test]
    fn test_raycast_ignores_non_meshes() {
        let scene = MemoryScene::default_cube();
        // Straight at the light, away from the cube
        assert!(scene
            .raycast(Vec3::new(4.0762, 1.0055, 10.0), Vec3::NEG_Z)
            .is_none());
    }

    #[test]
    fn test_remove_camera_clears_scene_camera() {
        let mut scene = MemoryScene::default_cube();
        let camera = scene.id_of("Camera").unwrap();
        assert!(scene.remove(camera).is_some());
        assert!(scene.active_camera().is_none());
        assert!(scene.remove(camera).is_none());
    }

    #[test]
    fn test_set_light_transform_rejects_meshes() {
        let mut scene = MemoryScene::default_cube();
        let cube = scene.id_of("Cube").unwrap();
        let result = scene.set_light_transform(cube, Transform::default());
        assert!(matches!(result, Err(LightPaintError::UnknownObject(id)) if id == cube));
    }

    #[test]
    fn test_active_light() {
        let mut scene = MemoryScene::default_cube();
        let light = scene.id_of("Light").unwrap();
        assert!(scene.set_active(light));
        let (id, spec) = scene.active_light().unwrap();
        assert_eq!(id, light);
        assert_eq!(spec.base_name(), "Point");
        assert!(!scene.set_active(ObjectId(999)));
    }

    #[test]
    fn test_scene_json_roundtrip() {
        let scene = MemoryScene::default_cube();
        let json = serde_json::to_string(&scene).unwrap();
        let restored: MemoryScene = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scene);
    }

    fn light_only_json(next_id: u64) -> String {
        let mut scene = MemoryScene::new();
        let light = *MemoryScene::default_cube()
            .light(ObjectId(1))
            .unwrap();
        scene.add_light("Light", light);
        let mut value = serde_json::to_value(&scene).unwrap();
        value["next_id"] = next_id.into();
        value.to_string()
    }

    #[test]
    fn test_loaded_scene_allocates_fresh_ids() {
        let mut scene: MemoryScene = serde_json::from_str(&light_only_json(0)).unwrap();
        let light = scene.id_of("Light").unwrap();

        let other = scene.add_mesh("Other", MeshData::default());
        assert_ne!(other, light);
        assert_eq!(scene.object_name(other).as_deref(), Some("Other"));
        assert_eq!(scene.object_name(light).as_deref(), Some("Light"));
    }

    #[test]
    fn test_loaded_scene_keeps_higher_next_id() {
        let mut scene: MemoryScene = serde_json::from_str(&light_only_json(7)).unwrap();
        assert_eq!(scene.add_mesh("Other", MeshData::default()), ObjectId(7));
    }

    #[test]
    fn test_duplicate_object_ids_are_rejected() {
        let mut value = serde_json::to_value(MemoryScene::default_cube()).unwrap();
        value["objects"][1]["id"] = 0.into();
        let err = serde_json::from_value::<MemoryScene>(value).unwrap_err();
        assert!(err.to_string().contains("used more than once"));
    }

    #[test]
    fn test_scene_with_dangling_triangle_is_rejected() {
        let mut value = serde_json::to_value(MemoryScene::default_cube()).unwrap();
        value["objects"][0]["data"]["Mesh"]["mesh"]["triangles"][0][0] = 99.into();
        let err = serde_json::from_value::<MemoryScene>(value).unwrap_err();
        assert!(err.to_string().contains("references vertex 99"));
    }
}
