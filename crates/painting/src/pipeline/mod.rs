//! Operator pipeline
//!
//! This module connects the pieces an operator runs through:
//! - Stroke capture (from host mouse events via [`ModalOperator`])
//! - Geometry sampler (stroke to surface hits)
//! - Fitting engine (hits to a fitted shape)
//! - Light factory or adjustment engine (shape to a scene change)
//!
//! Every operator first plans a single [`SceneChange`] against a read-only
//! scene and only then commits it, so a failing operator leaves the scene
//! untouched.

mod modal;
mod operators;
mod stroke;

use lightpaint_config::PaintConfig;
use lightpaint_ipc::{MousePath, OperatorCall, OperatorReport};
use tracing::{info, warn};

use crate::error::LightPaintError;
use crate::projection::ViewTransform;
use crate::scene::Scene;
use crate::types::{LightSpec, MeshObjectSpec, ObjectId, SkySpec, Stroke, Transform};
use crate::validation::stroke_from_path;

pub use modal::{ModalEvent, ModalOperator, ModalPhase};
pub use operators::plan;
pub use stroke::StrokeCapture;

/// The one scene mutation an operator performs
#[derive(Debug, Clone, PartialEq)]
pub enum SceneChange {
    AddLight(LightSpec),
    AddMesh(MeshObjectSpec),
    AddSky(SkySpec),
    MoveLight { id: ObjectId, transform: Transform },
}

/// What a committed operator did to the scene
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorOutcome {
    /// A new object (light, mesh or world) was created
    Created { object: ObjectId, name: String },
    /// An existing light was moved
    Moved {
        object: ObjectId,
        name: String,
        transform: Transform,
    },
}

impl OperatorOutcome {
    pub fn object(&self) -> ObjectId {
        match self {
            OperatorOutcome::Created { object, .. } | OperatorOutcome::Moved { object, .. } => {
                *object
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OperatorOutcome::Created { name, .. } | OperatorOutcome::Moved { name, .. } => name,
        }
    }
}

/// Apply a planned change
pub fn commit<S: Scene + ?Sized>(
    change: SceneChange,
    scene: &mut S,
) -> Result<OperatorOutcome, LightPaintError> {
    let (object, moved) = match change {
        SceneChange::AddLight(spec) => (scene.create_light(spec), None),
        SceneChange::AddMesh(spec) => (scene.create_mesh(spec), None),
        SceneChange::AddSky(sky) => (scene.create_sky(sky), None),
        SceneChange::MoveLight { id, transform } => {
            scene.set_light_transform(id, transform)?;
            (id, Some(transform))
        }
    };

    let name = scene
        .object_name(object)
        .ok_or(LightPaintError::UnknownObject(object))?;
    Ok(match moved {
        Some(transform) => OperatorOutcome::Moved {
            object,
            name,
            transform,
        },
        None => OperatorOutcome::Created { object, name },
    })
}

/// Run an operator on a finished stroke
pub fn execute<S: Scene + ?Sized>(
    call: &OperatorCall,
    stroke: &Stroke,
    view: &ViewTransform,
    scene: &mut S,
    config: &PaintConfig,
) -> Result<OperatorOutcome, LightPaintError> {
    let change = match plan(call, stroke, view, &*scene, config) {
        Ok(change) => change,
        Err(err) => {
            warn!("{} cancelled: {}", call.id(), err);
            return Err(err);
        }
    };
    let outcome = commit(change, scene)?;
    info!("{} finished: {}", call.id(), outcome.name());
    Ok(outcome)
}

/// Run an operator on a recorded mouse path, without a modal session
pub fn run_literal<S: Scene + ?Sized>(
    call: &OperatorCall,
    path: &MousePath,
    view: &ViewTransform,
    scene: &mut S,
    config: &PaintConfig,
) -> Result<OperatorOutcome, LightPaintError> {
    let stroke = stroke_from_path(path)?;
    execute(call, &stroke, view, scene, config)
}

/// Host-facing report for an operator result
pub fn report(call: &OperatorCall, result: &Result<OperatorOutcome, LightPaintError>) -> OperatorReport {
    match result {
        Ok(outcome) => OperatorReport::Finished {
            operator: call.id(),
            object: outcome.name().to_string(),
        },
        Err(err) => OperatorReport::Cancelled {
            operator: call.id(),
            code: err.code().to_string(),
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use glam::{Vec2, Vec3};
    use lightpaint_ipc::{
        AdjustParams, AxisMode, LampParams, LampType, SkyParams, StrokeParams, VisibilityParams,
    };

    const VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

    fn camera_view(scene: &MemoryScene) -> ViewTransform {
        ViewTransform::from_camera(&scene.active_camera().unwrap(), VIEWPORT)
    }

    /// Screen path over the given world points, as seen by the scene camera
    fn path_over(view: &ViewTransform, points: &[Vec3]) -> MousePath {
        MousePath(
            points
                .iter()
                .map(|p| view.world_to_screen(*p).unwrap().to_array())
                .collect(),
        )
    }

    /// A short stroke across the cube's top face
    fn top_stroke(view: &ViewTransform) -> MousePath {
        path_over(
            view,
            &[
                Vec3::new(-0.5, -0.5, 1.0),
                Vec3::new(0.0, -0.3, 1.0),
                Vec3::new(0.5, 0.0, 1.0),
                Vec3::new(0.2, 0.5, 1.0),
            ],
        )
    }

    fn lamp_call(lamp_type: LampType, visibility: VisibilityParams) -> OperatorCall {
        OperatorCall::Lamp(LampParams {
            offset: 10.0,
            lamp_type,
            visibility,
            ..LampParams::default()
        })
    }

    fn adjust_call(axis: AxisMode, offset: f32) -> OperatorCall {
        OperatorCall::LampAdjust(AdjustParams {
            axis,
            offset,
            ..AdjustParams::default()
        })
    }

    fn select_light(scene: &mut MemoryScene) -> ObjectId {
        let light = scene.id_of("Light").unwrap();
        assert!(scene.set_active(light));
        light
    }

    fn assert_vec_near(actual: Vec3, expected: Vec3, tolerance: f32) {
        assert!(
            (actual - expected).abs().max_element() < tolerance,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_every_creating_operator_adds_one_object() {
        let mut scene = MemoryScene::default_cube();
        let view = camera_view(&scene);
        let path = top_stroke(&view);
        let config = PaintConfig::default();

        let calls = [
            lamp_call(LampType::Point, VisibilityParams::default()),
            lamp_call(LampType::Spot, VisibilityParams::default()),
            lamp_call(LampType::Area, VisibilityParams::default()),
            OperatorCall::Mesh(StrokeParams::default()),
            OperatorCall::TubeLight(StrokeParams::default()),
            OperatorCall::Sky(SkyParams::default()),
        ];
        for call in &calls {
            let before = scene.objects().len();
            let outcome = run_literal(call, &path, &view, &mut scene, &config).unwrap();
            assert_eq!(scene.objects().len(), before + 1, "{}", call.id());
            assert!(matches!(outcome, OperatorOutcome::Created { .. }));
        }

        select_light(&mut scene);
        let before = scene.objects().len();
        run_literal(&OperatorCall::Flag(StrokeParams::default()), &path, &view, &mut scene, &config)
            .unwrap();
        assert_eq!(scene.objects().len(), before + 1);

        for name in [
            "Point",
            "Spot",
            "Area",
            "LightPaint_Convex",
            "LightPaint_Tube",
            "LightPaint_Sky",
            "LightPaint_Flag",
        ] {
            assert!(scene.find(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_repeated_lamp_creates_distinct_identical_lights() {
        let mut scene = MemoryScene::default_cube();
        let view = camera_view(&scene);
        let path = top_stroke(&view);
        let call = lamp_call(LampType::Spot, VisibilityParams::default());
        let config = PaintConfig::default();

        let first = run_literal(&call, &path, &view, &mut scene, &config).unwrap();
        let second = run_literal(&call, &path, &view, &mut scene, &config).unwrap();
        assert_ne!(first.object(), second.object());
        assert_eq!(first.name(), "Spot");
        assert_eq!(second.name(), "Spot.001");
        assert_eq!(scene.light(first.object()), scene.light(second.object()));
    }

    #[test]
    fn test_lamp_sits_above_top_face() {
        let mut scene = MemoryScene::default_cube();
        let view = camera_view(&scene);
        let path = top_stroke(&view);
        let outcome = run_literal(
            &lamp_call(LampType::Point, VisibilityParams::default()),
            &path,
            &view,
            &mut scene,
            &PaintConfig::default(),
        )
        .unwrap();
        let light = scene.light(outcome.object()).unwrap();
        assert!((light.transform.location.z - 11.0).abs() < 1e-3);
        assert_vec_near(light.transform.forward(), Vec3::NEG_Z, 1e-4);
    }

    #[test]
    fn test_hidden_visibility_zeroes_factors() {
        let mut scene = MemoryScene::default_cube();
        let view = camera_view(&scene);
        let path = top_stroke(&view);
        let config = PaintConfig::default();

        let outcome = run_literal(
            &lamp_call(LampType::Point, VisibilityParams::hidden()),
            &path,
            &view,
            &mut scene,
            &config,
        )
        .unwrap();
        let light = scene.light(outcome.object()).unwrap();
        assert!(!light.visibility.camera);
        assert!(!light.visibility.diffuse);
        assert!(!light.visibility.glossy);
        assert!(!light.visibility.volume_scatter);
        assert_eq!(light.factors.diffuse, 0.0);
        assert_eq!(light.factors.specular, 0.0);
        assert_eq!(light.factors.volume, 0.0);

        let sky_call = OperatorCall::Sky(SkyParams {
            visibility: VisibilityParams::hidden(),
            ..SkyParams::default()
        });
        run_literal(&sky_call, &path, &view, &mut scene, &config).unwrap();
        let world = scene.world().unwrap().visibility;
        assert!(!world.camera && !world.diffuse && !world.glossy && !world.scatter);
        // Painted on the top face: the sun is overhead
        assert!((scene.world().unwrap().sun_elevation - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn test_world_axis_adjustments() {
        let mut scene = MemoryScene::default_cube();
        let light = select_light(&mut scene);
        let view = camera_view(&scene);
        let path = top_stroke(&view);
        let config = PaintConfig::default();
        let half_pi = std::f32::consts::FRAC_PI_2;
        let pi = std::f32::consts::PI;

        let cases = [
            (AxisMode::X, 1.0, Vec3::X, Vec3::new(0.0, half_pi, 0.0)),
            (AxisMode::Y, 1.0, Vec3::Y, Vec3::new(-half_pi, 0.0, 0.0)),
            (AxisMode::Z, 1.0, Vec3::Z, Vec3::ZERO),
            (AxisMode::Z, -1.0, Vec3::NEG_Z, Vec3::new(pi, 0.0, half_pi)),
        ];
        for (axis, offset, location, rotation) in cases {
            let outcome =
                run_literal(&adjust_call(axis, offset), &path, &view, &mut scene, &config).unwrap();
            assert_eq!(outcome.object(), light);
            let transform = scene.light(light).unwrap().transform;
            assert_vec_near(transform.location, location, 1e-4);
            assert_vec_near(transform.rotation, rotation, 1e-4);
        }
    }

    #[test]
    fn test_normal_adjustment_on_top_face() {
        let mut scene = MemoryScene::default_cube();
        let light = select_light(&mut scene);
        let view = camera_view(&scene);
        let path = path_over(&view, &[Vec3::new(0.25, 0.25, 1.0)]);

        run_literal(
            &adjust_call(AxisMode::Normal, 2.0),
            &path,
            &view,
            &mut scene,
            &PaintConfig::default(),
        )
        .unwrap();
        let transform = scene.light(light).unwrap().transform;
        assert_vec_near(transform.location, Vec3::new(0.25, 0.25, 3.0), 1e-3);
        assert_vec_near(transform.rotation, Vec3::ZERO, 1e-4);
    }

    #[test]
    fn test_reflect_adjustment_through_default_camera() {
        let mut scene = MemoryScene::default_cube();
        let light = select_light(&mut scene);
        let view = camera_view(&scene);
        let path = path_over(&view, &[Vec3::new(1.0, -0.9413, 0.6738)]);

        run_literal(
            &adjust_call(AxisMode::Reflect, 1.0),
            &path,
            &view,
            &mut scene,
            &PaintConfig::default(),
        )
        .unwrap();
        let transform = scene.light(light).unwrap().transform;
        assert_vec_near(transform.location, Vec3::new(1.6538, -0.3259, 0.2333), 1e-3);
        assert_vec_near(transform.rotation, Vec3::new(-2.1921, 0.7125, -1.2535), 1e-3);
    }

    #[test]
    fn test_reflect_without_camera_leaves_light() {
        let mut scene = MemoryScene::default_cube();
        let light = select_light(&mut scene);
        let view = camera_view(&scene);
        let path = path_over(&view, &[Vec3::new(1.0, -0.9413, 0.6738)]);
        let camera = scene.id_of("Camera").unwrap();
        scene.remove(camera);
        let before = scene.clone();

        let result = run_literal(
            &adjust_call(AxisMode::Reflect, 1.0),
            &path,
            &view,
            &mut scene,
            &PaintConfig::default(),
        );
        assert!(matches!(result, Err(LightPaintError::NoCamera)));
        assert_eq!(scene, before);
        assert!(scene.light(light).is_some());
    }

    #[test]
    fn test_stroke_missing_geometry_fails_without_mutation() {
        let mut scene = MemoryScene::default_cube();
        let view = camera_view(&scene);
        let before = scene.clone();
        let path = MousePath(vec![[5.0, 5.0], [10.0, 5.0]]);

        let result = run_literal(
            &OperatorCall::Mesh(StrokeParams::default()),
            &path,
            &view,
            &mut scene,
            &PaintConfig::default(),
        );
        assert!(matches!(result, Err(LightPaintError::NoSurfaceHit { samples: 2 })));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_empty_and_invalid_paths() {
        let mut scene = MemoryScene::default_cube();
        let view = camera_view(&scene);
        let call = lamp_call(LampType::Point, VisibilityParams::default());
        let config = PaintConfig::default();

        let empty = run_literal(&call, &MousePath::default(), &view, &mut scene, &config);
        assert!(matches!(empty, Err(LightPaintError::EmptyStroke)));

        let invalid = MousePath(vec![[f32::INFINITY, 0.0]]);
        let result = run_literal(&call, &invalid, &view, &mut scene, &config);
        let err = result.unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn test_flag_requires_active_light() {
        let mut scene = MemoryScene::default_cube();
        let view = camera_view(&scene);
        let path = top_stroke(&view);
        let result = run_literal(
            &OperatorCall::Flag(StrokeParams::default()),
            &path,
            &view,
            &mut scene,
            &PaintConfig::default(),
        );
        assert!(matches!(result, Err(LightPaintError::NoActiveLight)));
    }

    #[test]
    fn test_report_codes() {
        let call = adjust_call(AxisMode::Reflect, 1.0);
        let report = report(&call, &Err(LightPaintError::NoCamera));
        assert_eq!(
            report,
            OperatorReport::Cancelled {
                operator: "lightpainter.lamp_adjust".to_string(),
                code: "precondition_missing".to_string(),
                message: "No active camera in the scene".to_string(),
            }
        );
    }
}
