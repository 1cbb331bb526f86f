//! Per-operator planning: stroke in, one scene change out.

use glam::Vec3;
use lightpaint_config::PaintConfig;
use lightpaint_ipc::{AdjustParams, LampParams, OperatorCall, SkyParams};
use tracing::debug;

use crate::adjust::adjust;
use crate::error::LightPaintError;
use crate::factory::{build_flag, build_hull_mesh, build_lamp, build_sky, build_tube_mesh};
use crate::fitting::{fit, FitMode, FittedShape};
use crate::projection::ViewTransform;
use crate::sampler::sample;
use crate::scene::Scene;
use crate::types::{HitPoint, Stroke};

use super::SceneChange;

/// Work out what an operator would do, without touching the scene.
///
/// Every precondition is checked here, so a successful plan always commits.
pub fn plan<S: Scene + ?Sized>(
    call: &OperatorCall,
    stroke: &Stroke,
    view: &ViewTransform,
    scene: &S,
    config: &PaintConfig,
) -> Result<SceneChange, LightPaintError> {
    if stroke.is_empty() {
        return Err(LightPaintError::EmptyStroke);
    }
    debug!("Planning {} with {} stroke points", call.id(), stroke.len());

    let painter = Painter {
        stroke,
        view,
        scene,
        config,
    };
    match call {
        OperatorCall::Lamp(params) => painter.lamp(params),
        OperatorCall::Mesh(_) => {
            let shape = painter.fit(FitMode::ConvexHull)?;
            Ok(SceneChange::AddMesh(build_hull_mesh(&shape, config)))
        }
        OperatorCall::TubeLight(_) => {
            let shape = painter.fit(FitMode::Tube)?;
            Ok(SceneChange::AddMesh(build_tube_mesh(&shape, config)))
        }
        OperatorCall::Sky(params) => painter.sky(params),
        OperatorCall::Flag(_) => painter.flag(),
        OperatorCall::LampAdjust(params) => painter.adjust(params),
    }
}

struct Painter<'a, S: ?Sized> {
    stroke: &'a Stroke,
    view: &'a ViewTransform,
    scene: &'a S,
    config: &'a PaintConfig,
}

impl<S: Scene + ?Sized> Painter<'_, S> {
    /// Direction from the surface toward the viewer
    fn fallback_normal(&self) -> Vec3 {
        -self.view.forward()
    }

    fn sample(&self) -> Vec<HitPoint> {
        sample(self.stroke, self.view, self.scene, self.config.dedup_tolerance)
    }

    fn hits(&self) -> Result<Vec<HitPoint>, LightPaintError> {
        let hits = self.sample();
        if hits.is_empty() {
            return Err(LightPaintError::NoSurfaceHit {
                samples: self.stroke.len(),
            });
        }
        Ok(hits)
    }

    fn fit(&self, mode: FitMode) -> Result<FittedShape, LightPaintError> {
        let hits = self.hits()?;
        fit(&hits, mode, self.fallback_normal(), self.config).ok_or(LightPaintError::NoSurfaceHit {
            samples: self.stroke.len(),
        })
    }

    fn lamp(&self, params: &LampParams) -> Result<SceneChange, LightPaintError> {
        let shape = self.fit(FitMode::Centroid)?;
        Ok(SceneChange::AddLight(build_lamp(
            &shape,
            params.lamp_type,
            params.offset,
            params.visibility,
            self.config,
        )))
    }

    fn sky(&self, params: &SkyParams) -> Result<SceneChange, LightPaintError> {
        let hits = self.hits()?;
        Ok(SceneChange::AddSky(build_sky(
            &hits,
            params.normal_method,
            self.fallback_normal(),
            params.visibility,
            self.config,
        )))
    }

    fn flag(&self) -> Result<SceneChange, LightPaintError> {
        let (_, light) = self
            .scene
            .active_light()
            .ok_or(LightPaintError::NoActiveLight)?;
        let shape = self.fit(FitMode::Centroid)?;
        Ok(SceneChange::AddMesh(build_flag(
            &shape,
            light.transform.location,
            self.config,
        )))
    }

    fn adjust(&self, params: &AdjustParams) -> Result<SceneChange, LightPaintError> {
        let (id, light) = self
            .scene
            .active_light()
            .ok_or(LightPaintError::NoActiveLight)?;
        let camera = self.scene.active_camera();
        let hits = if params.axis.needs_surface() {
            self.sample()
        } else {
            Vec::new()
        };

        let transform = adjust(
            &light.transform,
            params.axis,
            params.offset,
            &hits,
            camera.as_ref(),
        )?;
        Ok(SceneChange::MoveLight { id, transform })
    }
}
