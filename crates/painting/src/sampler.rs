//! Geometry sampler: turns a screen stroke into surface hits.

use tracing::{debug, trace};

use crate::projection::ViewTransform;
use crate::scene::Scene;
use crate::types::{HitPoint, Stroke};

/// Cast one ray per stroke point and collect the surface hits.
///
/// Points that miss all geometry are skipped. A hit on the same object
/// within `dedup_tolerance` of the previously kept hit is dropped, so a
/// stroke that lingers in one place contributes a single sample.
pub fn sample<S: Scene + ?Sized>(
    stroke: &Stroke,
    view: &ViewTransform,
    scene: &S,
    dedup_tolerance: f32,
) -> Vec<HitPoint> {
    let mut hits: Vec<HitPoint> = Vec::with_capacity(stroke.len());
    let mut misses = 0usize;

    for &point in stroke.points() {
        let ray = view.screen_to_ray(point);
        let Some(hit) = scene.raycast(ray.origin, ray.direction) else {
            misses += 1;
            continue;
        };

        if let Some(last) = hits.last() {
            if last.object == hit.object
                && last.position.distance(hit.position) < dedup_tolerance
            {
                trace!("Dropping duplicate hit at {:?}", hit.position);
                continue;
            }
        }
        hits.push(hit);
    }

    debug!(
        "Sampled {} points: {} hits, {} misses",
        stroke.len(),
        hits.len(),
        misses
    );
    hits
}
