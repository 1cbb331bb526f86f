//! Light painting core - paint on screen, get lights in the scene
//!
//! This crate turns screen-space strokes into lights and light-shaping
//! geometry:
//! - [`sampler`] - Ray-casts stroke points against the scene
//! - [`fitting`] - Convex hull, tube and centroid fits of the hits
//! - [`factory`] - Lights, skies, emitter meshes and flags from fitted shapes
//! - [`adjust`] - Moves an existing light along axes, normals and reflections
//! - [`pipeline`] - Operator planning/commit and the modal controller
//! - [`registry`] - Operator registration and teardown
//! - [`scene`] - The scene capability trait and an in-memory scene

pub mod adjust;
pub mod constants;
pub mod error;
pub mod factory;
pub mod fitting;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod raycast;
pub mod registry;
pub mod rotation;
pub mod sampler;
pub mod scene;
pub mod types;
pub mod validation;

pub use adjust::*;
pub use constants::*;
pub use error::*;
pub use factory::*;
pub use fitting::*;
pub use mesh::*;
pub use pipeline::*;
pub use projection::*;
pub use registry::*;
pub use rotation::*;
pub use sampler::*;
pub use scene::*;
pub use types::*;
pub use validation::*;
