//! Type definitions for operator parameters.

mod mouse_path;
mod params;

pub use mouse_path::*;
pub use params::*;
