//! Operator protocol for Light Paint
//!
//! Defines the typed operator calls a host (panel UI, scripted harness)
//! sends to the light painting core, the reports it gets back, and the raw
//! input events used to replay a modal session.

mod commands;
mod error;
mod input;
mod messages;
mod types;

pub use commands::*;
pub use error::*;
pub use input::*;
pub use messages::*;
pub use types::*;
