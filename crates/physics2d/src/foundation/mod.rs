//! Foundation utilities shared across the engine
//!
//! Math types and logging helpers with no dependency on the physics modules.

pub mod logging;
pub mod math;

pub use math::{Extent2, Transform2, Vec2};
