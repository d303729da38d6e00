//! Collision geometry and narrow-phase tests
//!
//! # Architecture
//!
//! - **Model space storage**: collider shapes live in local coordinates
//! - **Once-per-tick transformation**: world geometry is rebuilt from the
//!   externally owned transform at the start of every tick and cached
//! - **Fixed normal convention**: every test reports its normal from shape A
//!   towards shape B; the reciprocal view is the exact negation
//!
//! # Module organization
//!
//! - [`polygon`] - convex polygon utilities (projection, containment,
//!   closest point)
//! - [`shape`] - model-space shape descriptors and world-space geometry
//! - [`narrow_phase`] - the circle/circle, circle/polygon and
//!   polygon/polygon contact tests plus kind dispatch

pub mod narrow_phase;
pub mod polygon;
pub mod shape;

// Re-export commonly used types
pub use narrow_phase::{test_pair, ContactGeometry};
pub use shape::{ColliderShape, ShapeError, WorldShape};
