//! Colliders and rigid bodies
//!
//! A collider owns its shape and an optional rigid body; a collider without
//! a rigid body is static and never moves. The world hands out [`ColliderKey`]
//! handles; the external object system keeps ownership of position, rotation
//! and scale and supplies them fresh each tick.

use slotmap::new_key_type;

use super::collision::shape::{ColliderShape, WorldShape};
use crate::foundation::math::Vec2;

new_key_type! {
    /// Stable handle to a registered collider
    pub struct ColliderKey;
}

/// Velocity state for a dynamic collider
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidBody {
    /// Linear velocity in units per second
    pub velocity: Vec2,
}

impl RigidBody {
    /// Create a rigid body at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rigid body with an initial velocity
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

/// A collidable body registered with the world
///
/// The shape is fixed for the collider's lifetime. The world-space geometry
/// cache is rebuilt once per tick and cleared for bodies whose geometry
/// cannot be tested that tick.
#[derive(Debug, Clone)]
pub struct Collider {
    /// The collision shape, in model space
    pub shape: ColliderShape,

    /// Rigid body state; `None` makes this collider static
    pub body: Option<RigidBody>,

    /// World-space geometry cache, valid for the current tick only
    pub(crate) world_shape: Option<WorldShape>,
}

impl Collider {
    /// Create a static collider with the given shape
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            body: None,
            world_shape: None,
        }
    }

    /// Attach a rigid body, making this collider dynamic
    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether this collider has no rigid body and therefore never moves
    pub fn is_static(&self) -> bool {
        self.body.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collider_without_body_is_static() {
        let collider = Collider::new(ColliderShape::circle(1.0));
        assert!(collider.is_static());
    }

    #[test]
    fn test_with_body_makes_collider_dynamic() {
        let collider = Collider::new(ColliderShape::circle(1.0))
            .with_body(RigidBody::with_velocity(Vec2::new(1.0, 0.0)));
        assert!(!collider.is_static());
        assert_eq!(collider.body.unwrap().velocity, Vec2::new(1.0, 0.0));
    }
}
