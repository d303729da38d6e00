//! # physics2d
//!
//! A hand-rolled 2D rigid-body collision engine: circles and convex
//! polygons, separating-axis narrow phase, positional correction with
//! velocity reflection, and edge-triggered contact notifications, all
//! driven by an explicit fixed-timestep [`tick`](physics::PhysicsWorld::tick).
//!
//! The engine owns no transforms. The surrounding object system keeps
//! position, rotation and scale for every body and lends them to the world
//! each tick through the [`PhysicsEnvironment`](physics::PhysicsEnvironment)
//! trait, which also carries contact enter events back out.
//!
//! ## Quick start
//!
//! ```rust
//! use physics2d::prelude::*;
//! use std::collections::HashMap;
//!
//! #[derive(Default)]
//! struct Scene {
//!     transforms: HashMap<ColliderKey, Transform2>,
//! }
//!
//! impl PhysicsEnvironment for Scene {
//!     fn transform(&self, key: ColliderKey) -> Transform2 {
//!         self.transforms.get(&key).copied().unwrap_or_default()
//!     }
//!
//!     fn set_position(&mut self, key: ColliderKey, position: Vec2) {
//!         self.transforms.entry(key).or_default().position = position;
//!     }
//! }
//!
//! let mut world = PhysicsWorld::new();
//! let mut scene = Scene::default();
//!
//! let ball = world.register(
//!     Collider::new(ColliderShape::circle(1.0)).with_body(RigidBody::new()),
//! );
//! scene
//!     .transforms
//!     .insert(ball, Transform2::from_position(Vec2::new(0.0, 3.0)));
//!
//! world.tick(1.0 / 60.0, &mut scene);
//! assert_eq!(world.collider_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

pub use config::{Config, ConfigError, SimulationConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, SimulationConfig},
        foundation::math::{Extent2, Transform2, Vec2},
        physics::{
            Collider, ColliderKey, ColliderShape, Contact, ContactEvent, PhysicsEnvironment,
            PhysicsWorld, RigidBody,
        },
    };
}
