//! The collision engine: bodies, contacts, narrow phase, and the world
//!
//! The registry and contact state live in [`world::PhysicsWorld`]; the
//! geometric machinery is under [`collision`].

pub mod body;
pub mod collision;
pub mod contact;
pub mod world;

pub use body::{Collider, ColliderKey, RigidBody};
pub use collision::{ColliderShape, ContactGeometry, ShapeError, WorldShape};
pub use contact::{Contact, ContactEvent, ContactPair, ContactSet};
pub use world::{PhysicsEnvironment, PhysicsWorld};
