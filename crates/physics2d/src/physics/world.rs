//! The simulation world and its fixed-timestep tick
//!
//! [`PhysicsWorld`] owns the collider registry and the per-tick contact
//! bookkeeping. One call to [`PhysicsWorld::tick`] runs the five phases in
//! strict order: rebuild world geometry, detect contacts over all pairs,
//! resolve penetration and velocity, integrate motion, and notify newly
//! formed contacts. The external object system stays the owner of every
//! body's transform and participates through [`PhysicsEnvironment`].
//!
//! Velocity resolution reflects each dynamic body's velocity to point away
//! from the other body while preserving speed. This is an intentional
//! simplification of an impulse response, not a momentum-conserving one,
//! and it applies every tick while a pair stays in contact.

use std::collections::{HashMap, HashSet};

use log::{trace, warn};
use slotmap::SlotMap;

use super::body::{Collider, ColliderKey};
use super::collision::narrow_phase;
use super::contact::{Contact, ContactEvent, ContactPair, ContactSet};
use crate::config::SimulationConfig;
use crate::foundation::math::{Extent2, Transform2, Vec2};

/// Residual overlap below which a contact needs no further correction
const DEPTH_EPSILON: f32 = 1e-6;

/// Speed below which a velocity has no usable direction to reflect
const SPEED_EPSILON: f32 = 1e-6;

/// Services the world consumes from, and feeds back to, its environment
///
/// The environment owns every body's transform; the engine reads it fresh
/// each tick and writes back nothing but position. Contact enter events are
/// delivered here during the notify phase.
pub trait PhysicsEnvironment {
    /// Current transform of a collider, queried once per tick per collider
    /// during geometry rebuild and again when positions are written back
    fn transform(&self, collider: ColliderKey) -> Transform2;

    /// Write a collider's corrected or integrated position back
    fn set_position(&mut self, collider: ColliderKey, position: Vec2);

    /// Default extent box for a collider without an explicit shape size
    fn default_extent(&self, _collider: ColliderKey) -> Option<Extent2> {
        None
    }

    /// A contact formed this tick that did not exist last tick; called once
    /// per side with the normal oriented away from the receiving collider
    fn on_contact_enter(&mut self, _collider: ColliderKey, _event: &ContactEvent) {}
}

/// The collision world: registry, contact state, and the tick entry point
///
/// Registration and deregistration are queued and only become visible at
/// the next tick boundary, never mid-sweep.
pub struct PhysicsWorld {
    colliders: SlotMap<ColliderKey, Collider>,

    /// Active colliders in registration order; fixes the all-pairs sweep
    /// order so a tick is deterministic
    order: Vec<ColliderKey>,

    pending_add: Vec<ColliderKey>,
    pending_remove: Vec<ColliderKey>,

    /// Contacts of the most recent completed tick
    contacts: ContactSet,

    /// Pair keys of the tick before, kept for the enter diff
    previous_pairs: HashSet<ContactPair>,

    config: SimulationConfig,
}

impl PhysicsWorld {
    /// Create a world with default tuning
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Create a world with the given tuning constants
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            order: Vec::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            contacts: ContactSet::new(),
            previous_pairs: HashSet::new(),
            config,
        }
    }

    /// Queue a collider for registration, effective at the next tick
    pub fn register(&mut self, collider: Collider) -> ColliderKey {
        let key = self.colliders.insert(collider);
        self.pending_add.push(key);
        key
    }

    /// Queue a collider for removal, effective at the next tick
    pub fn unregister(&mut self, key: ColliderKey) {
        self.pending_remove.push(key);
    }

    /// Access a registered collider
    pub fn collider(&self, key: ColliderKey) -> Option<&Collider> {
        self.colliders.get(key)
    }

    /// Mutable access to a registered collider (e.g. to set its velocity)
    pub fn collider_mut(&mut self, key: ColliderKey) -> Option<&mut Collider> {
        self.colliders.get_mut(key)
    }

    /// Number of registered colliders, including ones pending activation
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// The tuning constants in use
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Mutable access to the tuning constants
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Contacts found by the most recent tick
    pub fn contacts(&self) -> &ContactSet {
        &self.contacts
    }

    /// Whether the collider was in contact with anything last tick
    pub fn is_colliding(&self, key: ColliderKey) -> bool {
        self.contacts.iter().any(|c| c.a == key || c.b == key)
    }

    /// All colliders the given one was in contact with last tick
    pub fn colliding_with(&self, key: ColliderKey) -> Vec<ColliderKey> {
        self.contacts.iter().filter_map(|c| c.other(key)).collect()
    }

    /// Drop all colliders and contact state
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.order.clear();
        self.pending_add.clear();
        self.pending_remove.clear();
        self.contacts.clear();
        self.previous_pairs.clear();
    }

    /// Run one fixed-timestep simulation step
    ///
    /// Phases run in strict sequence: pending registry changes are applied,
    /// world geometry is rebuilt from the environment's transforms, the
    /// all-pairs narrow phase fills the tick's contact set, penetration and
    /// velocity are resolved, motion integrates, and newly formed contacts
    /// are announced. The tick runs to completion synchronously.
    pub fn tick(&mut self, dt: f32, env: &mut dyn PhysicsEnvironment) {
        self.apply_pending();
        self.rebuild_world_shapes(env);
        let current = self.detect();
        self.resolve(&current, env);
        self.integrate(dt, env);
        self.notify(current, env);
    }

    fn apply_pending(&mut self) {
        for key in self.pending_add.drain(..) {
            if self.colliders.contains_key(key) {
                self.order.push(key);
            }
        }
        for key in self.pending_remove.drain(..) {
            self.colliders.remove(key);
            self.order.retain(|k| *k != key);
        }
    }

    /// Phase 1: refresh every collider's world-space geometry
    ///
    /// A body whose geometry cannot be built (malformed polygon, non-finite
    /// transform) is excluded from this tick's detection and logged; this
    /// is never fatal.
    fn rebuild_world_shapes(&mut self, env: &mut dyn PhysicsEnvironment) {
        for &key in &self.order {
            let transform = env.transform(key);
            let extent = env.default_extent(key);
            let collider = &mut self.colliders[key];
            collider.world_shape = match collider.shape.to_world_space(&transform, extent) {
                Ok(shape) => Some(shape),
                Err(err) => {
                    warn!("collider {key:?} excluded from this tick: {err}");
                    None
                }
            };
        }
    }

    /// Phase 2: all-pairs narrow phase over the active colliders
    fn detect(&self) -> ContactSet {
        let mut current = ContactSet::new();
        for i in 0..self.order.len() {
            for j in (i + 1)..self.order.len() {
                let (key_a, key_b) = (self.order[i], self.order[j]);
                let (Some(shape_a), Some(shape_b)) = (
                    self.colliders[key_a].world_shape.as_ref(),
                    self.colliders[key_b].world_shape.as_ref(),
                ) else {
                    continue;
                };
                if let Some(geometry) = narrow_phase::test_pair(shape_a, shape_b) {
                    current.insert(Contact::new(key_a, key_b, geometry));
                }
            }
        }
        trace!(
            "detect: {} active colliders, {} contacts",
            self.order.len(),
            current.len()
        );
        current
    }

    /// Phase 3: positional correction and velocity reflection
    ///
    /// Corrections accumulate across solver passes; each pass only applies
    /// the residual overlap that earlier passes have not yet separated, so
    /// extra iterations damp multi-contact overlap instead of repeating the
    /// full push. A static side receives no correction and its partner
    /// takes all of it.
    fn resolve(&mut self, contacts: &ContactSet, env: &mut dyn PhysicsEnvironment) {
        if contacts.is_empty() {
            return;
        }

        let mut corrections: HashMap<ColliderKey, Vec2> = HashMap::new();
        let iterations = self.config.solver_iterations.max(1);

        for _ in 0..iterations {
            for contact in contacts.iter() {
                let a_static = self.colliders[contact.a].is_static();
                let b_static = self.colliders[contact.b].is_static();
                if a_static && b_static {
                    continue;
                }

                let applied_a = corrections
                    .get(&contact.a)
                    .copied()
                    .unwrap_or_else(Vec2::zeros);
                let applied_b = corrections
                    .get(&contact.b)
                    .copied()
                    .unwrap_or_else(Vec2::zeros);
                let separated = (applied_b - applied_a).dot(&contact.normal);
                let residual = contact.depth - separated;
                if residual <= DEPTH_EPSILON {
                    continue;
                }

                let (share_a, share_b) = if a_static {
                    (0.0, 1.0)
                } else if b_static {
                    (1.0, 0.0)
                } else {
                    (1.0 - self.config.correction_split, self.config.correction_split)
                };

                if share_a > 0.0 {
                    *corrections.entry(contact.a).or_insert_with(Vec2::zeros) -=
                        contact.normal * (residual * share_a);
                }
                if share_b > 0.0 {
                    *corrections.entry(contact.b).or_insert_with(Vec2::zeros) +=
                        contact.normal * (residual * share_b);
                }
            }
        }

        for (&key, correction) in &corrections {
            let position = env.transform(key).position + correction;
            env.set_position(key, position);
        }

        // Reflect velocities: each dynamic side ends up moving away from the
        // other at unchanged speed.
        for contact in contacts.iter() {
            self.reflect_velocity(contact.a, -contact.normal);
            self.reflect_velocity(contact.b, contact.normal);
        }
    }

    fn reflect_velocity(&mut self, key: ColliderKey, away: Vec2) {
        if let Some(body) = self.colliders[key].body.as_mut() {
            let speed = body.velocity.norm();
            if speed > SPEED_EPSILON {
                body.velocity = away * speed;
            }
        }
    }

    /// Phase 4: advance every dynamic collider by its velocity
    fn integrate(&mut self, dt: f32, env: &mut dyn PhysicsEnvironment) {
        for &key in &self.order {
            let Some(body) = self.colliders[key].body else {
                continue;
            };
            let position = env.transform(key).position + body.velocity * dt;
            env.set_position(key, position);
        }
    }

    /// Phase 5: announce contacts that formed this tick
    ///
    /// Each side of a newly formed pair receives one event with the normal
    /// oriented away from itself. Persisting pairs are not re-announced and
    /// separating pairs produce nothing.
    fn notify(&mut self, current: ContactSet, env: &mut dyn PhysicsEnvironment) {
        for contact in current.entered_since(&self.previous_pairs) {
            env.on_contact_enter(
                contact.a,
                &ContactEvent {
                    other: contact.b,
                    point: contact.point,
                    normal: contact.normal,
                },
            );
            env.on_contact_enter(
                contact.b,
                &ContactEvent {
                    other: contact.a,
                    point: contact.point,
                    normal: -contact.normal,
                },
            );
        }
        self.previous_pairs = current.pairs();
        self.contacts = current;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
