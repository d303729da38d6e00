//! Contact records and the per-tick contact set
//!
//! Contacts are keyed by the unordered collider pair, so each pair is
//! detected and stored once per tick regardless of sweep order. The
//! previous tick's pair set is retained only to decide which contacts are
//! newly formed.

use std::collections::{HashMap, HashSet};

use super::body::ColliderKey;
use super::collision::narrow_phase::ContactGeometry;
use crate::foundation::math::Vec2;

/// Unordered collider pair, normalized so the smaller key comes first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactPair {
    /// First collider of the pair (smaller key)
    pub a: ColliderKey,
    /// Second collider of the pair
    pub b: ColliderKey,
}

impl ContactPair {
    /// Create a normalized pair; `new(a, b)` and `new(b, a)` are equal
    pub fn new(a: ColliderKey, b: ColliderKey) -> Self {
        if a < b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

/// A contact between two colliders produced by one tick's detection sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// First collider (A of the normal convention)
    pub a: ColliderKey,

    /// Second collider
    pub b: ColliderKey,

    /// Contact point in world space
    pub point: Vec2,

    /// Unit normal pointing from A towards B
    pub normal: Vec2,

    /// Penetration depth along the normal
    pub depth: f32,
}

impl Contact {
    /// Build a contact from the narrow-phase geometry for a keyed pair
    pub fn new(a: ColliderKey, b: ColliderKey, geometry: ContactGeometry) -> Self {
        Self {
            a,
            b,
            point: geometry.point,
            normal: geometry.normal,
            depth: geometry.depth,
        }
    }

    /// The pair key for this contact
    pub fn pair(&self) -> ContactPair {
        ContactPair::new(self.a, self.b)
    }

    /// The normal as seen from `key`'s side, oriented away from it
    ///
    /// Returns `None` when `key` is not part of this contact.
    pub fn normal_away_from(&self, key: ColliderKey) -> Option<Vec2> {
        if key == self.a {
            Some(self.normal)
        } else if key == self.b {
            Some(-self.normal)
        } else {
            None
        }
    }

    /// The other collider of the pair, if `key` is part of this contact
    pub fn other(&self, key: ColliderKey) -> Option<ColliderKey> {
        if key == self.a {
            Some(self.b)
        } else if key == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Enter-notification delivered to one side of a newly formed contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// The collider on the other side of the contact
    pub other: ColliderKey,

    /// Contact point in world space
    pub point: Vec2,

    /// Unit normal oriented away from the receiving collider
    pub normal: Vec2,
}

/// The set of contacts produced in one tick, keyed by unordered pair
#[derive(Debug, Clone, Default)]
pub struct ContactSet {
    contacts: HashMap<ContactPair, Contact>,
}

impl ContactSet {
    /// Create an empty contact set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a contact, replacing any earlier contact for the same pair
    pub fn insert(&mut self, contact: Contact) {
        self.contacts.insert(contact.pair(), contact);
    }

    /// Number of contacts in the set
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the set holds no contacts
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Whether the given pair is in contact
    pub fn contains(&self, pair: ContactPair) -> bool {
        self.contacts.contains_key(&pair)
    }

    /// Iterate over all contacts
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }

    /// The pair keys of this set
    pub fn pairs(&self) -> HashSet<ContactPair> {
        self.contacts.keys().copied().collect()
    }

    /// Contacts present in this set whose pair is absent from `previous`
    pub fn entered_since<'a>(
        &'a self,
        previous: &'a HashSet<ContactPair>,
    ) -> impl Iterator<Item = &'a Contact> {
        self.contacts
            .iter()
            .filter(|(pair, _)| !previous.contains(pair))
            .map(|(_, contact)| contact)
    }

    /// Remove every contact
    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<ColliderKey> {
        let mut map: SlotMap<ColliderKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn contact(a: ColliderKey, b: ColliderKey) -> Contact {
        Contact {
            a,
            b,
            point: Vec2::zeros(),
            normal: Vec2::new(1.0, 0.0),
            depth: 0.1,
        }
    }

    #[test]
    fn test_pair_is_unordered() {
        let k = keys(2);
        assert_eq!(ContactPair::new(k[0], k[1]), ContactPair::new(k[1], k[0]));
    }

    #[test]
    fn test_normal_away_from_each_side() {
        let k = keys(3);
        let c = contact(k[0], k[1]);
        assert_eq!(c.normal_away_from(k[0]), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(c.normal_away_from(k[1]), Some(Vec2::new(-1.0, 0.0)));
        assert_eq!(c.normal_away_from(k[2]), None);
    }

    #[test]
    fn test_entered_since_reports_only_new_pairs() {
        let k = keys(3);
        let mut current = ContactSet::new();
        current.insert(contact(k[0], k[1]));
        current.insert(contact(k[1], k[2]));

        let mut previous = HashSet::new();
        previous.insert(ContactPair::new(k[0], k[1]));

        let entered: Vec<_> = current.entered_since(&previous).collect();
        assert_eq!(entered.len(), 1);
        assert_eq!(entered[0].pair(), ContactPair::new(k[1], k[2]));
    }
}
