use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::bounds::BoundingBox;

/// A bounding box bound to the entity that owns it.
///
/// The collider only records the owner's id, never the entity itself.
/// Its position is resynced from the owning body at the start of every
/// update, so other entities see it where the owner stood before moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub owner: EntityId,
    pub bbox: BoundingBox,
}

impl Collider {
    pub fn new(owner: EntityId, pos: Vec2, size: Vec2) -> Self {
        Self {
            owner,
            bbox: BoundingBox::from_pos_size(pos, size),
        }
    }

    /// Copy the owner's current position into the box.
    pub fn sync(&mut self, pos: Vec2) {
        self.bbox.x = pos.x;
        self.bbox.y = pos.y;
    }

    /// A box of the same size at a candidate position, tagged with the same
    /// owner. Used to ask "would I collide if I moved here" without moving.
    pub fn hypothetical(&self, x: f32, y: f32) -> Collider {
        Collider {
            owner: self.owner,
            bbox: BoundingBox::new(x, y, self.bbox.width, self.bbox.height),
        }
    }

    /// True if the two colliders overlap. Ownership is not considered.
    pub fn overlaps(&self, other: &Collider) -> bool {
        self.bbox.overlaps(&other.bbox)
    }
}

/// Anything that can answer "does this candidate box hit someone else".
pub trait CollisionQuery {
    /// True iff `candidate` overlaps a collider not owned by `candidate.owner`.
    fn collides(&self, candidate: &Collider) -> bool;
}

/// A query against nothing. Handy for bodies updated outside a world.
pub struct NoCollisions;

impl CollisionQuery for NoCollisions {
    fn collides(&self, _candidate: &Collider) -> bool {
        false
    }
}

impl CollisionQuery for [Collider] {
    fn collides(&self, candidate: &Collider) -> bool {
        self.iter()
            .any(|c| c.owner != candidate.owner && c.overlaps(candidate))
    }
}
