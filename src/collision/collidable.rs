//! Collidable bodies
//!
//! The capability contract between the engine and everything that occupies
//! space: a boundary, a fixed static/kinetic classification, solid and
//! trigger flags (a body may be both), and a translate/velocity pair. The
//! set of trigger behaviors is closed, so it is plain data rather than a
//! trait object.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;

/// Handle to a body owned by a [`CollisionEngine`](super::CollisionEngine).
///
/// External systems keep the handle; the engine keeps the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub(super) u32);

/// Whether a body ever moves. Fixed for the body's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Static,
    Kinetic,
}

/// Side effect carried by a trigger body. The engine reports the firing as a
/// [`ContactEvent`](super::ContactEvent); applying the effect is the
/// driver's business.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerKind {
    /// Relocates the toucher by a fixed world-space displacement.
    Teleport { displacement: Vec2 },
}

/// A body participating in collision resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collidable {
    pub bounds: Aabb,
    pub body: BodyKind,
    /// Solid bodies push overlapping kinetic bodies out.
    pub solid: bool,
    /// Present on bodies that fire a side effect on contact.
    pub trigger: Option<TriggerKind>,
    /// World units per second; only meaningful on kinetic bodies.
    pub vel: Vec2,
}

impl Collidable {
    /// A solid, immovable wall.
    pub fn static_solid(bounds: Aabb) -> Self {
        Self {
            bounds,
            body: BodyKind::Static,
            solid: true,
            trigger: None,
            vel: Vec2::ZERO,
        }
    }

    /// A non-solid static region that fires `kind` on contact.
    pub fn static_trigger(bounds: Aabb, kind: TriggerKind) -> Self {
        Self {
            bounds,
            body: BodyKind::Static,
            solid: false,
            trigger: Some(kind),
            vel: Vec2::ZERO,
        }
    }

    /// A moving solid body (the actor).
    pub fn kinetic(bounds: Aabb) -> Self {
        Self {
            bounds,
            body: BodyKind::Kinetic,
            solid: true,
            trigger: None,
            vel: Vec2::ZERO,
        }
    }

    pub fn is_static(&self) -> bool {
        self.body == BodyKind::Static
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn is_trigger(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn boundary(&self) -> Aabb {
        self.bounds
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Moves the body by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.bounds.translate(delta);
    }
}
