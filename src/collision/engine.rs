//! Per-tick collision resolution
//!
//! The engine owns every registered body and hands out [`ColliderId`]
//! handles. Statics live in the spatial index, kinetics in a flat list; only
//! kinetic-vs-static pairs are ever tested. Resolution is a single pass per
//! tick, no iteration to a fixpoint.

use glam::Vec2;
use thiserror::Error;

use super::bounds::Aabb;
use super::collidable::{BodyKind, Collidable, ColliderId, TriggerKind};
use super::index::SpatialIndex;
use crate::consts::PUSH_OUT_FACTOR;

/// Errors from collision-engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollisionError {
    /// The supplied body has a non-finite or inverted boundary.
    #[error("collidable boundary is degenerate or non-finite")]
    InvalidCollidable,
}

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnginePhase {
    /// Constructed, no tick run yet.
    #[default]
    Uninitialized,
    Running,
    /// Retired; updates resolve nothing.
    Disposed,
}

/// Something the resolution pass observed or did during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    /// A kinetic body overlapped a trigger. Fired exactly once per
    /// overlapping tick, before any push-out against the same body.
    Trigger {
        source: ColliderId,
        target: ColliderId,
        kind: TriggerKind,
    },
    /// A kinetic body was pushed out of a solid by `delta`.
    PushOut {
        source: ColliderId,
        target: ColliderId,
        delta: Vec2,
    },
}

/// Collision engine over one set of static geometry and a few kinetic
/// bodies.
///
/// `delay_add` + `flush` let a scene builder register a whole maze's worth
/// of geometry before the spatial index commits to final positions.
#[derive(Debug, Default)]
pub struct CollisionEngine {
    next_id: u32,
    statics: Vec<(ColliderId, Collidable)>,
    kinetics: Vec<(ColliderId, Collidable)>,
    pending: Vec<(ColliderId, Collidable)>,
    index: SpatialIndex,
    phase: EnginePhase,
}

impl CollisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Permanently retires the engine.
    pub fn dispose(&mut self) {
        self.phase = EnginePhase::Disposed;
    }

    fn alloc_id(&mut self) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        id
    }

    fn validate(collidable: &Collidable) -> Result<(), CollisionError> {
        if collidable.bounds.is_valid() {
            Ok(())
        } else {
            Err(CollisionError::InvalidCollidable)
        }
    }

    /// Registers `collidable`, routing on its classification. Duplicate
    /// geometry is permitted; every registration gets a fresh handle.
    pub fn add(&mut self, collidable: Collidable) -> Result<ColliderId, CollisionError> {
        Self::validate(&collidable)?;
        let id = self.alloc_id();
        self.insert(id, collidable);
        Ok(id)
    }

    fn insert(&mut self, id: ColliderId, collidable: Collidable) {
        match collidable.body {
            BodyKind::Static => {
                self.index.insert(id, collidable.bounds);
                self.statics.push((id, collidable));
            }
            BodyKind::Kinetic => self.kinetics.push((id, collidable)),
        }
    }

    /// Buffers a registration without touching the index, until [`flush`].
    /// Validation happens now; the flush itself cannot fail.
    ///
    /// [`flush`]: CollisionEngine::flush
    pub fn delay_add(&mut self, collidable: Collidable) -> Result<ColliderId, CollisionError> {
        Self::validate(&collidable)?;
        let id = self.alloc_id();
        self.pending.push((id, collidable));
        Ok(id)
    }

    /// Promotes every buffered body into the live stores. Returns how many
    /// were added; the buffer is left empty.
    pub fn flush(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for (id, collidable) in pending {
            self.insert(id, collidable);
        }
        count
    }

    /// Drops the body behind `id`; true when it existed.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        if let Some(pos) = self.kinetics.iter().position(|(i, _)| *i == id) {
            self.kinetics.remove(pos);
            return true;
        }
        if let Some(pos) = self.statics.iter().position(|(i, _)| *i == id) {
            self.statics.remove(pos);
            self.index.remove(id);
            return true;
        }
        false
    }

    /// True when `id` is live (buffered bodies do not count until flushed).
    pub fn contains(&self, id: ColliderId) -> bool {
        self.kinetics.iter().any(|(i, _)| *i == id)
            || self.statics.iter().any(|(i, _)| *i == id)
    }

    /// Live bodies, kinetic and static together.
    pub fn len(&self) -> usize {
        self.kinetics.len() + self.statics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties both stores, the index, and the pending buffer. The id
    /// counter keeps running so stale handles never alias new bodies.
    pub fn clear(&mut self) {
        self.kinetics.clear();
        self.statics.clear();
        self.pending.clear();
        self.index.clear();
    }

    pub fn get(&self, id: ColliderId) -> Option<&Collidable> {
        self.iter().find(|(i, _)| *i == id).map(|(_, c)| c)
    }

    /// All live bodies, kinetics first, each store in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderId, &Collidable)> + '_ {
        self.kinetics
            .iter()
            .chain(self.statics.iter())
            .map(|(id, c)| (*id, c))
    }

    fn get_mut(&mut self, id: ColliderId) -> Option<&mut Collidable> {
        self.kinetics
            .iter_mut()
            .chain(self.statics.iter_mut())
            .find(|(i, _)| *i == id)
            .map(|(_, c)| c)
    }

    /// Moves the body behind `id` by `delta`; true when it existed. Moved
    /// statics are re-indexed before the next query.
    pub fn translate(&mut self, id: ColliderId, delta: Vec2) -> bool {
        let Some(collidable) = self.get_mut(id) else {
            return false;
        };
        collidable.translate(delta);
        if collidable.is_static() {
            let bounds = collidable.bounds;
            self.index.update(id, bounds);
        }
        true
    }

    /// Sets the velocity integrated for `id` each tick; true when it
    /// existed.
    pub fn set_velocity(&mut self, id: ColliderId, vel: Vec2) -> bool {
        match self.get_mut(id) {
            Some(collidable) => {
                collidable.vel = vel;
                true
            }
            None => false,
        }
    }

    /// Runs one resolution tick and reports what happened.
    ///
    /// Per kinetic body, in registration order: integrate its velocity over
    /// `dt`, broad-phase query the static index, then per overlapping static
    /// (ascending id) fire its trigger first and push out of it second when
    /// it is solid. The push moves the kinetic along the axis with the
    /// smaller overlap, [`PUSH_OUT_FACTOR`] times that extent, away from the
    /// static's center.
    pub fn update(&mut self, dt: f32) -> Vec<ContactEvent> {
        if self.phase == EnginePhase::Disposed {
            return Vec::new();
        }
        self.phase = EnginePhase::Running;

        let mut events = Vec::new();
        let mut hits = Vec::new();

        for ki in 0..self.kinetics.len() {
            let vel = self.kinetics[ki].1.vel;
            if vel != Vec2::ZERO {
                self.kinetics[ki].1.translate(vel * dt);
            }

            let kid = self.kinetics[ki].0;
            let probe = self.kinetics[ki].1.bounds;
            self.index.query(&probe, &mut hits);

            for &sid in &hits {
                let Some((_, stat)) = self.statics.iter().find(|(i, _)| *i == sid) else {
                    continue;
                };
                let stat_bounds = stat.bounds;
                let stat_solid = stat.solid;
                let stat_trigger = stat.trigger;

                // Trigger first: bumping into a solid may still set something off
                if let Some(kind) = stat_trigger {
                    events.push(ContactEvent::Trigger {
                        source: sid,
                        target: kid,
                        kind,
                    });
                }

                if stat_solid {
                    let kinetic = &mut self.kinetics[ki].1;
                    if let Some(delta) = push_out(&kinetic.bounds, &stat_bounds) {
                        kinetic.translate(delta);
                        events.push(ContactEvent::PushOut {
                            source: sid,
                            target: kid,
                            delta,
                        });
                    }
                }
            }
        }
        events
    }
}

/// Push-out delta for a kinetic box overlapping a solid one, or `None` when
/// they no longer overlap (an earlier push this tick may already have
/// separated them).
fn push_out(kinetic: &Aabb, stat: &Aabb) -> Option<Vec2> {
    let overlap = kinetic.intersection(stat)?;
    let sign_x = if kinetic.center().x < stat.center().x {
        -1.0
    } else {
        1.0
    };
    let sign_y = if kinetic.center().y < stat.center().y {
        -1.0
    } else {
        1.0
    };

    Some(if overlap.width() > overlap.height() {
        Vec2::new(0.0, PUSH_OUT_FACTOR * sign_y * overlap.height())
    } else {
        Vec2::new(PUSH_OUT_FACTOR * sign_x * overlap.width(), 0.0)
    })
}
