//! Tick-based collision detection and resolution
//!
//! Only kinetic-vs-static pairs are resolved: a single actor moving through
//! generated wall geometry. Broad phase is a bounding-box query against a
//! small BVH over the statics; narrow phase is exact rectangle intersection
//! with push-out along the axis of least penetration.

pub mod bounds;
pub mod collidable;
pub mod engine;
pub mod index;

pub use bounds::Aabb;
pub use collidable::{BodyKind, Collidable, ColliderId, TriggerKind};
pub use engine::{CollisionEngine, CollisionError, ContactEvent, EnginePhase};
pub use index::SpatialIndex;
