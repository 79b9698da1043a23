//! Warp Maze - perfect-maze generation with teleporters and collision resolution
//!
//! Core modules:
//! - `maze`: deterministic maze generation (spanning tree, dead ends, teleporters)
//! - `collision`: tick-based broad/narrow-phase collision engine
//! - `scene`: turns a generated maze into static collider geometry
//! - `config`: validated generation parameters

pub mod collision;
pub mod config;
pub mod maze;
pub mod scene;

pub use collision::{Aabb, Collidable, CollisionEngine, ContactEvent, TriggerKind};
pub use config::MazeConfig;
pub use maze::{Cell, Direction, MazeError, MazeGraph};

/// World-space and generation constants
pub mod consts {
    /// Side length of one sub-tile in world units
    pub const SUBTILE_SIZE: f32 = 16.0;
    /// Side length of one maze cell (3x3 sub-tiles)
    pub const CELL_SIZE: f32 = SUBTILE_SIZE * 3.0;

    /// Default cap on teleporter pairs per maze
    pub const DEFAULT_MAX_TELEPORTERS: usize = 3;
    /// Probability that a dead end becomes a teleporter
    pub const TELEPORT_CHANCE: f64 = 0.2;
    /// Slack added on top of `width * height` for the edge-weight range
    pub const WEIGHT_SLACK: usize = 100;

    /// Push-out overshoot; slightly past full de-penetration so boxes stay
    /// separated on the next tick
    pub const PUSH_OUT_FACTOR: f32 = 1.1;

    /// Demo actor speed in world units per tick
    pub const ACTOR_SPEED: f32 = 2.0;
    /// Demo actor bounding-box side length
    pub const ACTOR_SIZE: f32 = 10.0;
}
