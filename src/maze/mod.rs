//! Deterministic maze generation
//!
//! A perfect maze is a spanning tree over the grid graph: connected, acyclic,
//! exactly one path between any two cells. This module must stay pure and
//! deterministic:
//! - Seeded RNG only, threaded through every randomized step
//! - Stable scan order (row-major) for all derived structures
//! - No rendering or platform dependencies

pub mod analyze;
pub mod builder;
pub mod graph;
pub mod grid;
pub mod queue;

pub use analyze::{TeleportPlan, find_dead_ends, plan_teleports};
pub use builder::generate;
pub use graph::{MazeGraph, TileKind};
pub use grid::{Cell, CellEdges, Direction, EdgeState, Grid};
pub use queue::{EdgeCandidate, EdgeQueue};

use thiserror::Error;

/// Errors surfaced by maze generation and grid access.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MazeError {
    /// Dimensions below the 2x2 minimum.
    #[error("maze dimensions {width}x{height} are too small; both sides must be at least 2")]
    InvalidDimensions { width: usize, height: usize },
    /// A teleport probability outside `[0, 1]`.
    #[error("teleport chance {chance} is outside [0, 1]")]
    InvalidTeleportChance { chance: f64 },
    /// Grid access outside `[0, height) x [0, width)`.
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    /// No boundary cell with an inward link could be found for the exit.
    #[error("exit repair found no boundary cell linked into the maze")]
    ExitRepairFailed,
}
