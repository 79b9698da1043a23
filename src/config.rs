//! Maze generation parameters

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::maze::MazeError;

/// Parameters for one maze generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Cells per row.
    pub width: usize,
    /// Cells per column.
    pub height: usize,
    /// Upper bound on teleporter pairs. Further clamped to half the dead-end
    /// count at planning time.
    pub max_teleporters: usize,
    /// Probability that a dead end becomes a teleporter.
    pub teleport_chance: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            max_teleporters: consts::DEFAULT_MAX_TELEPORTERS,
            teleport_chance: consts::TELEPORT_CHANCE,
        }
    }
}

impl MazeConfig {
    /// Dimensions-only constructor; teleporter settings keep their defaults.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Rejects parameters the builder does not support.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.width < 2 || self.height < 2 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.teleport_chance) {
            return Err(MazeError::InvalidTeleportChance {
                chance: self.teleport_chance,
            });
        }
        Ok(())
    }
}
