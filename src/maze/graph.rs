//! The generated maze and its derived metadata
//!
//! Everything the rest of the game reads after generation lives here. A
//! `MazeGraph` is rebuilt wholesale on every generation request; accessors
//! are stable until the next one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::MazeError;
use super::builder;
use super::grid::{Cell, CellEdges, Direction, Grid};
use crate::config::MazeConfig;
use crate::consts::CELL_SIZE;

/// What occupies a cell, as far as tile composition cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Plain,
    Start,
    /// The maze exit; its opening faces [`MazeGraph::exit_side`].
    Exit,
    /// Outbound teleporter; `pair` indexes the displacement table.
    Teleporter { pair: usize },
    /// Landing cell of some teleporter.
    Destination,
}

/// A fully generated maze: the linked grid plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeGraph {
    pub grid: Grid,
    /// The seed cell of the spanning tree.
    pub start: Cell,
    /// The exit cell, always on the boundary.
    pub end: Cell,
    /// Leaf cells in row-major order, `start`/`end` excluded.
    pub dead_ends: Vec<Cell>,
    pub teleporters: Vec<Cell>,
    pub destinations: Vec<Cell>,
    /// World-space displacement per teleporter pair.
    pub displacements: Vec<Vec2>,
}

impl MazeGraph {
    /// Generates a maze from a bare seed with a fresh `Pcg32`.
    pub fn generate_seeded(config: &MazeConfig, seed: u64) -> Result<Self, MazeError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        builder::generate(config, &mut rng)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// World-space extent of the whole maze.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32) * CELL_SIZE
    }

    /// The four edge states of `cell`, for wall/corner sprite selection.
    pub fn links(&self, cell: Cell) -> Result<CellEdges, MazeError> {
        self.grid.get(cell)
    }

    /// Classifies `cell` for tile composition. The exit outranks everything,
    /// then the start, then teleporters, then destinations.
    pub fn tile_kind(&self, cell: Cell) -> TileKind {
        if cell == self.end {
            TileKind::Exit
        } else if cell == self.start {
            TileKind::Start
        } else if let Some(pair) = self.teleporters.iter().position(|&t| t == cell) {
            TileKind::Teleporter { pair }
        } else if self.destinations.contains(&cell) {
            TileKind::Destination
        } else {
            TileKind::Plain
        }
    }

    /// Which boundary edge the exit opening faces.
    ///
    /// Corner cells resolve as: bottom-right down, top-left left, top-right
    /// right, bottom-left left; edge cells face their own edge.
    pub fn exit_side(&self) -> Direction {
        let last_row = self.height() - 1;
        let last_col = self.width() - 1;
        let Cell { row, col } = self.end;

        if row == last_row && col == last_col {
            Direction::Down
        } else if row == 0 && col == 0 {
            Direction::Left
        } else if row == 0 && col == last_col {
            Direction::Right
        } else if row == last_row && col == 0 {
            Direction::Left
        } else if col == 0 {
            Direction::Left
        } else if row == 0 {
            Direction::Up
        } else if col == last_col {
            Direction::Right
        } else {
            Direction::Down
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::grid::EdgeState;

    fn maze_with_end(end: Cell) -> MazeGraph {
        let mut grid = Grid::new(4, 4);
        // One arbitrary link so the grid is not completely inert.
        grid.set_pair(Cell::new(1, 1), Direction::Right, EdgeState::Linked)
            .unwrap();
        MazeGraph {
            grid,
            start: Cell::new(1, 1),
            end,
            dead_ends: vec![Cell::new(2, 0)],
            teleporters: vec![Cell::new(2, 0)],
            destinations: vec![Cell::new(3, 3)],
            displacements: vec![Vec2::new(3.0 * CELL_SIZE, CELL_SIZE)],
        }
    }

    #[test]
    fn test_tile_kind_precedence() {
        let maze = maze_with_end(Cell::new(0, 2));
        assert_eq!(maze.tile_kind(Cell::new(0, 2)), TileKind::Exit);
        assert_eq!(maze.tile_kind(Cell::new(1, 1)), TileKind::Start);
        assert_eq!(
            maze.tile_kind(Cell::new(2, 0)),
            TileKind::Teleporter { pair: 0 }
        );
        assert_eq!(maze.tile_kind(Cell::new(3, 3)), TileKind::Destination);
        assert_eq!(maze.tile_kind(Cell::new(2, 2)), TileKind::Plain);
    }

    #[test]
    fn test_exit_side_corners() {
        assert_eq!(maze_with_end(Cell::new(3, 3)).exit_side(), Direction::Down);
        assert_eq!(maze_with_end(Cell::new(0, 0)).exit_side(), Direction::Left);
        assert_eq!(maze_with_end(Cell::new(0, 3)).exit_side(), Direction::Right);
        assert_eq!(maze_with_end(Cell::new(3, 0)).exit_side(), Direction::Left);
    }

    #[test]
    fn test_exit_side_edges() {
        assert_eq!(maze_with_end(Cell::new(2, 0)).exit_side(), Direction::Left);
        assert_eq!(maze_with_end(Cell::new(0, 2)).exit_side(), Direction::Up);
        assert_eq!(maze_with_end(Cell::new(2, 3)).exit_side(), Direction::Right);
        assert_eq!(maze_with_end(Cell::new(3, 2)).exit_side(), Direction::Down);
    }

    #[test]
    fn test_generate_seeded_is_reproducible() {
        let config = MazeConfig::new(5, 5);
        let a = MazeGraph::generate_seeded(&config, 99).unwrap();
        let b = MazeGraph::generate_seeded(&config, 99).unwrap();
        assert_eq!(a, b);
    }
}
