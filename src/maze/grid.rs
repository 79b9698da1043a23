//! Fixed-size maze grid and per-cell edge states
//!
//! Each cell tracks four directed edges (down, right, up, left), each in a
//! tri-state: `Unset` (never considered), `Reserved` (candidate drawn, or a
//! permanent boundary wall), `Linked` (part of the spanning tree). Adjacent
//! cells mirror each other's states; mutation of interior edges goes through
//! [`Grid::set_pair`] so the mirror invariant cannot be broken piecemeal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::MazeError;
use crate::consts::CELL_SIZE;

/// Integer cell coordinates inside a maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// World-space position of this cell's top-left corner.
    pub fn world_origin(&self) -> Vec2 {
        Vec2::new(self.col as f32, self.row as f32) * CELL_SIZE
    }

    /// World-space center of this cell.
    pub fn world_center(&self) -> Vec2 {
        self.world_origin() + Vec2::splat(CELL_SIZE / 2.0)
    }
}

/// The four cardinal edge directions of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// The direction the neighboring cell records back toward this one.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
        }
    }

    /// Row/column delta of the neighbor in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Down => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Left => 3,
        }
    }
}

/// Tri-state of one directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeState {
    /// Never considered by the builder.
    #[default]
    Unset,
    /// A candidate edge was drawn for it, or it faces out of bounds.
    Reserved,
    /// Part of the spanning tree.
    Linked,
}

/// The four edge states of one cell, addressed by [`Direction`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdges([EdgeState; 4]);

impl CellEdges {
    pub fn get(&self, dir: Direction) -> EdgeState {
        self.0[dir.index()]
    }

    pub fn set(&mut self, dir: Direction, state: EdgeState) {
        self.0[dir.index()] = state;
    }

    pub fn down(&self) -> EdgeState {
        self.get(Direction::Down)
    }

    pub fn right(&self) -> EdgeState {
        self.get(Direction::Right)
    }

    pub fn up(&self) -> EdgeState {
        self.get(Direction::Up)
    }

    pub fn left(&self) -> EdgeState {
        self.get(Direction::Left)
    }

    /// Number of directions currently `Linked`.
    pub fn linked_count(&self) -> usize {
        self.0
            .iter()
            .filter(|&&s| s == EdgeState::Linked)
            .count()
    }

    /// Directions currently `Linked`, in declaration order.
    pub fn linked_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.get(d) == EdgeState::Linked)
    }

    /// A leaf of the spanning tree: exactly one linked direction.
    pub fn is_dead_end(&self) -> bool {
        self.linked_count() == 1
    }
}

/// Fixed `width x height` grid of per-cell edge states.
///
/// A pure data container; the builder owns all algorithmic behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellEdges>,
}

impl Grid {
    /// An all-`Unset` grid. Dimension validation happens in
    /// [`MazeConfig::validate`](crate::config::MazeConfig::validate).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellEdges::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    fn idx(&self, cell: Cell) -> Result<usize, MazeError> {
        if self.in_bounds(cell) {
            Ok(cell.row * self.width + cell.col)
        } else {
            Err(MazeError::OutOfRange {
                row: cell.row,
                col: cell.col,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, cell: Cell) -> Result<CellEdges, MazeError> {
        self.idx(cell).map(|i| self.cells[i])
    }

    pub fn set(&mut self, cell: Cell, edges: CellEdges) -> Result<(), MazeError> {
        let i = self.idx(cell)?;
        self.cells[i] = edges;
        Ok(())
    }

    /// The adjacent cell in `dir`, or `None` at the grid boundary.
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dr, dc) = dir.delta();
        let row = cell.row.checked_add_signed(dr)?;
        let col = cell.col.checked_add_signed(dc)?;
        let next = Cell::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// Sets the edge between `cell` and its neighbor in `dir` to `state` on
    /// both sides. Fails with `OutOfRange` when the neighbor does not exist.
    pub fn set_pair(&mut self, cell: Cell, dir: Direction, state: EdgeState) -> Result<(), MazeError> {
        let neighbor = self.neighbor(cell, dir).ok_or(MazeError::OutOfRange {
            row: cell.row,
            col: cell.col,
            width: self.width,
            height: self.height,
        })?;

        let i = self.idx(cell)?;
        self.cells[i].set(dir, state);
        let j = self.idx(neighbor)?;
        self.cells[j].set(dir.opposite(), state);
        Ok(())
    }

    /// Row-major iteration over every cell with its edge states.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellEdges)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| {
                let cell = Cell::new(row, col);
                (cell, self.cells[cell.row * self.width + cell.col])
            })
        })
    }

    /// Row-major iteration over every cell coordinate.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.iter().map(|(cell, _)| cell)
    }

    /// Number of linked edge pairs in the grid. A completed maze has exactly
    /// `width * height - 1` of them.
    pub fn linked_pair_count(&self) -> usize {
        let ends: usize = self.iter().map(|(_, e)| e.linked_count()).sum();
        ends / 2
    }
}
