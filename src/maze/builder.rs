//! Randomized minimal-weight spanning-tree maze builder
//!
//! Prim-style growth from a random start cell: every frontier edge gets a
//! fresh random weight when it is first discovered, the cheapest candidate is
//! linked next, and candidates whose target already joined the tree are
//! discarded (that is what keeps the maze acyclic). The loop ends with
//! exactly `width * height - 1` linked pairs.

use rand::Rng;

use super::MazeError;
use super::analyze;
use super::graph::MazeGraph;
use super::grid::{Cell, Direction, EdgeState, Grid};
use super::queue::EdgeQueue;
use crate::config::MazeConfig;
use crate::consts::WEIGHT_SLACK;

/// Generates a complete maze: the linked grid, a boundary exit, and the
/// teleporter layout derived from its dead ends.
///
/// All randomness comes from `rng`; the same generator state and config
/// always produce the same maze.
pub fn generate<R: Rng>(config: &MazeConfig, rng: &mut R) -> Result<MazeGraph, MazeError> {
    config.validate()?;
    let (width, height) = (config.width, config.height);

    let mut grid = Grid::new(width, height);
    let mut queue = EdgeQueue::new();
    let weight_span = (width * height + WEIGHT_SLACK) as u32;

    let start = Cell::new(rng.random_range(0..height), rng.random_range(0..width));
    let mut end = start;

    add_candidates(&mut grid, &mut queue, start, weight_span, rng)?;

    while let Some(edge) = queue.pop() {
        // A target with any link is already in the tree; linking it again
        // would close a cycle.
        if grid.get(edge.to)?.linked_count() > 0 {
            continue;
        }

        grid.set_pair(edge.from, edge.dir, EdgeState::Linked)?;
        end = edge.to;
        add_candidates(&mut grid, &mut queue, edge.to, weight_span, rng)?;
    }

    let end = repair_exit(&grid, end, rng)?;

    let dead_ends = analyze::find_dead_ends(&grid, start, end);
    let plan = analyze::plan_teleports(
        &dead_ends,
        config.max_teleporters,
        config.teleport_chance,
        rng,
    );

    log::debug!(
        "generated {}x{} maze: start=({},{}) end=({},{}) dead_ends={} teleporters={}",
        width,
        height,
        start.row,
        start.col,
        end.row,
        end.col,
        dead_ends.len(),
        plan.teleporters.len(),
    );

    Ok(MazeGraph {
        grid,
        start,
        end,
        dead_ends,
        teleporters: plan.teleporters,
        destinations: plan.destinations,
        displacements: plan.displacements,
    })
}

/// Enqueues every untouched edge leaving `cell` with a fresh random weight,
/// reserving it on both sides so the same pair is never enqueued twice.
/// Directions facing out of bounds become permanent walls.
fn add_candidates<R: Rng>(
    grid: &mut Grid,
    queue: &mut EdgeQueue,
    cell: Cell,
    weight_span: u32,
    rng: &mut R,
) -> Result<(), MazeError> {
    for dir in Direction::ALL {
        if grid.get(cell)?.get(dir) != EdgeState::Unset {
            continue;
        }
        match grid.neighbor(cell, dir) {
            None => {
                let mut edges = grid.get(cell)?;
                edges.set(dir, EdgeState::Reserved);
                grid.set(cell, edges)?;
            }
            Some(neighbor) => {
                queue.push(rng.random_range(0..weight_span), cell, neighbor, dir);
                grid.set_pair(cell, dir, EdgeState::Reserved)?;
            }
        }
    }
    Ok(())
}

/// True when `cell` lies on any boundary row or column.
fn on_boundary(grid: &Grid, cell: Cell) -> bool {
    cell.row == 0 || cell.row == grid.height() - 1 || cell.col == 0 || cell.col == grid.width() - 1
}

/// Forces the exit onto a maze boundary.
///
/// An `end` already on the boundary is kept. Otherwise each boundary edge
/// gets one random probe, in a fixed bottom/top/left/right order, accepting a
/// probed cell whose perpendicular inward edge is linked (such a cell can
/// host an exit opening without orphaning it from the paths). When every
/// probe misses, a deterministic row-major scan of the boundary takes over;
/// a scan miss is an error rather than a silently interior exit.
pub(super) fn repair_exit<R: Rng>(grid: &Grid, end: Cell, rng: &mut R) -> Result<Cell, MazeError> {
    if on_boundary(grid, end) {
        return Ok(end);
    }

    let (width, height) = (grid.width(), grid.height());
    let probes = [
        (Cell::new(height - 1, rng.random_range(0..width)), Direction::Up),
        (Cell::new(0, rng.random_range(0..width)), Direction::Down),
        (Cell::new(rng.random_range(0..height), 0), Direction::Right),
        (
            Cell::new(rng.random_range(0..height), width - 1),
            Direction::Left,
        ),
    ];
    for (cell, inward) in probes {
        if grid.get(cell)?.get(inward) == EdgeState::Linked {
            return Ok(cell);
        }
    }

    log::warn!("exit repair probes all missed; scanning the boundary");
    scan_boundary(grid)
}

fn scan_boundary(grid: &Grid) -> Result<Cell, MazeError> {
    let (width, height) = (grid.width(), grid.height());

    let mut candidates: Vec<(Cell, Direction)> = Vec::with_capacity(2 * (width + height));
    candidates.extend((0..width).map(|col| (Cell::new(height - 1, col), Direction::Up)));
    candidates.extend((0..width).map(|col| (Cell::new(0, col), Direction::Down)));
    candidates.extend((0..height).map(|row| (Cell::new(row, 0), Direction::Right)));
    candidates.extend((0..height).map(|row| (Cell::new(row, width - 1), Direction::Left)));

    for (cell, inward) in candidates {
        if grid.get(cell)?.get(inward) == EdgeState::Linked {
            return Ok(cell);
        }
    }
    Err(MazeError::ExitRepairFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_spanning_tree_link_count() {
        let config = MazeConfig::new(7, 5);
        let maze = generate(&config, &mut rng(11)).unwrap();
        assert_eq!(maze.grid.linked_pair_count(), 7 * 5 - 1);
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        let config = MazeConfig::new(1, 9);
        assert_eq!(
            generate(&config, &mut rng(0)),
            Err(MazeError::InvalidDimensions { width: 1, height: 9 })
        );
    }

    #[test]
    fn test_every_cell_reachable_from_start() {
        let config = MazeConfig::new(6, 6);
        let maze = generate(&config, &mut rng(42)).unwrap();

        let mut seen = vec![false; 36];
        let mut stack = vec![maze.start];
        seen[maze.start.row * 6 + maze.start.col] = true;
        while let Some(cell) = stack.pop() {
            let edges = maze.grid.get(cell).unwrap();
            for dir in edges.linked_directions() {
                let next = maze.grid.neighbor(cell, dir).unwrap();
                if !seen[next.row * 6 + next.col] {
                    seen[next.row * 6 + next.col] = true;
                    stack.push(next);
                }
            }
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn test_boundary_directions_are_walled() {
        let config = MazeConfig::new(5, 4);
        let maze = generate(&config, &mut rng(3)).unwrap();

        for (cell, edges) in maze.grid.iter() {
            for dir in Direction::ALL {
                if maze.grid.neighbor(cell, dir).is_none() {
                    assert_eq!(edges.get(dir), EdgeState::Reserved);
                }
            }
        }
    }

    #[test]
    fn test_end_lands_on_boundary() {
        for seed in 0..20 {
            let maze = generate(&MazeConfig::new(5, 5), &mut rng(seed)).unwrap();
            assert!(on_boundary(&maze.grid, maze.end), "seed {seed}");
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let config = MazeConfig::new(5, 5);
        let a = generate(&config, &mut rng(1234)).unwrap();
        let b = generate(&config, &mut rng(1234)).unwrap();
        assert_eq!(a.start, b.start);
        assert_eq!(a.end, b.end);
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.teleporters, b.teleporters);
        assert_eq!(a.destinations, b.destinations);
    }

    // Hand-built 3x3 grid: a vertical corridor down the middle column plus a
    // spur into the center-left cell. Boundary cells linked inward: (2,1) via
    // Up, (0,1) via Down, (1,0) via Right.
    fn corridor_grid() -> Grid {
        let mut grid = Grid::new(3, 3);
        grid.set_pair(Cell::new(0, 1), Direction::Down, EdgeState::Linked)
            .unwrap();
        grid.set_pair(Cell::new(1, 1), Direction::Down, EdgeState::Linked)
            .unwrap();
        grid.set_pair(Cell::new(1, 1), Direction::Left, EdgeState::Linked)
            .unwrap();
        grid
    }

    #[test]
    fn test_repair_moves_interior_end_to_boundary() {
        let grid = corridor_grid();
        // (1,1) is interior, so repair must relocate it.
        let repaired = repair_exit(&grid, Cell::new(1, 1), &mut rng(7)).unwrap();
        assert!(on_boundary(&grid, repaired));
        // Qualifying cells: (2,1) via Up, (0,1) via Down, (1,0) via Right.
        assert!(
            [Cell::new(2, 1), Cell::new(0, 1), Cell::new(1, 0)].contains(&repaired),
            "repaired to {repaired:?}"
        );
    }

    #[test]
    fn test_repair_keeps_boundary_end() {
        let grid = corridor_grid();
        assert_eq!(
            repair_exit(&grid, Cell::new(2, 1), &mut rng(0)).unwrap(),
            Cell::new(2, 1)
        );
    }

    #[test]
    fn test_repair_fails_loudly_on_unlinked_grid() {
        let grid = Grid::new(3, 3);
        assert_eq!(
            repair_exit(&grid, Cell::new(1, 1), &mut rng(0)),
            Err(MazeError::ExitRepairFailed)
        );
    }

    #[test]
    fn test_scan_fallback_finds_the_single_candidate() {
        // No randomness at all: the scan must find (2,1) via its Up link.
        let grid = corridor_grid();
        assert_eq!(scan_boundary(&grid).unwrap(), Cell::new(2, 1));
    }
}
