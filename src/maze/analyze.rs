//! Dead-end classification and teleporter planning

use glam::Vec2;
use rand::Rng;

use super::grid::{Cell, Grid};
use crate::consts::CELL_SIZE;

/// Scans the grid for leaf cells, excluding `start` and `end`.
///
/// Returned in row-major scan order; teleporter pairing depends on this
/// order staying stable.
pub fn find_dead_ends(grid: &Grid, start: Cell, end: Cell) -> Vec<Cell> {
    grid.iter()
        .filter(|(cell, edges)| edges.is_dead_end() && *cell != start && *cell != end)
        .map(|(cell, _)| cell)
        .collect()
}

/// A teleporter layout drawn from a maze's dead ends.
///
/// The three lists are index-aligned: `teleporters[i]` sends an actor by
/// `displacements[i]`, landing on `destinations[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeleportPlan {
    pub teleporters: Vec<Cell>,
    pub destinations: Vec<Cell>,
    pub displacements: Vec<Vec2>,
}

/// Picks teleporters and their destinations from `dead_ends`.
///
/// Each dead end rolls `chance` to become a teleporter, in scan order, until
/// the cap is reached. The cap is `max_teleporters` clamped to half the
/// dead-end count, which guarantees an equal-sized disjoint destination set
/// exists and keeps the rejection sampling below finite. Destinations are
/// drawn uniformly without replacement, skipping anything already used.
pub fn plan_teleports<R: Rng>(
    dead_ends: &[Cell],
    max_teleporters: usize,
    chance: f64,
    rng: &mut R,
) -> TeleportPlan {
    let cap = max_teleporters.min(dead_ends.len() / 2);

    let mut teleporters = Vec::with_capacity(cap);
    for &cell in dead_ends {
        if teleporters.len() == cap {
            break;
        }
        if rng.random_bool(chance) {
            teleporters.push(cell);
        }
    }

    let mut destinations: Vec<Cell> = Vec::with_capacity(teleporters.len());
    while destinations.len() < teleporters.len() {
        let pick = dead_ends[rng.random_range(0..dead_ends.len())];
        if teleporters.contains(&pick) || destinations.contains(&pick) {
            continue;
        }
        destinations.push(pick);
    }

    let displacements = teleporters
        .iter()
        .zip(&destinations)
        .map(|(&t, &d)| displacement(t, d))
        .collect();

    TeleportPlan {
        teleporters,
        destinations,
        displacements,
    }
}

/// World-space displacement carrying an actor from `from`'s cell to `to`'s.
fn displacement(from: Cell, to: Cell) -> Vec2 {
    Vec2::new(
        (to.col as f32 - from.col as f32) * CELL_SIZE,
        (to.row as f32 - from.row as f32) * CELL_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::grid::{Direction, EdgeState};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    // Comb-shaped 3x4: a linked top row with a tooth hanging from each
    // column. Every tooth tip (row 2) is a dead end.
    fn comb_grid() -> Grid {
        let mut grid = Grid::new(4, 3);
        for col in 0..3 {
            grid.set_pair(Cell::new(0, col), Direction::Right, EdgeState::Linked)
                .unwrap();
        }
        for col in 0..4 {
            grid.set_pair(Cell::new(0, col), Direction::Down, EdgeState::Linked)
                .unwrap();
            grid.set_pair(Cell::new(1, col), Direction::Down, EdgeState::Linked)
                .unwrap();
        }
        grid
    }

    #[test]
    fn test_dead_ends_are_single_link_cells() {
        let grid = comb_grid();
        // Start/end off in the top row so no tip is excluded.
        let dead_ends = find_dead_ends(&grid, Cell::new(0, 0), Cell::new(0, 3));
        let tips: Vec<Cell> = (0..4).map(|col| Cell::new(2, col)).collect();
        assert_eq!(dead_ends, tips);
    }

    #[test]
    fn test_dead_ends_exclude_start_and_end() {
        let grid = comb_grid();
        let dead_ends = find_dead_ends(&grid, Cell::new(2, 0), Cell::new(2, 3));
        assert!(!dead_ends.contains(&Cell::new(2, 0)));
        assert!(!dead_ends.contains(&Cell::new(2, 3)));
        assert_eq!(dead_ends.len(), 2);
    }

    #[test]
    fn test_plan_sets_are_disjoint_and_aligned() {
        let dead_ends: Vec<Cell> = (0..8).map(|col| Cell::new(2, col)).collect();
        let mut rng = Pcg32::seed_from_u64(5);
        let plan = plan_teleports(&dead_ends, 3, 0.9, &mut rng);

        assert_eq!(plan.teleporters.len(), plan.destinations.len());
        assert_eq!(plan.teleporters.len(), plan.displacements.len());
        assert!(plan.teleporters.len() <= 3);
        for t in &plan.teleporters {
            assert!(dead_ends.contains(t));
            assert!(!plan.destinations.contains(t));
        }
        for (i, d) in plan.destinations.iter().enumerate() {
            assert!(dead_ends.contains(d));
            assert!(!plan.destinations[..i].contains(d));
        }
    }

    #[test]
    fn test_cap_halves_when_dead_ends_are_scarce() {
        let dead_ends = vec![Cell::new(0, 0), Cell::new(0, 2), Cell::new(2, 1)];
        let mut rng = Pcg32::seed_from_u64(1);
        // chance 1.0 would otherwise claim all three and leave no destinations
        let plan = plan_teleports(&dead_ends, 3, 1.0, &mut rng);
        assert_eq!(plan.teleporters.len(), 1);
        assert_eq!(plan.destinations.len(), 1);
        assert_ne!(plan.teleporters[0], plan.destinations[0]);
    }

    #[test]
    fn test_no_teleporters_without_dead_ends() {
        let mut rng = Pcg32::seed_from_u64(9);
        let plan = plan_teleports(&[], 3, 1.0, &mut rng);
        assert!(plan.teleporters.is_empty());
        assert!(plan.destinations.is_empty());
    }

    #[test]
    fn test_displacement_scale() {
        let d = displacement(Cell::new(2, 1), Cell::new(0, 3));
        assert_eq!(d, Vec2::new(2.0 * CELL_SIZE, -2.0 * CELL_SIZE));
    }
}
