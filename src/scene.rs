//! Static collider construction for a generated maze
//!
//! Each cell becomes a 3x3 block of sub-tile squares: the four corners are
//! always walls, the four edge middles open up where the cell is linked (the
//! exit opening counts as linked), and the center is walkable. Teleporter
//! cells add a non-solid trigger box over the center sub-tile carrying their
//! displacement.

use glam::Vec2;

use crate::collision::{Aabb, Collidable, CollisionEngine, CollisionError, TriggerKind};
use crate::consts::SUBTILE_SIZE;
use crate::maze::{Direction, EdgeState, MazeGraph, TileKind};

/// Builds the static colliders for every cell of `maze`, row-major.
pub fn build_colliders(maze: &MazeGraph) -> Vec<Collidable> {
    let mut out = Vec::new();
    for (cell, edges) in maze.grid.iter() {
        let origin = cell.world_origin();

        for (sx, sy) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            out.push(Collidable::static_solid(subtile(origin, sx, sy)));
        }

        for dir in Direction::ALL {
            let open = edges.get(dir) == EdgeState::Linked
                || (cell == maze.end && dir == maze.exit_side());
            if !open {
                let (sx, sy) = edge_subtile(dir);
                out.push(Collidable::static_solid(subtile(origin, sx, sy)));
            }
        }

        if let TileKind::Teleporter { pair } = maze.tile_kind(cell) {
            out.push(Collidable::static_trigger(
                subtile(origin, 1, 1),
                TriggerKind::Teleport {
                    displacement: maze.displacements[pair],
                },
            ));
        }
    }
    out
}

/// Registers the maze's colliders through the delayed-add buffer and flushes
/// once, the way a scene builder batches geometry. Returns the flushed count.
pub fn populate_engine(
    maze: &MazeGraph,
    engine: &mut CollisionEngine,
) -> Result<usize, CollisionError> {
    for collidable in build_colliders(maze) {
        engine.delay_add(collidable)?;
    }
    Ok(engine.flush())
}

fn subtile(origin: Vec2, sx: usize, sy: usize) -> Aabb {
    let min = origin + Vec2::new(sx as f32, sy as f32) * SUBTILE_SIZE;
    Aabb::new(min, min + Vec2::splat(SUBTILE_SIZE))
}

/// Sub-tile coordinates of the edge-middle square facing `dir`.
fn edge_subtile(dir: Direction) -> (usize, usize) {
    match dir {
        Direction::Up => (1, 0),
        Direction::Left => (0, 1),
        Direction::Right => (2, 1),
        Direction::Down => (1, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;
    use crate::maze::MazeGraph;

    fn sample_maze() -> MazeGraph {
        MazeGraph::generate_seeded(&MazeConfig::new(6, 6), 21).unwrap()
    }

    fn has_wall_at(colliders: &[Collidable], bounds: Aabb) -> bool {
        colliders
            .iter()
            .any(|c| c.is_solid() && c.boundary() == bounds)
    }

    #[test]
    fn test_linked_edges_are_open() {
        let maze = sample_maze();
        let colliders = build_colliders(&maze);

        for (cell, edges) in maze.grid.iter() {
            let origin = cell.world_origin();
            for dir in Direction::ALL {
                let (sx, sy) = edge_subtile(dir);
                let slot = subtile(origin, sx, sy);
                if edges.get(dir) == EdgeState::Linked {
                    assert!(
                        !has_wall_at(&colliders, slot),
                        "linked {dir:?} edge of ({},{}) is walled",
                        cell.row,
                        cell.col
                    );
                } else if cell != maze.end {
                    assert!(has_wall_at(&colliders, slot));
                }
            }
        }
    }

    #[test]
    fn test_exit_opening_is_open() {
        let maze = sample_maze();
        let colliders = build_colliders(&maze);
        let (sx, sy) = edge_subtile(maze.exit_side());
        let slot = subtile(maze.end.world_origin(), sx, sy);
        assert!(!has_wall_at(&colliders, slot));
    }

    #[test]
    fn test_corners_are_always_walls() {
        let maze = sample_maze();
        let colliders = build_colliders(&maze);
        for cell in maze.grid.cells() {
            for (sx, sy) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
                assert!(has_wall_at(&colliders, subtile(cell.world_origin(), sx, sy)));
            }
        }
    }

    #[test]
    fn test_one_trigger_per_teleporter() {
        let maze = sample_maze();
        let colliders = build_colliders(&maze);

        let triggers: Vec<&Collidable> = colliders.iter().filter(|c| c.is_trigger()).collect();
        assert_eq!(triggers.len(), maze.teleporters.len());

        for (pair, &cell) in maze.teleporters.iter().enumerate() {
            let slot = subtile(cell.world_origin(), 1, 1);
            let hit = triggers.iter().find(|c| c.boundary() == slot).unwrap();
            assert_eq!(
                hit.trigger,
                Some(TriggerKind::Teleport {
                    displacement: maze.displacements[pair]
                })
            );
            assert!(!hit.is_solid());
        }
    }

    #[test]
    fn test_populate_flushes_everything() {
        let maze = sample_maze();
        let expected = build_colliders(&maze).len();

        let mut engine = CollisionEngine::new();
        let flushed = populate_engine(&maze, &mut engine).unwrap();
        assert_eq!(flushed, expected);
        assert_eq!(engine.len(), expected);
    }

    #[test]
    fn test_destination_cells_have_no_trigger() {
        let maze = sample_maze();
        let colliders = build_colliders(&maze);
        for &cell in &maze.destinations {
            let slot = subtile(cell.world_origin(), 1, 1);
            assert!(!colliders.iter().any(|c| c.boundary() == slot));
        }
    }

    #[test]
    fn test_start_center_is_clear() {
        let maze = sample_maze();
        let colliders = build_colliders(&maze);
        let slot = subtile(maze.start.world_origin(), 1, 1);
        assert!(!colliders.iter().any(|c| c.boundary() == slot));
    }
}
