//! Warp Maze entry point
//!
//! Headless demo driver: generates a maze, prints an ASCII rendering, then
//! walks a scripted actor through the collision engine for a bounded number
//! of ticks, regenerating whenever the actor escapes through the exit.
//!
//! Usage: `warp-maze [width] [height] [seed] [--json]`

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use warp_maze::consts::{ACTOR_SIZE, ACTOR_SPEED};
use warp_maze::maze::{EdgeState, TileKind};
use warp_maze::{
    Aabb, Cell, Collidable, CollisionEngine, ContactEvent, MazeConfig, MazeGraph, TriggerKind,
    scene,
};

/// Ticks of scripted walking before the demo stops.
const DEMO_TICKS: u32 = 2000;
/// Ticks an actor holds one walk direction.
const HOLD_TICKS: u32 = 12;

fn main() {
    env_logger::init();

    let mut width = 8usize;
    let mut height = 8usize;
    let mut seed = 1u64;
    let mut json = false;

    let mut positional = 0;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
            continue;
        }
        let parsed = match arg.parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                eprintln!("unrecognized argument: {arg}");
                eprintln!("usage: warp-maze [width] [height] [seed] [--json]");
                std::process::exit(2);
            }
        };
        match positional {
            0 => width = parsed as usize,
            1 => height = parsed as usize,
            _ => seed = parsed,
        }
        positional += 1;
    }

    let config = MazeConfig::new(width, height);
    let maze = match MazeGraph::generate_seeded(&config, seed) {
        Ok(maze) => maze,
        Err(err) => {
            eprintln!("maze generation failed: {err}");
            std::process::exit(1);
        }
    };

    if json {
        print_summary(&maze, seed);
        return;
    }

    print_maze(&maze);
    walk(&config, maze, seed);
}

fn print_summary(maze: &MazeGraph, seed: u64) {
    let summary = serde_json::json!({
        "seed": seed,
        "width": maze.width(),
        "height": maze.height(),
        "links": maze.grid.linked_pair_count(),
        "start": maze.start,
        "end": maze.end,
        "exit_side": format!("{:?}", maze.exit_side()),
        "dead_ends": maze.dead_ends,
        "teleporters": maze.teleporters,
        "destinations": maze.destinations,
        "displacements": maze.displacements,
    });
    println!("{}", serde_json::to_string_pretty(&summary).expect("summary is plain data"));
}

fn print_maze(maze: &MazeGraph) {
    for row in 0..maze.height() {
        let mut top = String::new();
        let mut mid = String::new();
        for col in 0..maze.width() {
            let cell = Cell::new(row, col);
            let edges = maze.links(cell).expect("cell is in bounds");

            top.push('+');
            top.push_str(if edges.up() == EdgeState::Linked {
                "   "
            } else {
                "---"
            });

            mid.push(if edges.left() == EdgeState::Linked {
                ' '
            } else {
                '|'
            });
            let marker = match maze.tile_kind(cell) {
                TileKind::Start => 'S',
                TileKind::Exit => 'E',
                TileKind::Teleporter { .. } => 'T',
                TileKind::Destination => 'D',
                TileKind::Plain if maze.dead_ends.contains(&cell) => '.',
                TileKind::Plain => ' ',
            };
            mid.push(' ');
            mid.push(marker);
            mid.push(' ');
        }
        top.push('+');
        mid.push('|');
        println!("{top}");
        println!("{mid}");
    }
    println!("{}", "+---".repeat(maze.width()) + "+");
}

/// Runs the scripted walk: hold a random direction a few ticks, let the
/// engine push the actor out of walls, apply teleports, regenerate on
/// escape.
fn walk(config: &MazeConfig, mut maze: MazeGraph, seed: u64) {
    let mut rng = Pcg32::seed_from_u64(seed ^ 0x57a1c);
    let mut engine = CollisionEngine::new();

    let mut wall_count = match scene::populate_engine(&maze, &mut engine) {
        Ok(count) => count,
        Err(err) => {
            eprintln!("scene construction failed: {err}");
            std::process::exit(1);
        }
    };
    let mut actor = engine
        .add(Collidable::kinetic(Aabb::from_center_size(
            maze.start.world_center(),
            Vec2::splat(ACTOR_SIZE),
        )))
        .expect("actor bounds are finite");

    let mut mazes = 1u32;
    let mut teleports = 0u32;
    let mut bumps = 0u32;
    let mut next_seed = seed;

    for tick in 0..DEMO_TICKS {
        if tick % HOLD_TICKS == 0 {
            let dir = match rng.random_range(0..4u8) {
                0 => Vec2::new(0.0, 1.0),
                1 => Vec2::new(1.0, 0.0),
                2 => Vec2::new(0.0, -1.0),
                _ => Vec2::new(-1.0, 0.0),
            };
            engine.set_velocity(actor, dir * ACTOR_SPEED);
        }

        for event in engine.update(1.0) {
            match event {
                ContactEvent::Trigger {
                    kind: TriggerKind::Teleport { displacement },
                    target,
                    ..
                } => {
                    engine.translate(target, displacement);
                    teleports += 1;
                }
                ContactEvent::PushOut { .. } => bumps += 1,
            }
        }

        let center = engine
            .get(actor)
            .expect("actor stays registered")
            .boundary()
            .center();
        let size = maze.world_size();
        if center.x < 0.0 || center.y < 0.0 || center.x > size.x || center.y > size.y {
            log::info!("actor escaped at tick {tick}; regenerating");
            next_seed += 1;
            maze = match MazeGraph::generate_seeded(config, next_seed) {
                Ok(maze) => maze,
                Err(err) => {
                    eprintln!("maze generation failed: {err}");
                    std::process::exit(1);
                }
            };
            engine.clear();
            wall_count = match scene::populate_engine(&maze, &mut engine) {
                Ok(count) => count,
                Err(err) => {
                    eprintln!("scene construction failed: {err}");
                    std::process::exit(1);
                }
            };
            actor = engine
                .add(Collidable::kinetic(Aabb::from_center_size(
                    maze.start.world_center(),
                    Vec2::splat(ACTOR_SIZE),
                )))
                .expect("actor bounds are finite");
            mazes += 1;
        }
    }

    println!(
        "walked {DEMO_TICKS} ticks across {mazes} maze(s): {bumps} wall bumps, \
         {teleports} teleports, {wall_count} colliders in the last scene"
    );
}
