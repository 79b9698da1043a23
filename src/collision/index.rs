//! Bounding-box index over static bodies
//!
//! A small median-split BVH. Static geometry changes in bursts at scene
//! construction and then stays put for a whole maze, so mutations just mark
//! the tree dirty and the next query rebuilds it once.

use super::bounds::Aabb;
use super::collidable::ColliderId;

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        entry: usize,
    },
    Branch {
        bounds: Aabb,
        left: usize,
        right: usize,
    },
}

/// Overlap-query index over `(id, bounds)` entries.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    entries: Vec<(ColliderId, Aabb)>,
    nodes: Vec<Node>,
    root: Option<usize>,
    dirty: bool,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ColliderId, bounds: Aabb) {
        self.entries.push((id, bounds));
        self.dirty = true;
    }

    /// Drops the entry for `id`; true when one existed. Duplicate ids never
    /// occur (the engine allocates them monotonically).
    pub fn remove(&mut self, id: ColliderId) -> bool {
        match self.entries.iter().position(|(i, _)| *i == id) {
            Some(pos) => {
                self.entries.swap_remove(pos);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Replaces the stored bounds for `id`; true when the entry existed.
    pub fn update(&mut self, id: ColliderId, bounds: Aabb) -> bool {
        match self.entries.iter_mut().find(|(i, _)| *i == id) {
            Some(entry) => {
                entry.1 = bounds;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.nodes.clear();
        self.root = None;
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ColliderId) -> bool {
        self.entries.iter().any(|(i, _)| *i == id)
    }

    /// Ids of entries whose bounds strictly overlap `probe`, ascending by id.
    pub fn query(&mut self, probe: &Aabb, out: &mut Vec<ColliderId>) {
        out.clear();
        if self.dirty {
            self.rebuild();
        }
        if let Some(root) = self.root {
            self.query_node(root, probe, out);
        }
        out.sort_unstable();
    }

    fn query_node(&self, node: usize, probe: &Aabb, out: &mut Vec<ColliderId>) {
        match &self.nodes[node] {
            Node::Leaf { entry } => {
                let (id, bounds) = self.entries[*entry];
                if bounds.intersects(probe) {
                    out.push(id);
                }
            }
            Node::Branch { bounds, left, right } => {
                if bounds.intersects(probe) {
                    self.query_node(*left, probe, out);
                    self.query_node(*right, probe, out);
                }
            }
        }
    }

    fn rebuild(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.dirty = false;
        if self.entries.is_empty() {
            return;
        }
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        let root = self.build(&mut order);
        self.root = Some(root);
    }

    /// Builds the subtree over `items`, splitting at the median of the wider
    /// axis. Returns the node index.
    fn build(&mut self, items: &mut [usize]) -> usize {
        if items.len() == 1 {
            self.nodes.push(Node::Leaf { entry: items[0] });
            return self.nodes.len() - 1;
        }

        let mut bounds = self.entries[items[0]].1;
        for &i in &items[1..] {
            bounds = bounds.union(&self.entries[i].1);
        }

        let split_x = bounds.width() >= bounds.height();
        items.sort_unstable_by(|&a, &b| {
            let ca = self.entries[a].1.center();
            let cb = self.entries[b].1.center();
            let (ka, kb) = if split_x { (ca.x, cb.x) } else { (ca.y, cb.y) };
            ka.total_cmp(&kb)
        });

        let mid = items.len() / 2;
        let (lo, hi) = items.split_at_mut(mid);
        let left = self.build(lo);
        let right = self.build(hi);
        self.nodes.push(Node::Branch { bounds, left, right });
        self.nodes.len() - 1
    }
}
