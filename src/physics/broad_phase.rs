//! Broad phase: uniform grid partitioning
//!
//! Space is divided into an unbounded grid of square cells. A moving entity
//! is only tested against collidable entities whose anchor falls in its own
//! cell or one of the eight around it. The cell size has to be more than
//! twice the largest collider radius, otherwise big overlapping sprites in
//! cells two apart are never paired.

use std::collections::HashMap;

use crate::geometry::Point;
use crate::world::Entity;

/// A cell of the conceptual grid; may lie outside any map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
}

impl GridCell {
    /// Chebyshev distance in cells
    #[inline]
    pub fn distance(&self, other: GridCell) -> i64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// This cell and its eight neighbors
    pub fn neighborhood(self) -> impl Iterator<Item = GridCell> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).map(move |dx| GridCell {
                x: self.x + dx,
                y: self.y + dy,
            })
        })
    }
}

/// One moving entity and the entities it has to be tested against this tick
///
/// Both fields are indices into the entity slice the group was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionGroup {
    pub subject: usize,
    pub targets: Vec<usize>,
}

/// Grid partitioner
#[derive(Debug, Clone, Copy)]
pub struct BroadPhase {
    cell_size: f64,
}

impl BroadPhase {
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing a position (floor division)
    pub fn cell_of(&self, position: Point) -> GridCell {
        GridCell {
            x: (position.x() / self.cell_size).floor() as i64,
            y: (position.y() / self.cell_size).floor() as i64,
        }
    }

    /// Build a group for every collidable entity that is moving
    ///
    /// Static entities and ones slower than one unit per second never start a
    /// group but can still be targets. Groups and their targets follow the
    /// order of `entities`. An entity is never its own target, compared by ID
    /// since replicated entities can be rebuilt from network data.
    pub fn groups(&self, entities: &[Entity]) -> Vec<CollisionGroup> {
        let mut buckets: HashMap<GridCell, Vec<usize>> = HashMap::new();
        for (i, e) in entities.iter().enumerate() {
            if e.collidable {
                buckets.entry(self.cell_of(e.position())).or_default().push(i);
            }
        }

        let mut groups = Vec::new();
        for (i, e) in entities.iter().enumerate() {
            if !e.collidable || !e.motion.is_some_and(|m| m.is_moving()) {
                continue;
            }
            let mut targets: Vec<usize> = self
                .cell_of(e.position())
                .neighborhood()
                .filter_map(|cell| buckets.get(&cell))
                .flatten()
                .copied()
                .filter(|&j| entities[j].id() != e.id())
                .collect();
            targets.sort_unstable();
            groups.push(CollisionGroup { subject: i, targets });
        }

        log::trace!(
            "broad phase: {} groups, {} candidate pairs",
            groups.len(),
            groups.iter().map(|g| g.targets.len()).sum::<usize>()
        );
        groups
    }
}
